/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Field formatting helpers so log lines render routing metadata the same way everywhere.

use crate::api::broker::OutboundMessage;
use crate::routing::descriptor::RoutingDescriptor;
use std::collections::BTreeMap;

const NONE: &str = "-";

/// Renders a header table as `k=v,k=v` in key order.
pub fn format_headers(headers: &BTreeMap<String, String>) -> String {
    if headers.is_empty() {
        return NONE.to_string();
    }
    headers
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn format_optional(value: Option<&str>) -> &str {
    value.unwrap_or(NONE)
}

pub fn format_descriptor(descriptor: &RoutingDescriptor) -> String {
    format!(
        "{}:{}:{}",
        descriptor.kind(),
        descriptor.event_name(),
        format_optional(descriptor.application())
    )
}

pub fn format_destination(message: &OutboundMessage) -> String {
    if message.routing_key.is_empty() {
        format!("{}({})", message.exchange, message.exchange_kind)
    } else {
        format!(
            "{}({})/{}",
            message.exchange, message.exchange_kind, message.routing_key
        )
    }
}
