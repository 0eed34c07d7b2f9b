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

//! Outbound broker contract.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

pub const CONTENT_TYPE_JSON: &str = "application/json";
/// AMQP `delivery_mode` for persistent messages.
pub const DELIVERY_MODE_PERSISTENT: u8 = 2;

/// Exchange type a message is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExchangeKind {
    Headers,
    Topic,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageProperties {
    pub content_type: String,
    pub delivery_mode: u8,
}

impl Default for MessageProperties {
    fn default() -> Self {
        Self {
            content_type: CONTENT_TYPE_JSON.to_string(),
            delivery_mode: DELIVERY_MODE_PERSISTENT,
        }
    }
}

/// A fully addressed message ready for `basic.publish`.
///
/// `routing_key` is empty for headers exchanges. `headers` is always populated,
/// whatever the exchange kind, so header-bound consumers work in both modes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub exchange: String,
    pub exchange_kind: ExchangeKind,
    pub routing_key: String,
    pub headers: BTreeMap<String, String>,
    pub properties: MessageProperties,
    #[serde(serialize_with = "serialize_body")]
    pub body: Vec<u8>,
}

fn serialize_body<S: serde::Serializer>(body: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(body))
}

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("broker unavailable: {0}")]
    Unavailable(String),
    #[error("broker rejected publish to {exchange}: {reason}")]
    Rejected { exchange: String, reason: String },
}

/// Publishing side of an AMQP-compatible broker connection.
///
/// Implementations must not retry internally: the publisher treats every call as
/// fire-and-forget and logs failures.
#[async_trait]
pub trait Broker: Send + Sync {
    async fn publish(&self, message: OutboundMessage) -> Result<(), BrokerError>;
}
