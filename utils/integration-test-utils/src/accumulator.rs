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

use serde_json::Value;
use stasis_amqp::OutboundMessage;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Collects every message delivered to one binding. Clones share storage.
#[derive(Clone, Default)]
pub struct Accumulator {
    messages: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl Accumulator {
    pub(crate) fn push(&self, message: OutboundMessage) {
        self.lock().push(message);
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.lock().clone()
    }

    /// Message bodies decoded as JSON. Bodies that are not JSON become `Null`.
    pub fn accumulate(&self) -> Vec<Value> {
        self.lock()
            .iter()
            .map(|message| serde_json::from_slice(&message.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Values of the `name` header in delivery order.
    pub fn event_names(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|message| message.headers.get("name").cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<OutboundMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
