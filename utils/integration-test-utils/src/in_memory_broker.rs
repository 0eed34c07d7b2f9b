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

use crate::accumulator::Accumulator;
use crate::topic_match::topic_matches;
use async_trait::async_trait;
use stasis_amqp::{Broker, BrokerError, ExchangeKind, OutboundMessage};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::trace;

/// `x-match` argument of a headers binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XMatch {
    All,
    Any,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    Headers {
        exchange: String,
        x_match: XMatch,
        headers: BTreeMap<String, String>,
    },
    Topic {
        exchange: String,
        pattern: String,
    },
}

impl Binding {
    /// Headers binding with `x-match: all` on the given pairs.
    pub fn headers_all(exchange: &str, pairs: &[(&str, &str)]) -> Self {
        Binding::Headers {
            exchange: exchange.to_string(),
            x_match: XMatch::All,
            headers: pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn topic(exchange: &str, pattern: &str) -> Self {
        Binding::Topic {
            exchange: exchange.to_string(),
            pattern: pattern.to_string(),
        }
    }

    pub fn matches(&self, message: &OutboundMessage) -> bool {
        match self {
            Binding::Headers {
                exchange,
                x_match,
                headers,
            } => {
                if message.exchange_kind != ExchangeKind::Headers || *exchange != message.exchange {
                    return false;
                }
                let mut pairs = headers.iter();
                let mut present =
                    |(key, value): (&String, &String)| message.headers.get(key) == Some(value);
                match x_match {
                    XMatch::All => pairs.all(&mut present),
                    XMatch::Any => pairs.any(&mut present),
                }
            }
            Binding::Topic { exchange, pattern } => {
                message.exchange_kind == ExchangeKind::Topic
                    && *exchange == message.exchange
                    && topic_matches(pattern, &message.routing_key)
            }
        }
    }
}

/// Broker double that routes published messages to bound accumulators.
///
/// While unavailable every publish fails with [`BrokerError::Unavailable`] and
/// nothing is delivered.
pub struct InMemoryBroker {
    bindings: Mutex<Vec<(Binding, Accumulator)>>,
    published: Accumulator,
    available: AtomicBool,
    failed_publishes: AtomicUsize,
}

impl Default for InMemoryBroker {
    fn default() -> Self {
        Self {
            bindings: Mutex::new(Vec::new()),
            published: Accumulator::default(),
            available: AtomicBool::new(true),
            failed_publishes: AtomicUsize::new(0),
        }
    }
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, binding: Binding) -> Accumulator {
        let accumulator = Accumulator::default();
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((binding, accumulator.clone()));
        accumulator
    }

    /// Every accepted message, bound or not.
    pub fn published(&self) -> Accumulator {
        self.published.clone()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn failed_publishes(&self) -> usize {
        self.failed_publishes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Broker for InMemoryBroker {
    async fn publish(&self, message: OutboundMessage) -> Result<(), BrokerError> {
        if !self.available.load(Ordering::SeqCst) {
            self.failed_publishes.fetch_add(1, Ordering::SeqCst);
            return Err(BrokerError::Unavailable("in-memory broker offline".to_string()));
        }

        let bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        for (binding, accumulator) in bindings.iter() {
            if binding.matches(&message) {
                trace!(binding = ?binding, "delivering message to binding");
                accumulator.push(message.clone());
            }
        }
        drop(bindings);

        self.published.push(message);
        Ok(())
    }
}
