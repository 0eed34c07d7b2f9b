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

//! # stasis-amqp
//!
//! `stasis-amqp` turns telephony engine events (stasis application events,
//! stasis channel events and AMI events) into addressed messages on an
//! AMQP-compatible broker.
//!
//! Typical usage is centered on [`StasisAmqpBridge`]: subscribe applications,
//! dispatch events, and let the publisher lanes hand messages to a [`Broker`].
//!
//! ```
//! use async_trait::async_trait;
//! use serde_json::Map;
//! use stasis_amqp::config::PublisherConfig;
//! use stasis_amqp::event::Event;
//! use stasis_amqp::{Broker, BrokerError, OutboundMessage, StasisAmqpBridge};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Default)]
//! struct Recording(Mutex<Vec<OutboundMessage>>);
//!
//! #[async_trait]
//! impl Broker for Recording {
//!     async fn publish(&self, message: OutboundMessage) -> Result<(), BrokerError> {
//!         self.0.lock().unwrap().push(message);
//!         Ok(())
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let broker = Arc::new(Recording::default());
//! let bridge = StasisAmqpBridge::new(&PublisherConfig::default(), broker.clone()).unwrap();
//!
//! bridge.subscribe("A").unwrap();
//! bridge
//!     .dispatch(Event::stasis_application("A", "StasisStart", Map::new()))
//!     .await;
//! bridge.flush().await;
//!
//! let published = broker.0.lock().unwrap();
//! assert_eq!(published.len(), 1);
//! assert_eq!(published[0].headers["application_name"], "A");
//! # });
//! ```
//!
//! ## Architecture map
//!
//! - `control_plane`: application subscription lifecycle and snapshot reads.
//! - `routing`: event classification, header/topic derivation and per-category
//!   publication policy.
//! - `data_plane`: body encoding, ordered publisher lanes and egress workers.
//! - `runtime`: worker thread/runtime spawning and application discovery.
//! - `observability`: canonical structured event names and field formatting.
//!
//! ## Observability
//!
//! The crate emits `tracing` events only and never installs a subscriber.
//! Every event carries `event` and `component` fields; see
//! [`observability::events`] for the stable names.

pub mod api;
mod bridge;
pub mod config;
mod control_plane;
mod data_plane;
pub mod event;
pub mod observability;
pub mod routing;
mod runtime;

pub use api::application_source::{ApplicationSource, ApplicationSourceError};
pub use api::broker::{Broker, BrokerError, ExchangeKind, MessageProperties, OutboundMessage};
pub use bridge::{BridgeError, StasisAmqpBridge};
pub use control_plane::application_table::{
    ApplicationInfo, SubscribeOutcome, SubscriptionError, UnsubscribeOutcome,
};
pub use control_plane::subscription_registry::SubscriptionRegistry;
pub use data_plane::egress_pool::LaneClosed;
pub use data_plane::ingress::DispatchOutcome;
pub use routing::classifier::ClassifyError;
