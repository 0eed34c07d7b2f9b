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

//! Publisher configuration.
//!
//! The configuration is read once at startup (json5) and resolved into a
//! [`ResolvedConfig`]. Every validation error surfaces here, never per event.
//!
//! ```
//! use stasis_amqp::config::PublisherConfig;
//!
//! let config = PublisherConfig::from_json5_str(
//!     r#"{
//!         connection: "rabbitmq",
//!         categories: {
//!             stasis: { mode: "topic" },
//!             ami: { mode: "disabled" },
//!         },
//!     }"#,
//! )
//! .unwrap();
//! assert!(config.resolve().is_ok());
//! ```

use crate::api::broker::ExchangeKind;
use crate::event::EventCategory;
use crate::routing::filter::{CategoryPolicy, EventFilter, Publication, PublishTarget};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use strum::{Display, IntoEnumIterator};
use thiserror::Error;

pub const DEFAULT_QUEUE: &str = "asterisk_stasis";
pub const DEFAULT_EID: &str = "00:00:00:00:00:00";
pub const DEFAULT_HEADERS_EXCHANGE: &str = "amq.headers";
pub const DEFAULT_TOPIC_EXCHANGE: &str = "amq.topic";
pub const DEFAULT_PUBLISHER_LANES: usize = 4;
pub const MAX_PUBLISHER_LANES: usize = 64;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse configuration: {0}")]
    Parse(#[from] json5::Error),
    #[error("unknown event category '{0}' in configuration")]
    UnknownCategory(String),
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// How events of one category reach the broker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AddressingMode {
    #[default]
    Headers,
    Topic,
    Disabled,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum EventFilterConfig {
    #[default]
    All,
    Allow {
        names: Vec<String>,
    },
    Deny {
        names: Vec<String>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    #[serde(default)]
    pub mode: AddressingMode,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub events: EventFilterConfig,
}

/// What `subscribe` does for a name that is already active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DuplicateSubscriptionPolicy {
    #[default]
    Refresh,
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublisherConfig {
    #[serde(default)]
    pub connection: String,
    #[serde(default = "default_queue")]
    pub queue: String,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default = "default_eid")]
    pub eid: String,
    #[serde(default)]
    pub envelope: bool,
    #[serde(default = "default_publisher_lanes")]
    pub publisher_lanes: usize,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default)]
    pub duplicate_subscription: DuplicateSubscriptionPolicy,
    #[serde(default)]
    pub discovery_interval_ms: Option<u64>,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryConfig>,
}

fn default_queue() -> String {
    DEFAULT_QUEUE.to_string()
}

fn default_eid() -> String {
    DEFAULT_EID.to_string()
}

fn default_publisher_lanes() -> usize {
    DEFAULT_PUBLISHER_LANES
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            connection: String::new(),
            queue: default_queue(),
            exchange: None,
            eid: default_eid(),
            envelope: false,
            publisher_lanes: DEFAULT_PUBLISHER_LANES,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            duplicate_subscription: DuplicateSubscriptionPolicy::default(),
            discovery_interval_ms: None,
            categories: BTreeMap::new(),
        }
    }
}

impl PublisherConfig {
    pub fn from_json5_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(json5::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json5_str(&contents)
    }

    /// Sets the policy for one category, replacing any previous one.
    pub fn with_category(mut self, category: EventCategory, config: CategoryConfig) -> Self {
        self.categories.insert(category.to_string(), config);
        self
    }

    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        validate_lane_limits(self.publisher_lanes, self.queue_capacity)?;
        if self.eid.trim().is_empty() {
            return Err(ConfigError::invalid("eid", "must not be empty"));
        }
        if let Some(exchange) = &self.exchange {
            validate_exchange_name("exchange", exchange)?;
        }
        let discovery_interval = match self.discovery_interval_ms {
            Some(0) => {
                return Err(ConfigError::invalid(
                    "discovery_interval_ms",
                    "must be greater than 0",
                ))
            }
            Some(millis) => Some(Duration::from_millis(millis)),
            None => None,
        };

        let mut configured = HashMap::new();
        for (key, category_config) in &self.categories {
            let category = EventCategory::from_str(key)
                .map_err(|_| ConfigError::UnknownCategory(key.clone()))?;
            configured.insert(category, category_config);
        }

        let mut policies = HashMap::new();
        for category in EventCategory::iter() {
            let default_config = CategoryConfig::default();
            let category_config = configured.get(&category).copied().unwrap_or(&default_config);
            policies.insert(
                category,
                self.resolve_category(category, category_config)?,
            );
        }
        validate_exchange_kinds(&policies)?;

        Ok(ResolvedConfig {
            connection: self.connection.clone(),
            queue: self.queue.clone(),
            eid: self.eid.clone(),
            envelope: self.envelope,
            publisher_lanes: self.publisher_lanes,
            queue_capacity: self.queue_capacity,
            duplicate_subscription: self.duplicate_subscription,
            discovery_interval,
            policies,
        })
    }

    fn resolve_category(
        &self,
        category: EventCategory,
        config: &CategoryConfig,
    ) -> Result<CategoryPolicy, ConfigError> {
        if let Some(exchange) = &config.exchange {
            validate_exchange_name(&format!("categories.{category}.exchange"), exchange)?;
        }

        let kind = match config.mode {
            AddressingMode::Disabled => None,
            AddressingMode::Headers => Some(ExchangeKind::Headers),
            AddressingMode::Topic => Some(ExchangeKind::Topic),
        };

        let publication = match kind {
            None => Publication::Disabled,
            Some(kind) => {
                let exchange = config
                    .exchange
                    .clone()
                    .or_else(|| self.exchange.clone())
                    .unwrap_or_else(|| default_exchange(kind).to_string());
                Publication::Enabled(PublishTarget { exchange, kind })
            }
        };

        let events = match &config.events {
            EventFilterConfig::All => EventFilter::All,
            EventFilterConfig::Allow { names } => EventFilter::Allow(names.iter().cloned().collect()),
            EventFilterConfig::Deny { names } => EventFilter::Deny(names.iter().cloned().collect()),
        };

        Ok(CategoryPolicy {
            publication,
            events,
        })
    }
}

fn validate_lane_limits(publisher_lanes: usize, queue_capacity: usize) -> Result<(), ConfigError> {
    if publisher_lanes == 0 || publisher_lanes > MAX_PUBLISHER_LANES {
        return Err(ConfigError::invalid(
            "publisher_lanes",
            format!("must be between 1 and {MAX_PUBLISHER_LANES}"),
        ));
    }
    if queue_capacity == 0 {
        return Err(ConfigError::invalid("queue_capacity", "must be at least 1"));
    }
    Ok(())
}

// One exchange name is declared with exactly one kind.
fn validate_exchange_kinds(
    policies: &HashMap<EventCategory, CategoryPolicy>,
) -> Result<(), ConfigError> {
    let mut declared: HashMap<&str, (EventCategory, ExchangeKind)> = HashMap::new();
    for category in EventCategory::iter() {
        let Some(Publication::Enabled(target)) = policies.get(&category).map(|p| &p.publication)
        else {
            continue;
        };
        match declared.get(target.exchange.as_str()) {
            Some((first, kind)) if *kind != target.kind => {
                return Err(ConfigError::invalid(
                    "exchange",
                    format!(
                        "exchange '{}' is used as {kind} by {first} and as {} by {category}",
                        target.exchange, target.kind
                    ),
                ));
            }
            Some(_) => {}
            None => {
                declared.insert(target.exchange.as_str(), (category, target.kind));
            }
        }
    }
    Ok(())
}

fn default_exchange(kind: ExchangeKind) -> &'static str {
    match kind {
        ExchangeKind::Headers => DEFAULT_HEADERS_EXCHANGE,
        ExchangeKind::Topic => DEFAULT_TOPIC_EXCHANGE,
    }
}

// The nameless default exchange is a direct exchange; it cannot carry headers or
// topic routing.
fn validate_exchange_name(field: &str, exchange: &str) -> Result<(), ConfigError> {
    if exchange.trim().is_empty() {
        return Err(ConfigError::invalid(field, "exchange name must not be empty"));
    }
    Ok(())
}

/// Validated, immutable configuration the bridge runs with.
///
/// Only [`PublisherConfig::resolve`] guarantees a consistent value; the bridge
/// re-checks the lane limits of anything built by hand.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub connection: String,
    pub queue: String,
    pub eid: String,
    pub envelope: bool,
    pub publisher_lanes: usize,
    pub queue_capacity: usize,
    pub duplicate_subscription: DuplicateSubscriptionPolicy,
    pub discovery_interval: Option<Duration>,
    pub policies: HashMap<EventCategory, CategoryPolicy>,
}

impl ResolvedConfig {
    /// Checks the values the publisher lanes cannot start without.
    pub fn check_lane_limits(&self) -> Result<(), ConfigError> {
        validate_lane_limits(self.publisher_lanes, self.queue_capacity)
    }
}
