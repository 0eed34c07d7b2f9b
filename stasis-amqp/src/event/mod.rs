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

//! Inbound events as produced by the host telephony engine.

pub mod ami;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Event categories the bridge knows how to route.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventCategory {
    Stasis,
    Ami,
}

/// One internal event.
///
/// The category stays a plain string so events from newer engines with categories
/// this crate does not know can still be received, logged and dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Event {
    category: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    application: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eid: Option<String>,
    #[serde(default)]
    payload: Map<String, Value>,
}

impl Event {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        application: Option<String>,
        payload: Map<String, Value>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            application,
            eid: None,
            payload,
        }
    }

    /// An event delivered to a stasis application, e.g. `StasisStart`.
    pub fn stasis_application(
        application: impl Into<String>,
        name: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Self {
        Self::new(
            EventCategory::Stasis.as_ref(),
            name,
            Some(application.into()),
            payload,
        )
    }

    /// A channel-topic event not gated by any application, e.g. `Dial`.
    pub fn stasis_channel(name: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self::new(EventCategory::Stasis.as_ref(), name, None, payload)
    }

    pub fn ami(name: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self::new(EventCategory::Ami.as_ref(), name, None, payload)
    }

    pub fn with_eid(mut self, eid: impl Into<String>) -> Self {
        self.eid = Some(eid.into());
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn application(&self) -> Option<&str> {
        self.application.as_deref()
    }

    pub fn eid(&self) -> Option<&str> {
        self.eid.as_deref()
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, EventCategory};
    use serde_json::{json, Map};
    use std::str::FromStr;

    #[test]
    fn constructors_set_category_and_owner() {
        let app = Event::stasis_application("A", "StasisStart", Map::new());
        assert_eq!(app.category(), "stasis");
        assert_eq!(app.application(), Some("A"));

        let channel = Event::stasis_channel("Dial", Map::new());
        assert_eq!(channel.category(), "stasis");
        assert_eq!(channel.application(), None);

        let ami = Event::ami("DeviceStateChange", Map::new()).with_eid("00:11:22:33:44:55");
        assert_eq!(ami.category(), "ami");
        assert_eq!(ami.eid(), Some("00:11:22:33:44:55"));
    }

    #[test]
    fn category_parsing_is_exact() {
        assert_eq!(EventCategory::from_str("ami").unwrap(), EventCategory::Ami);
        assert!(EventCategory::from_str("AMI").is_err());
        assert!(EventCategory::from_str("bridge").is_err());
    }

    #[test]
    fn deserializes_with_defaults() {
        let event: Event = serde_json::from_value(json!({
            "category": "stasis",
            "name": "StasisStart",
            "application": "A",
        }))
        .expect("valid event");

        assert_eq!(event.name(), "StasisStart");
        assert!(event.payload().is_empty());
        assert_eq!(event.eid(), None);
    }
}
