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

//! Canonical routing metadata for one event.
//!
//! The header table and the topic key are both computed from this one value.

use crate::event::EventCategory;
use crate::routing::routing_key::{
    new_routing_key, AMI_PREFIX, HEADER_APPLICATION_NAME, HEADER_CATEGORY, HEADER_NAME,
    STASIS_APP_PREFIX, STASIS_CHANNEL_PREFIX,
};
use std::collections::BTreeMap;
use strum::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RouteKind {
    /// Addressed to one stasis application.
    Application,
    /// Channel activity on the stasis side, not gated by subscription.
    Channel,
    Ami,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutingDescriptor {
    kind: RouteKind,
    category: EventCategory,
    event_name: String,
    application: Option<String>,
    ordering_key: String,
}

impl RoutingDescriptor {
    pub(crate) fn new(
        kind: RouteKind,
        category: EventCategory,
        event_name: &str,
        application: Option<&str>,
        ordering_key: String,
    ) -> Self {
        Self {
            kind,
            category,
            event_name: event_name.to_string(),
            application: application.map(str::to_string),
            ordering_key,
        }
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    pub fn category(&self) -> EventCategory {
        self.category
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// The subscribed application this event is attributed to.
    pub fn application(&self) -> Option<&str> {
        self.application.as_deref()
    }

    /// Events sharing an ordering key are published in arrival order.
    pub fn ordering_key(&self) -> &str {
        &self.ordering_key
    }

    /// Application events only leave the bridge when attributed to a subscribed name.
    pub fn is_publishable(&self) -> bool {
        self.kind != RouteKind::Application || self.application.is_some()
    }

    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(HEADER_CATEGORY.to_string(), self.category.to_string());
        headers.insert(HEADER_NAME.to_string(), self.event_name.clone());
        if let Some(application) = &self.application {
            headers.insert(HEADER_APPLICATION_NAME.to_string(), application.clone());
        }
        headers
    }

    pub fn topic(&self) -> Option<String> {
        match self.kind {
            RouteKind::Application => self
                .application
                .as_deref()
                .map(|application| new_routing_key(STASIS_APP_PREFIX, application)),
            RouteKind::Channel => Some(new_routing_key(STASIS_CHANNEL_PREFIX, &self.event_name)),
            RouteKind::Ami => Some(new_routing_key(AMI_PREFIX, &self.event_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RouteKind, RoutingDescriptor};
    use crate::event::EventCategory;
    use std::collections::BTreeMap;

    fn expected_headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn application_route_keeps_exact_name_in_headers() {
        let descriptor = RoutingDescriptor::new(
            RouteKind::Application,
            EventCategory::Stasis,
            "StasisStart",
            Some("MyApp"),
            "app:MyApp".to_string(),
        );

        assert_eq!(
            descriptor.headers(),
            expected_headers(&[
                ("application_name", "MyApp"),
                ("category", "stasis"),
                ("name", "StasisStart"),
            ])
        );
        assert_eq!(descriptor.topic().as_deref(), Some("stasis.app.myapp"));
        assert!(descriptor.is_publishable());
    }

    #[test]
    fn unattributed_application_route_has_no_topic() {
        let descriptor = RoutingDescriptor::new(
            RouteKind::Application,
            EventCategory::Stasis,
            "StasisStart",
            None,
            "app:a".to_string(),
        );

        assert!(!descriptor.headers().contains_key("application_name"));
        assert_eq!(descriptor.topic(), None);
        assert!(!descriptor.is_publishable());
    }

    #[test]
    fn channel_and_ami_topics_use_event_name() {
        let channel = RoutingDescriptor::new(
            RouteKind::Channel,
            EventCategory::Stasis,
            "ChannelHangupRequest",
            None,
            "category:stasis".to_string(),
        );
        assert_eq!(
            channel.topic().as_deref(),
            Some("stasis.channel.channelhanguprequest")
        );
        assert_eq!(
            channel.headers(),
            expected_headers(&[("category", "stasis"), ("name", "ChannelHangupRequest")])
        );

        let ami = RoutingDescriptor::new(
            RouteKind::Ami,
            EventCategory::Ami,
            "Dial",
            None,
            "category:ami".to_string(),
        );
        assert_eq!(ami.topic().as_deref(), Some("ami.dial"));
        assert_eq!(
            ami.headers(),
            expected_headers(&[("category", "ami"), ("name", "Dial")])
        );
    }
}
