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

//! Event classification against a registry snapshot.

use crate::control_plane::application_table::ApplicationTable;
use crate::event::{Event, EventCategory};
use crate::routing::descriptor::{RouteKind, RoutingDescriptor};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

const CHANNEL_OBJECT: &str = "channel";
const CHANNEL_ID: &str = "id";
const AMI_UNIQUE_ID: &str = "Uniqueid";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("unrecognised event category '{0}'")]
    UnknownCategory(String),
    #[error("event has no name")]
    MissingName,
}

/// Builds the routing descriptor for `event`.
///
/// An owning application is only attributed when `applications` holds it under
/// the exact same spelling. Any application carried by an AMI event is ignored.
pub(crate) fn classify(
    event: &Event,
    applications: &ApplicationTable,
) -> Result<RoutingDescriptor, ClassifyError> {
    let category = EventCategory::from_str(event.category())
        .map_err(|_| ClassifyError::UnknownCategory(event.category().to_string()))?;
    if event.name().trim().is_empty() {
        return Err(ClassifyError::MissingName);
    }

    let descriptor = match (category, event.application()) {
        (EventCategory::Stasis, Some(owner)) => {
            let attributed = applications
                .get_key_value(owner)
                .map(|(name, _)| name.as_str());
            RoutingDescriptor::new(
                RouteKind::Application,
                category,
                event.name(),
                attributed,
                format!("app:{owner}"),
            )
        }
        (EventCategory::Stasis, None) => RoutingDescriptor::new(
            RouteKind::Channel,
            category,
            event.name(),
            None,
            channel_ordering_key(event, category),
        ),
        (EventCategory::Ami, _) => RoutingDescriptor::new(
            RouteKind::Ami,
            category,
            event.name(),
            None,
            ami_ordering_key(event, category),
        ),
    };

    Ok(descriptor)
}

// AMI `Uniqueid` and ARI `channel.id` name the same channel, so both map to one key.
fn channel_ordering_key(event: &Event, category: EventCategory) -> String {
    event
        .payload()
        .get(CHANNEL_OBJECT)
        .and_then(|channel| channel.get(CHANNEL_ID))
        .and_then(Value::as_str)
        .map(|id| format!("channel:{id}"))
        .unwrap_or_else(|| format!("category:{category}"))
}

fn ami_ordering_key(event: &Event, category: EventCategory) -> String {
    event
        .payload()
        .get(AMI_UNIQUE_ID)
        .and_then(Value::as_str)
        .map(|id| format!("channel:{id}"))
        .unwrap_or_else(|| format!("category:{category}"))
}

#[cfg(test)]
mod tests {
    use super::{classify, ClassifyError};
    use crate::config::DuplicateSubscriptionPolicy;
    use crate::control_plane::application_table::{insert_application, ApplicationTable};
    use crate::event::Event;
    use crate::routing::descriptor::RouteKind;
    use serde_json::{json, Map, Value};

    fn table_with(names: &[&str]) -> ApplicationTable {
        let mut table = ApplicationTable::new();
        for name in names {
            insert_application(&mut table, name, DuplicateSubscriptionPolicy::Refresh)
                .expect("subscribe");
        }
        table
    }

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn subscribed_owner_becomes_application_route() {
        let table = table_with(&["MyApp"]);
        let event = Event::stasis_application("MyApp", "StasisStart", Map::new());

        let descriptor = classify(&event, &table).expect("classified");
        assert_eq!(descriptor.kind(), RouteKind::Application);
        assert_eq!(descriptor.application(), Some("MyApp"));
        assert_eq!(descriptor.ordering_key(), "app:MyApp");
        assert_eq!(descriptor.topic().as_deref(), Some("stasis.app.myapp"));
    }

    #[test]
    fn lowercased_owner_is_not_attributed() {
        let table = table_with(&["MyApp"]);
        let event = Event::stasis_application("myapp", "StasisStart", Map::new());

        let descriptor = classify(&event, &table).expect("classified");
        assert_eq!(descriptor.kind(), RouteKind::Application);
        assert_eq!(descriptor.application(), None);
        assert!(!descriptor.is_publishable());
    }

    #[test]
    fn ownerless_stasis_event_is_channel_route_keyed_by_channel_id() {
        let event = Event::stasis_channel(
            "ChannelStateChange",
            payload(json!({"channel": {"id": "1700000000.1"}})),
        );

        let descriptor = classify(&event, &ApplicationTable::new()).expect("classified");
        assert_eq!(descriptor.kind(), RouteKind::Channel);
        assert_eq!(descriptor.ordering_key(), "channel:1700000000.1");
        assert_eq!(
            descriptor.topic().as_deref(),
            Some("stasis.channel.channelstatechange")
        );
    }

    #[test]
    fn ami_event_shares_channel_ordering_key_with_uniqueid() {
        let event = Event::ami("Newchannel", payload(json!({"Uniqueid": "1700000000.1"})));

        let descriptor = classify(&event, &ApplicationTable::new()).expect("classified");
        assert_eq!(descriptor.kind(), RouteKind::Ami);
        assert_eq!(descriptor.ordering_key(), "channel:1700000000.1");
    }

    #[test]
    fn ami_event_without_uniqueid_falls_back_to_category() {
        let event = Event::ami("PeerStatus", Map::new());

        let descriptor = classify(&event, &ApplicationTable::new()).expect("classified");
        assert_eq!(descriptor.ordering_key(), "category:ami");
        assert_eq!(descriptor.topic().as_deref(), Some("ami.peerstatus"));
    }

    #[test]
    fn unknown_category_and_empty_name_are_errors() {
        let table = ApplicationTable::new();

        let unknown = Event::new("cdr", "Record", None, Map::new());
        assert_eq!(
            classify(&unknown, &table),
            Err(ClassifyError::UnknownCategory("cdr".to_string()))
        );

        let nameless = Event::new("ami", "", None, Map::new());
        assert_eq!(classify(&nameless, &table), Err(ClassifyError::MissingName));
    }
}
