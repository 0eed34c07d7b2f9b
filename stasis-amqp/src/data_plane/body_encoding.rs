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

//! JSON body encoding and outbound message assembly.

use crate::api::broker::{ExchangeKind, MessageProperties, OutboundMessage};
use crate::event::Event;
use crate::routing::descriptor::RoutingDescriptor;
use crate::routing::filter::PublishTarget;
use serde_json::{json, Value};

const APPLICATION_FIELD: &str = "application";

pub(crate) fn encode_body(
    event: &Event,
    descriptor: &RoutingDescriptor,
    default_eid: &str,
    envelope: bool,
) -> Result<Vec<u8>, serde_json::Error> {
    let mut payload = event.payload().clone();
    if let Some(application) = descriptor.application() {
        payload.insert(
            APPLICATION_FIELD.to_string(),
            Value::String(application.to_string()),
        );
    }

    let body = if envelope {
        json!({
            "event": descriptor.event_name(),
            "eid": event.eid().unwrap_or(default_eid),
            "data": payload,
        })
    } else {
        Value::Object(payload)
    };

    serde_json::to_vec(&body)
}

/// Addresses `body` for `target`. Returns `None` when the descriptor has no topic
/// and the target is a topic exchange.
pub(crate) fn build_outbound(
    descriptor: &RoutingDescriptor,
    target: &PublishTarget,
    body: Vec<u8>,
) -> Option<OutboundMessage> {
    let routing_key = match target.kind {
        ExchangeKind::Headers => String::new(),
        ExchangeKind::Topic => descriptor.topic()?,
    };

    Some(OutboundMessage {
        exchange: target.exchange.clone(),
        exchange_kind: target.kind,
        routing_key,
        headers: descriptor.headers(),
        properties: MessageProperties::default(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::{build_outbound, encode_body};
    use crate::api::broker::ExchangeKind;
    use crate::event::{Event, EventCategory};
    use crate::routing::descriptor::{RouteKind, RoutingDescriptor};
    use crate::routing::filter::PublishTarget;
    use serde_json::{json, Map, Value};

    fn application_descriptor() -> RoutingDescriptor {
        RoutingDescriptor::new(
            RouteKind::Application,
            EventCategory::Stasis,
            "StasisStart",
            Some("A"),
            "app:A".to_string(),
        )
    }

    fn decode(body: &[u8]) -> Value {
        serde_json::from_slice(body).expect("body is json")
    }

    #[test]
    fn application_events_gain_application_field() {
        let mut payload = Map::new();
        payload.insert("type".to_string(), json!("StasisStart"));
        let event = Event::stasis_application("A", "StasisStart", payload);

        let body = encode_body(&event, &application_descriptor(), "00:00:00:00:00:00", false)
            .expect("encoded");
        assert_eq!(
            decode(&body),
            json!({"type": "StasisStart", "application": "A"})
        );
    }

    #[test]
    fn envelope_prefers_event_eid_over_default() {
        let event = Event::stasis_application("A", "StasisStart", Map::new())
            .with_eid("de:ad:be:ef:00:01");

        let body = encode_body(&event, &application_descriptor(), "00:00:00:00:00:00", true)
            .expect("encoded");
        assert_eq!(
            decode(&body),
            json!({
                "event": "StasisStart",
                "eid": "de:ad:be:ef:00:01",
                "data": {"application": "A"},
            })
        );
    }

    #[test]
    fn envelope_falls_back_to_default_eid() {
        let event = Event::ami("Dial", Map::new());
        let descriptor = RoutingDescriptor::new(
            RouteKind::Ami,
            EventCategory::Ami,
            "Dial",
            None,
            "category:ami".to_string(),
        );

        let body = encode_body(&event, &descriptor, "00:00:00:00:00:00", true).expect("encoded");
        assert_eq!(decode(&body)["eid"], json!("00:00:00:00:00:00"));
    }

    #[test]
    fn headers_target_has_empty_routing_key_topic_target_uses_topic() {
        let descriptor = application_descriptor();

        let headers = build_outbound(
            &descriptor,
            &PublishTarget {
                exchange: "amq.headers".to_string(),
                kind: ExchangeKind::Headers,
            },
            b"{}".to_vec(),
        )
        .expect("addressable");
        assert_eq!(headers.routing_key, "");
        assert_eq!(headers.headers.get("application_name").map(String::as_str), Some("A"));

        let topic = build_outbound(
            &descriptor,
            &PublishTarget {
                exchange: "amq.topic".to_string(),
                kind: ExchangeKind::Topic,
            },
            b"{}".to_vec(),
        )
        .expect("addressable");
        assert_eq!(topic.routing_key, "stasis.app.a");
        assert_eq!(topic.headers, headers.headers);
        assert_eq!(topic.properties.delivery_mode, 2);
    }
}
