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

//! Adapter from manager (AMI) event blobs to [`Event`]s.
//!
//! The engine hands manager events over as an event name plus a block of
//! `Key: Value` lines. The JSON payload keeps the AMI spelling of every key and
//! adds an `Event` entry carrying the event name.

use crate::event::Event;
use serde_json::{Map, Value};
use tracing::trace;

const FIELD_SEPARATOR: &str = ": ";
const EVENT_KEY: &str = "Event";

pub fn parse_manager_fields(event_name: &str, fields: &str) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert(EVENT_KEY.to_string(), Value::String(event_name.to_string()));

    for line in fields.split(['\r', '\n']) {
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(FIELD_SEPARATOR) else {
            trace!(line, "skipping manager field without separator");
            continue;
        };
        // Later duplicates win, but the event name is authoritative.
        if key == EVENT_KEY {
            continue;
        }
        payload.insert(key.to_string(), Value::String(value.to_string()));
    }

    payload
}

pub fn event_from_manager_blob(event_name: &str, fields: &str, eid: Option<&str>) -> Event {
    let event = Event::ami(event_name, parse_manager_fields(event_name, fields));
    match eid {
        Some(eid) => event.with_eid(eid),
        None => event,
    }
}
