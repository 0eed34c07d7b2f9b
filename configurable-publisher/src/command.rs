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

//! Newline-delimited JSON commands read from stdin.

use serde::Deserialize;
use stasis_amqp::event::{ami, Event};
use stasis_amqp::StasisAmqpBridge;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase", deny_unknown_fields)]
pub(crate) enum Command {
    Subscribe {
        application: String,
    },
    Unsubscribe {
        application: String,
    },
    Event {
        event: Event,
    },
    /// A raw manager event as `Key: Value` lines.
    Ami {
        name: String,
        fields: String,
        #[serde(default)]
        eid: Option<String>,
    },
    Flush,
}

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    pub(crate) async fn apply(self, bridge: &StasisAmqpBridge) {
        match self {
            Command::Subscribe { application } => match bridge.subscribe(&application) {
                Ok(outcome) => info!(
                    application = %application,
                    subscription_id = %outcome.application().subscription_id,
                    "subscribed"
                ),
                Err(err) => warn!(application = %application, err = %err, "subscribe rejected"),
            },
            Command::Unsubscribe { application } => {
                let outcome = bridge.unsubscribe(&application);
                info!(application = %application, outcome = ?outcome, "unsubscribed");
            }
            Command::Event { event } => {
                let outcome = bridge.dispatch(event).await;
                debug!(outcome = ?outcome, "event dispatched");
            }
            Command::Ami { name, fields, eid } => {
                let event = ami::event_from_manager_blob(&name, &fields, eid.as_deref());
                let outcome = bridge.dispatch(event).await;
                debug!(outcome = ?outcome, "manager event dispatched");
            }
            Command::Flush => bridge.flush().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Command;

    #[test]
    fn parses_every_operation() {
        assert!(matches!(
            Command::parse(r#"{"op":"subscribe","application":"A"}"#),
            Ok(Command::Subscribe { application }) if application == "A"
        ));
        assert!(matches!(
            Command::parse(r#"{"op":"unsubscribe","application":"A"}"#),
            Ok(Command::Unsubscribe { .. })
        ));
        assert!(matches!(
            Command::parse(r#"{"op":"flush"}"#),
            Ok(Command::Flush)
        ));
        assert!(matches!(
            Command::parse(r#"{"op":"ami","name":"Dial","fields":"Uniqueid: 1.1"}"#),
            Ok(Command::Ami { eid: None, .. })
        ));

        match Command::parse(
            r#"{"op":"event","event":{"category":"stasis","name":"StasisStart","application":"A","payload":{"type":"StasisStart"}}}"#,
        ) {
            Ok(Command::Event { event }) => {
                assert_eq!(event.category(), "stasis");
                assert_eq!(event.application(), Some("A"));
            }
            other => panic!("expected event command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_operations_and_fields() {
        assert!(Command::parse(r#"{"op":"restart"}"#).is_err());
        assert!(Command::parse(r#"{"op":"subscribe","application":"A","extra":1}"#).is_err());
        assert!(Command::parse("not json").is_err());
    }
}
