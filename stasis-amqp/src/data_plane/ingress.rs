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

//! Ingress pipeline: classify, filter, encode and hand off to a publisher lane.

use crate::control_plane::subscription_registry::SubscriptionRegistry;
use crate::data_plane::body_encoding::{build_outbound, encode_body};
use crate::data_plane::egress_pool::PublisherLanes;
use crate::event::Event;
use crate::observability::{events, fields};
use crate::routing::classifier::classify;
use crate::routing::filter::{DropReason, FilterDecision, FilterEngine};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

const COMPONENT: &str = "ingress";

/// What happened to one dispatched event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handed to the publisher lane with this index.
    Enqueued { lane: usize },
    /// Unknown category or missing event name.
    Unclassified,
    /// Application event whose owner is not subscribed under that exact name.
    Unattributed,
    Filtered(DropReason),
    EncodeFailed,
    PublisherClosed,
}

impl DispatchOutcome {
    pub fn is_enqueued(&self) -> bool {
        matches!(self, DispatchOutcome::Enqueued { .. })
    }
}

pub(crate) struct IngressDispatcher {
    registry: Arc<SubscriptionRegistry>,
    filter: FilterEngine,
    lanes: PublisherLanes,
    default_eid: String,
    envelope: bool,
}

impl IngressDispatcher {
    pub(crate) fn new(
        registry: Arc<SubscriptionRegistry>,
        filter: FilterEngine,
        lanes: PublisherLanes,
        default_eid: String,
        envelope: bool,
    ) -> Self {
        Self {
            registry,
            filter,
            lanes,
            default_eid,
            envelope,
        }
    }

    pub(crate) fn lanes(&self) -> &PublisherLanes {
        &self.lanes
    }

    pub(crate) async fn dispatch(&self, event: Event) -> DispatchOutcome {
        trace!(
            event = events::INGRESS_RECEIVE,
            component = COMPONENT,
            category = event.category(),
            name = event.name(),
            application = fields::format_optional(event.application()),
            "received event"
        );

        let applications = self.registry.snapshot();
        let descriptor = match classify(&event, &applications) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                warn!(
                    event = events::INGRESS_DROP_UNCLASSIFIED,
                    component = COMPONENT,
                    category = event.category(),
                    name = event.name(),
                    err = %err,
                    "dropping event that could not be classified"
                );
                return DispatchOutcome::Unclassified;
            }
        };

        if !descriptor.is_publishable() {
            debug!(
                event = events::INGRESS_DROP_UNATTRIBUTED,
                component = COMPONENT,
                name = event.name(),
                application = fields::format_optional(event.application()),
                "dropping event for an application that is not subscribed"
            );
            return DispatchOutcome::Unattributed;
        }

        let target = match self.filter.decide(descriptor.category(), descriptor.event_name()) {
            FilterDecision::Publish(target) => target,
            FilterDecision::Drop(reason) => {
                debug!(
                    event = events::INGRESS_DROP_FILTERED,
                    component = COMPONENT,
                    descriptor = %fields::format_descriptor(&descriptor),
                    reason = %reason,
                    "dropping filtered event"
                );
                return DispatchOutcome::Filtered(reason);
            }
        };

        let body = match encode_body(&event, &descriptor, &self.default_eid, self.envelope) {
            Ok(body) => body,
            Err(err) => {
                error!(
                    event = events::INGRESS_DROP_ENCODE_FAILED,
                    component = COMPONENT,
                    descriptor = %fields::format_descriptor(&descriptor),
                    err = %err,
                    "unable to encode event body"
                );
                return DispatchOutcome::EncodeFailed;
            }
        };

        let Some(message) = build_outbound(&descriptor, target, body) else {
            // Publishable descriptors always carry a topic.
            return DispatchOutcome::Unattributed;
        };

        match self.lanes.enqueue(descriptor.ordering_key(), message).await {
            Ok(lane) => {
                trace!(
                    event = events::INGRESS_ENQUEUED,
                    component = COMPONENT,
                    descriptor = %fields::format_descriptor(&descriptor),
                    lane,
                    "event enqueued for publishing"
                );
                DispatchOutcome::Enqueued { lane }
            }
            Err(_) => DispatchOutcome::PublisherClosed,
        }
    }
}
