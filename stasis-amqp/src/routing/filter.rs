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

//! Per-category publication policy and event-name filtering.
//!
//! Policies are resolved once from configuration. Deciding what happens to an
//! event is a single lookup followed by a set membership test.

use crate::api::broker::ExchangeKind;
use crate::event::EventCategory;
use std::collections::{HashMap, HashSet};
use strum::Display;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishTarget {
    pub exchange: String,
    pub kind: ExchangeKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Publication {
    Disabled,
    Enabled(PublishTarget),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventFilter {
    All,
    Allow(HashSet<String>),
    Deny(HashSet<String>),
}

impl EventFilter {
    /// Event names compare exactly; `Dial` does not match `dial`.
    pub fn admits(&self, event_name: &str) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Allow(names) => names.contains(event_name),
            EventFilter::Deny(names) => !names.contains(event_name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryPolicy {
    pub publication: Publication,
    pub events: EventFilter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum DropReason {
    CategoryDisabled,
    NotAllowed,
    Denied,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FilterDecision<'a> {
    Publish(&'a PublishTarget),
    Drop(DropReason),
}

pub struct FilterEngine {
    policies: HashMap<EventCategory, CategoryPolicy>,
}

impl FilterEngine {
    pub fn new(policies: HashMap<EventCategory, CategoryPolicy>) -> Self {
        Self { policies }
    }

    pub fn policy(&self, category: EventCategory) -> Option<&CategoryPolicy> {
        self.policies.get(&category)
    }

    pub fn decide(&self, category: EventCategory, event_name: &str) -> FilterDecision<'_> {
        let Some(policy) = self.policies.get(&category) else {
            return FilterDecision::Drop(DropReason::CategoryDisabled);
        };

        let target = match &policy.publication {
            Publication::Disabled => return FilterDecision::Drop(DropReason::CategoryDisabled),
            Publication::Enabled(target) => target,
        };

        match &policy.events {
            filter @ EventFilter::Allow(_) if !filter.admits(event_name) => {
                FilterDecision::Drop(DropReason::NotAllowed)
            }
            filter @ EventFilter::Deny(_) if !filter.admits(event_name) => {
                FilterDecision::Drop(DropReason::Denied)
            }
            _ => FilterDecision::Publish(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CategoryPolicy, DropReason, EventFilter, FilterDecision, FilterEngine, Publication,
        PublishTarget,
    };
    use crate::api::broker::ExchangeKind;
    use crate::event::EventCategory;
    use std::collections::{HashMap, HashSet};

    fn names(list: &[&str]) -> HashSet<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    fn headers_target() -> PublishTarget {
        PublishTarget {
            exchange: "amq.headers".to_string(),
            kind: ExchangeKind::Headers,
        }
    }

    fn engine(stasis: CategoryPolicy, ami: CategoryPolicy) -> FilterEngine {
        FilterEngine::new(HashMap::from([
            (EventCategory::Stasis, stasis),
            (EventCategory::Ami, ami),
        ]))
    }

    #[test]
    fn disabled_category_drops_everything() {
        let engine = engine(
            CategoryPolicy {
                publication: Publication::Enabled(headers_target()),
                events: EventFilter::All,
            },
            CategoryPolicy {
                publication: Publication::Disabled,
                events: EventFilter::All,
            },
        );

        assert_eq!(
            engine.decide(EventCategory::Ami, "DeviceStateChange"),
            FilterDecision::Drop(DropReason::CategoryDisabled)
        );
        assert_eq!(
            engine.decide(EventCategory::Stasis, "StasisStart"),
            FilterDecision::Publish(&headers_target())
        );
    }

    #[test]
    fn deny_list_excludes_named_events_only() {
        let engine = engine(
            CategoryPolicy {
                publication: Publication::Enabled(headers_target()),
                events: EventFilter::Deny(names(&["ChannelDialplan", "ChannelStateChange"])),
            },
            CategoryPolicy {
                publication: Publication::Enabled(headers_target()),
                events: EventFilter::All,
            },
        );

        assert_eq!(
            engine.decide(EventCategory::Stasis, "ChannelDialplan"),
            FilterDecision::Drop(DropReason::Denied)
        );
        assert_eq!(
            engine.decide(EventCategory::Stasis, "ChannelStateChange"),
            FilterDecision::Drop(DropReason::Denied)
        );
        assert!(matches!(
            engine.decide(EventCategory::Stasis, "StasisStart"),
            FilterDecision::Publish(_)
        ));
    }

    #[test]
    fn allow_list_admits_listed_events_exactly() {
        let engine = engine(
            CategoryPolicy {
                publication: Publication::Enabled(headers_target()),
                events: EventFilter::Allow(names(&["ChannelHangupRequest"])),
            },
            CategoryPolicy {
                publication: Publication::Disabled,
                events: EventFilter::All,
            },
        );

        assert!(matches!(
            engine.decide(EventCategory::Stasis, "ChannelHangupRequest"),
            FilterDecision::Publish(_)
        ));
        assert_eq!(
            engine.decide(EventCategory::Stasis, "Dial"),
            FilterDecision::Drop(DropReason::NotAllowed)
        );
        assert_eq!(
            engine.decide(EventCategory::Stasis, "channelhanguprequest"),
            FilterDecision::Drop(DropReason::NotAllowed)
        );
    }

    #[test]
    fn missing_policy_is_treated_as_disabled() {
        let engine = FilterEngine::new(HashMap::new());
        assert_eq!(
            engine.decide(EventCategory::Stasis, "StasisStart"),
            FilterDecision::Drop(DropReason::CategoryDisabled)
        );
    }
}
