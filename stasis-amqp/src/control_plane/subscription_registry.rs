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

//! Snapshot-published registry of subscribed applications.

use crate::config::DuplicateSubscriptionPolicy;
use crate::control_plane::application_table::{
    insert_application, remove_application, ApplicationInfo, ApplicationTable, SubscribeOutcome,
    SubscriptionError, UnsubscribeOutcome,
};
use crate::observability::events;
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

const COMPONENT: &str = "subscription_registry";

/// Readers load an immutable table; writers copy, mutate and swap under a mutex.
pub struct SubscriptionRegistry {
    table: ArcSwap<ApplicationTable>,
    write_lock: Mutex<()>,
    duplicate_policy: DuplicateSubscriptionPolicy,
}

impl SubscriptionRegistry {
    pub fn new(duplicate_policy: DuplicateSubscriptionPolicy) -> Self {
        Self {
            table: ArcSwap::from_pointee(ApplicationTable::new()),
            write_lock: Mutex::new(()),
            duplicate_policy,
        }
    }

    pub fn subscribe(&self, name: &str) -> Result<SubscribeOutcome, SubscriptionError> {
        debug!(
            event = events::SUBSCRIBE_START,
            component = COMPONENT,
            application = name,
            "subscribing application"
        );

        let _writer = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut table = ApplicationTable::clone(&self.table.load());

        let outcome = match insert_application(&mut table, name, self.duplicate_policy) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    event = events::SUBSCRIBE_FAILED,
                    component = COMPONENT,
                    application = name,
                    err = %err,
                    "unable to subscribe application"
                );
                return Err(err);
            }
        };
        self.table.store(Arc::new(table));

        match &outcome {
            SubscribeOutcome::Created(application) => info!(
                event = events::SUBSCRIBE_OK,
                component = COMPONENT,
                application = name,
                subscription_id = %application.subscription_id,
                "application subscribed"
            ),
            SubscribeOutcome::Refreshed(application) => info!(
                event = events::SUBSCRIBE_REFRESHED,
                component = COMPONENT,
                application = name,
                subscription_id = %application.subscription_id,
                refresh_count = application.refresh_count,
                "application subscription refreshed"
            ),
        }

        Ok(outcome)
    }

    pub fn unsubscribe(&self, name: &str) -> UnsubscribeOutcome {
        let _writer = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut table = ApplicationTable::clone(&self.table.load());

        let outcome = remove_application(&mut table, name);
        match outcome {
            UnsubscribeOutcome::Removed => {
                self.table.store(Arc::new(table));
                info!(
                    event = events::UNSUBSCRIBE_OK,
                    component = COMPONENT,
                    application = name,
                    "application unsubscribed"
                );
            }
            UnsubscribeOutcome::NotSubscribed => debug!(
                event = events::UNSUBSCRIBE_NOT_FOUND,
                component = COMPONENT,
                application = name,
                "application was not subscribed"
            ),
        }
        outcome
    }

    /// Exact, case-sensitive membership.
    pub fn lookup(&self, name: &str) -> bool {
        self.table.load().contains_key(name)
    }

    pub(crate) fn snapshot(&self) -> Arc<ApplicationTable> {
        self.table.load_full()
    }

    /// Applications sorted by name.
    pub fn list(&self) -> Vec<ApplicationInfo> {
        let mut applications: Vec<ApplicationInfo> =
            self.table.load().values().cloned().collect();
        applications.sort_by(|left, right| left.name.cmp(&right.name));
        applications
    }
}
