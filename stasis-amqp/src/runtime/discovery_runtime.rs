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

//! Periodic registration of applications created on the engine side.

use crate::api::application_source::ApplicationSource;
use crate::control_plane::subscription_registry::SubscriptionRegistry;
use crate::observability::events;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

const COMPONENT: &str = "discovery_runtime";

/// Remembers every name it has seen so an application unsubscribed later is
/// not subscribed again behind the caller's back.
pub(crate) struct ApplicationDiscovery {
    registry: Arc<SubscriptionRegistry>,
    source: Arc<dyn ApplicationSource>,
    seen: HashSet<String>,
}

impl ApplicationDiscovery {
    pub(crate) fn new(registry: Arc<SubscriptionRegistry>, source: Arc<dyn ApplicationSource>) -> Self {
        Self {
            registry,
            source,
            seen: HashSet::new(),
        }
    }

    /// Returns how many applications were subscribed on this tick.
    pub(crate) async fn discover_once(&mut self) -> usize {
        trace!(event = events::DISCOVERY_TICK, component = COMPONENT, "polling applications");

        let applications = match self.source.list_applications().await {
            Ok(applications) => applications,
            Err(err) => {
                warn!(
                    event = events::DISCOVERY_SOURCE_FAILED,
                    component = COMPONENT,
                    err = %err,
                    "unable to list applications, retrying next tick"
                );
                return 0;
            }
        };

        let mut added = 0;
        for name in applications {
            if self.seen.contains(&name) {
                continue;
            }
            if self.registry.lookup(&name) {
                self.seen.insert(name);
                continue;
            }
            // Failures are already logged by the registry; the name is retried
            // on the next tick.
            if self.registry.subscribe(&name).is_ok() {
                info!(
                    event = events::DISCOVERY_APPLICATION_ADDED,
                    component = COMPONENT,
                    application = %name,
                    "subscribed newly discovered application"
                );
                self.seen.insert(name);
                added += 1;
            }
        }
        added
    }
}

/// Polls until `shutdown` flips to `true` or its sender is dropped. Must be
/// called from within a Tokio runtime.
pub(crate) fn spawn_application_discovery(
    mut discovery: ApplicationDiscovery,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    discovery.discover_once().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        debug!(
            event = events::DISCOVERY_STOPPED,
            component = COMPONENT,
            "application discovery stopped"
        );
    })
}
