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

//! Outward facade tying the registry, routing and publisher lanes together.

use crate::api::application_source::ApplicationSource;
use crate::api::broker::Broker;
use crate::config::{ConfigError, PublisherConfig, ResolvedConfig};
use crate::control_plane::application_table::{
    ApplicationInfo, SubscribeOutcome, SubscriptionError, UnsubscribeOutcome,
};
use crate::control_plane::subscription_registry::SubscriptionRegistry;
use crate::data_plane::egress_pool::PublisherLanes;
use crate::data_plane::ingress::{DispatchOutcome, IngressDispatcher};
use crate::event::Event;
use crate::observability::events;
use crate::routing::filter::FilterEngine;
use crate::runtime::discovery_runtime::{spawn_application_discovery, ApplicationDiscovery};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

const COMPONENT: &str = "bridge";

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unable to start publisher lanes: {0}")]
    Runtime(#[source] io::Error),
}

/// Routes engine events to the broker on behalf of subscribed applications.
///
/// Dropping the bridge closes every publisher lane and stops application
/// discovery. Call [`StasisAmqpBridge::flush`] first to wait for queued messages.
pub struct StasisAmqpBridge {
    config: ResolvedConfig,
    registry: Arc<SubscriptionRegistry>,
    ingress: IngressDispatcher,
    shutdown: watch::Sender<bool>,
}

impl StasisAmqpBridge {
    pub fn new(config: &PublisherConfig, broker: Arc<dyn Broker>) -> Result<Self, BridgeError> {
        let resolved = config.resolve().map_err(|err| {
            error!(
                event = events::CONFIG_REJECTED,
                component = COMPONENT,
                err = %err,
                "configuration rejected"
            );
            err
        })?;
        Self::from_resolved(resolved, broker)
    }

    pub fn from_resolved(config: ResolvedConfig, broker: Arc<dyn Broker>) -> Result<Self, BridgeError> {
        if let Err(err) = config.check_lane_limits() {
            error!(
                event = events::CONFIG_REJECTED,
                component = COMPONENT,
                err = %err,
                "configuration rejected"
            );
            return Err(err.into());
        }
        let registry = Arc::new(SubscriptionRegistry::new(config.duplicate_subscription));
        let lanes = PublisherLanes::new(broker, config.publisher_lanes, config.queue_capacity)
            .map_err(BridgeError::Runtime)?;
        let lane_count = lanes.lane_count();
        let ingress = IngressDispatcher::new(
            registry.clone(),
            FilterEngine::new(config.policies.clone()),
            lanes,
            config.eid.clone(),
            config.envelope,
        );
        let (shutdown, _) = watch::channel(false);

        info!(
            event = events::CONFIG_LOADED,
            component = COMPONENT,
            connection = %config.connection,
            queue = %config.queue,
            lanes = lane_count,
            envelope = config.envelope,
            "bridge started"
        );

        Ok(Self {
            config,
            registry,
            ingress,
            shutdown,
        })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
        &self.registry
    }

    pub fn subscribe(&self, application: &str) -> Result<SubscribeOutcome, SubscriptionError> {
        self.registry.subscribe(application)
    }

    pub fn unsubscribe(&self, application: &str) -> UnsubscribeOutcome {
        self.registry.unsubscribe(application)
    }

    pub fn is_subscribed(&self, application: &str) -> bool {
        self.registry.lookup(application)
    }

    pub fn applications(&self) -> Vec<ApplicationInfo> {
        self.registry.list()
    }

    /// Classifies, filters and queues one event. Never fails: every drop is
    /// reported through the outcome and logged.
    pub async fn dispatch(&self, event: Event) -> DispatchOutcome {
        self.ingress.dispatch(event).await
    }

    /// Waits until everything dispatched before this call has been handed to the
    /// broker.
    pub async fn flush(&self) {
        self.ingress.lanes().flush().await
    }

    /// Starts polling `source` every `interval`. Must be called from within a
    /// Tokio runtime. The loop ends on [`StasisAmqpBridge::shutdown`] or when the
    /// bridge is dropped.
    pub fn start_application_discovery(
        &self,
        source: Arc<dyn ApplicationSource>,
        interval: Duration,
    ) -> JoinHandle<()> {
        spawn_application_discovery(
            ApplicationDiscovery::new(self.registry.clone(), source),
            interval,
            self.shutdown.subscribe(),
        )
    }

    /// Uses the configured `discovery_interval_ms`; `None` when it is unset.
    pub fn start_configured_discovery(
        &self,
        source: Arc<dyn ApplicationSource>,
    ) -> Option<JoinHandle<()>> {
        self.config
            .discovery_interval
            .map(|interval| self.start_application_discovery(source, interval))
    }

    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use super::{BridgeError, StasisAmqpBridge};
    use crate::api::broker::{Broker, BrokerError, OutboundMessage};
    use crate::config::{ConfigError, PublisherConfig};
    use crate::control_plane::application_table::UnsubscribeOutcome;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NoopBroker;

    #[async_trait]
    impl Broker for NoopBroker {
        async fn publish(&self, _message: OutboundMessage) -> Result<(), BrokerError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn invalid_configuration_is_fatal() {
        let config = PublisherConfig {
            publisher_lanes: 0,
            ..Default::default()
        };
        let result = StasisAmqpBridge::new(&config, Arc::new(NoopBroker));
        assert!(matches!(
            result,
            Err(BridgeError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[tokio::test]
    async fn hand_built_lane_limits_are_fatal() {
        let resolved = PublisherConfig::default().resolve().expect("defaults resolve");

        let mut no_capacity = resolved.clone();
        no_capacity.queue_capacity = 0;
        assert!(matches!(
            StasisAmqpBridge::from_resolved(no_capacity, Arc::new(NoopBroker)),
            Err(BridgeError::Config(ConfigError::InvalidValue { field, .. })) if field == "queue_capacity"
        ));

        let mut no_lanes = resolved;
        no_lanes.publisher_lanes = 0;
        assert!(matches!(
            StasisAmqpBridge::from_resolved(no_lanes, Arc::new(NoopBroker)),
            Err(BridgeError::Config(ConfigError::InvalidValue { field, .. })) if field == "publisher_lanes"
        ));
    }

    #[tokio::test]
    async fn subscription_facade_round_trips() {
        let bridge =
            StasisAmqpBridge::new(&PublisherConfig::default(), Arc::new(NoopBroker)).expect("bridge");

        bridge.subscribe("A").expect("subscribe");
        assert!(bridge.is_subscribed("A"));
        assert_eq!(bridge.applications().len(), 1);
        assert_eq!(bridge.unsubscribe("A"), UnsubscribeOutcome::Removed);
        assert!(bridge.applications().is_empty());
    }

    #[tokio::test]
    async fn configured_discovery_is_off_by_default() {
        struct EmptySource;

        #[async_trait]
        impl crate::api::application_source::ApplicationSource for EmptySource {
            async fn list_applications(
                &self,
            ) -> Result<Vec<String>, crate::api::application_source::ApplicationSourceError>
            {
                Ok(Vec::new())
            }
        }

        let bridge =
            StasisAmqpBridge::new(&PublisherConfig::default(), Arc::new(NoopBroker)).expect("bridge");
        assert!(bridge.start_configured_discovery(Arc::new(EmptySource)).is_none());
    }
}
