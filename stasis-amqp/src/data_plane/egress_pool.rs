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

//! Fixed pool of ordered publisher lanes.

use crate::api::broker::{Broker, OutboundMessage};
use crate::data_plane::egress_worker::{EgressWorker, LaneMessage};
use crate::observability::events;
use futures::future::join_all;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

const COMPONENT: &str = "egress_pool";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("publisher lane {lane} is closed")]
pub struct LaneClosed {
    pub lane: usize,
}

/// One bounded queue and worker per lane. A given ordering key always lands on
/// the same lane.
pub(crate) struct PublisherLanes {
    senders: Vec<mpsc::Sender<LaneMessage>>,
    _workers: Vec<EgressWorker>,
}

impl PublisherLanes {
    pub(crate) fn new(broker: Arc<dyn Broker>, lanes: usize, capacity: usize) -> io::Result<Self> {
        let mut senders = Vec::with_capacity(lanes);
        let mut workers = Vec::with_capacity(lanes);

        for lane in 0..lanes {
            let (tx, rx) = mpsc::channel(capacity);
            workers.push(EgressWorker::spawn(lane, broker.clone(), rx)?);
            senders.push(tx);
            debug!(
                event = events::EGRESS_LANE_CREATE,
                component = COMPONENT,
                lane,
                capacity,
                "publisher lane created"
            );
        }

        Ok(Self {
            senders,
            _workers: workers,
        })
    }

    pub(crate) fn lane_count(&self) -> usize {
        self.senders.len()
    }

    pub(crate) fn lane_for(&self, ordering_key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        ordering_key.hash(&mut hasher);
        (hasher.finish() % self.senders.len() as u64) as usize
    }

    /// Waits for queue capacity rather than dropping.
    pub(crate) async fn enqueue(
        &self,
        ordering_key: &str,
        message: OutboundMessage,
    ) -> Result<usize, LaneClosed> {
        let lane = self.lane_for(ordering_key);
        self.senders[lane]
            .send(LaneMessage::Publish(message))
            .await
            .map_err(|_| {
                warn!(
                    event = events::EGRESS_LANE_CLOSED,
                    component = COMPONENT,
                    lane,
                    "publisher lane closed, message not queued"
                );
                LaneClosed { lane }
            })?;
        Ok(lane)
    }

    /// Resolves once every lane has handled everything queued before this call.
    pub(crate) async fn flush(&self) {
        let barriers = self.senders.iter().enumerate().map(|(lane, sender)| async move {
            let (done_tx, done_rx) = oneshot::channel();
            if sender.send(LaneMessage::Flush(done_tx)).await.is_err() || done_rx.await.is_err() {
                warn!(
                    event = events::EGRESS_LANE_CLOSED,
                    component = COMPONENT,
                    lane,
                    "publisher lane closed during flush"
                );
            }
        });
        join_all(barriers).await;
    }
}
