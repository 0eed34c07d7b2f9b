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

//! Lane worker that publishes queued messages on the broker in order.

use crate::api::broker::{Broker, OutboundMessage};
use crate::observability::{events, fields};
use crate::runtime::worker_runtime::spawn_publishing_loop;
use std::io;
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

const COMPONENT: &str = "egress_worker";

pub(crate) enum LaneMessage {
    Publish(OutboundMessage),
    /// Completed once every message queued ahead of it has been handled.
    Flush(oneshot::Sender<()>),
}

pub(crate) struct EgressWorker {
    _thread: JoinHandle<()>,
}

impl EgressWorker {
    pub(crate) fn spawn(
        lane: usize,
        broker: Arc<dyn Broker>,
        receiver: mpsc::Receiver<LaneMessage>,
    ) -> io::Result<Self> {
        let thread = spawn_publishing_loop(
            format!("stasis-amqp-lane-{lane}"),
            broker,
            receiver,
            move |broker, receiver| async move {
                Self::publishing_loop(lane, broker, receiver).await;
            },
        )?;

        Ok(Self { _thread: thread })
    }

    pub(crate) async fn publishing_loop(
        lane: usize,
        broker: Arc<dyn Broker>,
        mut receiver: mpsc::Receiver<LaneMessage>,
    ) {
        while let Some(message) = receiver.recv().await {
            match message {
                LaneMessage::Publish(message) => publish_one(lane, broker.as_ref(), message).await,
                LaneMessage::Flush(done) => {
                    debug!(
                        event = events::EGRESS_LANE_FLUSH,
                        component = COMPONENT,
                        lane,
                        "lane drained up to flush barrier"
                    );
                    // The flusher may have given up waiting.
                    let _ = done.send(());
                }
            }
        }

        info!(
            event = events::EGRESS_RECV_CLOSED,
            component = COMPONENT,
            lane,
            "lane closed, publishing loop exiting"
        );
    }
}

async fn publish_one(lane: usize, broker: &dyn Broker, message: OutboundMessage) {
    let destination = fields::format_destination(&message);
    let headers = fields::format_headers(&message.headers);

    debug!(
        event = events::EGRESS_SEND_ATTEMPT,
        component = COMPONENT,
        lane,
        destination = %destination,
        headers = %headers,
        "attempting publish"
    );

    match broker.publish(message).await {
        Ok(()) => debug!(
            event = events::EGRESS_SEND_OK,
            component = COMPONENT,
            lane,
            destination = %destination,
            "publish succeeded"
        ),
        Err(err) => warn!(
            event = events::EGRESS_SEND_FAILED,
            component = COMPONENT,
            lane,
            destination = %destination,
            headers = %headers,
            err = %err,
            "publish failed"
        ),
    }
}
