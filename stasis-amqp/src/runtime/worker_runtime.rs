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

//! Runtime helper for spawning lane publishing loops.

use crate::api::broker::Broker;
use crate::observability::events;
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio::runtime::Builder;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error};

const COMPONENT: &str = "worker_runtime";

/// Runs `run_loop` to completion on a dedicated thread with its own
/// current-thread runtime.
pub(crate) fn spawn_publishing_loop<M, F, Fut>(
    thread_name: String,
    broker: Arc<dyn Broker>,
    receiver: Receiver<M>,
    run_loop: F,
) -> io::Result<JoinHandle<()>>
where
    M: Send + 'static,
    F: FnOnce(Arc<dyn Broker>, Receiver<M>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    debug!(
        event = events::RUNTIME_SPAWN_START,
        component = COMPONENT,
        thread_name = %thread_name,
        "spawning publishing loop"
    );

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| {
            error!(
                event = events::RUNTIME_SPAWN_FAILED,
                component = COMPONENT,
                thread_name = %thread_name,
                err = %err,
                "unable to build worker runtime"
            );
            err
        })?;

    let handle = thread::Builder::new()
        .name(thread_name.clone())
        .spawn(move || {
            runtime.block_on(run_loop(broker, receiver));
        })
        .map_err(|err| {
            error!(
                event = events::RUNTIME_SPAWN_FAILED,
                component = COMPONENT,
                thread_name = %thread_name,
                err = %err,
                "unable to spawn worker thread"
            );
            err
        })?;

    debug!(
        event = events::RUNTIME_SPAWN_OK,
        component = COMPONENT,
        thread_name = %thread_name,
        "publishing loop spawned"
    );
    Ok(handle)
}
