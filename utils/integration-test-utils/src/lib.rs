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

//! Test support for `stasis-amqp`: an in-memory broker with AMQP binding
//! semantics, per-binding accumulators and a polling wait helper.

mod accumulator;
mod in_memory_broker;
mod logging;
mod topic_match;
mod wait;

pub use accumulator::Accumulator;
pub use in_memory_broker::{Binding, InMemoryBroker, XMatch};
pub use logging::init_logging;
pub use topic_match::topic_matches;
pub use wait::until;
