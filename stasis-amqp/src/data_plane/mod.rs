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

//! Data-plane layer.
//!
//! Ingress runs synchronously on the caller's task up to the lane hand-off.
//! Everything after the hand-off happens on lane worker threads.

pub(crate) mod body_encoding;
pub(crate) mod egress_pool;
pub(crate) mod egress_worker;
pub(crate) mod ingress;
