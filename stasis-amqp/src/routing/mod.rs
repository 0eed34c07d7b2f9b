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

//! Routing layer.
//!
//! Turns an inbound event into a [`descriptor::RoutingDescriptor`] and decides,
//! per category, whether and where it is published.

pub(crate) mod classifier;
pub mod descriptor;
pub mod filter;
pub mod routing_key;
