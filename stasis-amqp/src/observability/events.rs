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

//! Canonical structured event names used across `stasis-amqp`.

// Egress worker and lane events.
pub const EGRESS_SEND_ATTEMPT: &str = "egress_send_attempt";
pub const EGRESS_SEND_OK: &str = "egress_send_ok";
pub const EGRESS_SEND_FAILED: &str = "egress_send_failed";
pub const EGRESS_RECV_CLOSED: &str = "egress_recv_closed";
pub const EGRESS_LANE_CREATE: &str = "egress_lane_create";
pub const EGRESS_LANE_FLUSH: &str = "egress_lane_flush";
pub const EGRESS_LANE_CLOSED: &str = "egress_lane_closed";

// Ingress, classification and filtering events.
pub const INGRESS_RECEIVE: &str = "ingress_receive";
pub const INGRESS_DROP_UNCLASSIFIED: &str = "ingress_drop_unclassified";
pub const INGRESS_DROP_UNATTRIBUTED: &str = "ingress_drop_unattributed";
pub const INGRESS_DROP_FILTERED: &str = "ingress_drop_filtered";
pub const INGRESS_DROP_ENCODE_FAILED: &str = "ingress_drop_encode_failed";
pub const INGRESS_ENQUEUED: &str = "ingress_enqueued";

// Control-plane lifecycle events.
pub const SUBSCRIBE_START: &str = "subscribe_start";
pub const SUBSCRIBE_OK: &str = "subscribe_ok";
pub const SUBSCRIBE_REFRESHED: &str = "subscribe_refreshed";
pub const SUBSCRIBE_FAILED: &str = "subscribe_failed";
pub const UNSUBSCRIBE_OK: &str = "unsubscribe_ok";
pub const UNSUBSCRIBE_NOT_FOUND: &str = "unsubscribe_not_found";

// Runtime events.
pub const RUNTIME_SPAWN_START: &str = "runtime_spawn_start";
pub const RUNTIME_SPAWN_OK: &str = "runtime_spawn_ok";
pub const RUNTIME_SPAWN_FAILED: &str = "runtime_spawn_failed";
pub const DISCOVERY_TICK: &str = "discovery_tick";
pub const DISCOVERY_SOURCE_FAILED: &str = "discovery_source_failed";
pub const DISCOVERY_APPLICATION_ADDED: &str = "discovery_application_added";
pub const DISCOVERY_STOPPED: &str = "discovery_stopped";

// Configuration events.
pub const CONFIG_LOADED: &str = "config_loaded";
pub const CONFIG_REJECTED: &str = "config_rejected";
