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

//! Control-plane layer.
//!
//! Owns application subscription lifecycle semantics. Subscribing is idempotent
//! (refresh) unless the deployment asks for duplicates to be rejected, and
//! unsubscribing an unknown application succeeds without side effects.
//!
//! ```
//! use stasis_amqp::config::DuplicateSubscriptionPolicy;
//! use stasis_amqp::{SubscriptionRegistry, UnsubscribeOutcome};
//!
//! let registry = SubscriptionRegistry::new(DuplicateSubscriptionPolicy::Refresh);
//! registry.subscribe("A").unwrap();
//! registry.subscribe("A").unwrap();
//! assert_eq!(registry.unsubscribe("A"), UnsubscribeOutcome::Removed);
//! assert_eq!(registry.unsubscribe("A"), UnsubscribeOutcome::NotSubscribed);
//! ```

pub(crate) mod application_table;
pub(crate) mod subscription_registry;
