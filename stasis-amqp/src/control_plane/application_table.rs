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

//! Application table transitions for the control plane.

use crate::config::DuplicateSubscriptionPolicy;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("no application specified")]
    InvalidApplicationName,
    #[error("application '{0}' is already subscribed")]
    DuplicateSubscription(String),
    #[error("application '{requested}' differs only by case from subscribed application '{existing}'")]
    CaseConflict { requested: String, existing: String },
}

/// One active stasis application subscription.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationInfo {
    pub name: String,
    pub subscription_id: Uuid,
    pub refresh_count: u64,
}

impl ApplicationInfo {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscription_id: Uuid::new_v4(),
            refresh_count: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Created(ApplicationInfo),
    Refreshed(ApplicationInfo),
}

impl SubscribeOutcome {
    pub fn application(&self) -> &ApplicationInfo {
        match self {
            SubscribeOutcome::Created(info) | SubscribeOutcome::Refreshed(info) => info,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsubscribeOutcome {
    Removed,
    NotSubscribed,
}

pub(crate) type ApplicationTable = HashMap<String, ApplicationInfo>;

pub(crate) fn validate_application_name(name: &str) -> Result<(), SubscriptionError> {
    if name.trim().is_empty() {
        return Err(SubscriptionError::InvalidApplicationName);
    }
    Ok(())
}

/// Another active name that lowercases to the same topic segment, if any.
pub(crate) fn find_case_conflict<'a>(table: &'a ApplicationTable, name: &str) -> Option<&'a str> {
    table
        .keys()
        .find(|existing| existing.as_str() != name && existing.to_lowercase() == name.to_lowercase())
        .map(String::as_str)
}

pub(crate) fn insert_application(
    table: &mut ApplicationTable,
    name: &str,
    duplicate_policy: DuplicateSubscriptionPolicy,
) -> Result<SubscribeOutcome, SubscriptionError> {
    validate_application_name(name)?;

    if let Some(existing) = find_case_conflict(table, name) {
        return Err(SubscriptionError::CaseConflict {
            requested: name.to_string(),
            existing: existing.to_string(),
        });
    }

    if let Some(info) = table.get_mut(name) {
        return match duplicate_policy {
            DuplicateSubscriptionPolicy::Reject => {
                Err(SubscriptionError::DuplicateSubscription(name.to_string()))
            }
            DuplicateSubscriptionPolicy::Refresh => {
                info.subscription_id = Uuid::new_v4();
                info.refresh_count += 1;
                Ok(SubscribeOutcome::Refreshed(info.clone()))
            }
        };
    }

    let info = ApplicationInfo::new(name);
    table.insert(name.to_string(), info.clone());
    Ok(SubscribeOutcome::Created(info))
}

pub(crate) fn remove_application(table: &mut ApplicationTable, name: &str) -> UnsubscribeOutcome {
    match table.remove(name) {
        Some(_) => UnsubscribeOutcome::Removed,
        None => UnsubscribeOutcome::NotSubscribed,
    }
}
