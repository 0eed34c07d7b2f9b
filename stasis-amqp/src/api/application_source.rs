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

//! Host-engine contract for listing the stasis applications it knows about.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("unable to list stasis applications: {0}")]
pub struct ApplicationSourceError(pub String);

#[async_trait]
pub trait ApplicationSource: Send + Sync {
    async fn list_applications(&self) -> Result<Vec<String>, ApplicationSourceError>;
}
