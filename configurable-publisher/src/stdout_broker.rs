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

use async_trait::async_trait;
use stasis_amqp::{Broker, BrokerError, OutboundMessage};
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

/// Writes every published message as one JSON line.
pub(crate) struct LineBroker<W> {
    writer: Mutex<W>,
}

impl LineBroker<Stdout> {
    pub(crate) fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> LineBroker<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> Broker for LineBroker<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn publish(&self, message: OutboundMessage) -> Result<(), BrokerError> {
        let mut line = serde_json::to_vec(&message).map_err(|err| BrokerError::Rejected {
            exchange: message.exchange.clone(),
            reason: err.to_string(),
        })?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer
            .write_all(&line)
            .await
            .map_err(|err| BrokerError::Unavailable(err.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|err| BrokerError::Unavailable(err.to_string()))
    }
}
