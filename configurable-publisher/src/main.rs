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

mod command;
mod stdout_broker;

use crate::command::Command;
use crate::stdout_broker::LineBroker;
use clap::Parser;
use stasis_amqp::config::PublisherConfig;
use stasis_amqp::StasisAmqpBridge;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Publishes engine events read from stdin as broker messages on stdout", long_about = None)]
struct Args {
    /// The path to the configuration file.
    #[arg(short, long, default_value = "DEFAULT_CONFIG.json5")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Stdout carries published messages; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = PublisherConfig::from_file(&args.config)?;
    let bridge = StasisAmqpBridge::new(&config, Arc::new(LineBroker::stdout()))?;
    info!(config = %args.config.display(), "configurable-publisher ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match Command::parse(line) {
                    Ok(command) => command.apply(&bridge).await,
                    Err(err) => warn!(err = %err, "ignoring malformed command"),
                }
            }
            _ = signal::ctrl_c() => {
                info!("received ctrl-c, shutting down");
                break;
            }
        }
    }

    bridge.flush().await;
    bridge.shutdown();
    Ok(())
}
