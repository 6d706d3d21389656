// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tm-endpoint: HTTP listener for inbound TrackMage webhooks.
//!
//! Receives webhook payloads on `POST /webhook`, dispatches them through
//! the core mappers and always answers success. The platform treats
//! webhooks as fire-and-forget, rejections are logged no-ops.

mod server;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tm_core::Settings;

use server::AppState;

/// tm-endpoint: webhook listener for the TrackMage synchronization engine
#[derive(Parser, Debug)]
#[command(name = "tm-endpoint")]
#[command(about = "HTTP listener for inbound TrackMage webhooks")]
struct Args {
    /// Address to bind the listener to
    #[arg(short, long, default_value = "0.0.0.0:8787")]
    bind: SocketAddr,

    /// Path to the settings file
    #[arg(long, default_value = "trackmage.toml")]
    config: PathBuf,

    /// Path to the local shop database
    #[arg(long, default_value = "trackmage.db")]
    db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = Settings::load(&args.config)?;

    info!("Starting tm-endpoint");
    info!("  Bind address: {}", args.bind);
    info!("  Database: {}", args.db.display());

    let state = Arc::new(AppState {
        db_path: args.db,
        settings,
    });

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, server::router(state)).await?;
    Ok(())
}
