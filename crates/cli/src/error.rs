// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tmsync commands.

use thiserror::Error;

/// All possible errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Store(#[from] tm_core::Error),

    #[error("{0}")]
    Sync(#[from] tm_core::SyncError),

    #[error("{0}")]
    Api(#[from] tm_core::sync::ApiError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

/// A specialized Result type for tmsync commands.
pub type CliResult<T> = std::result::Result<T, CliError>;
