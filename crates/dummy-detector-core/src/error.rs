// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the Dummy Detector.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all detector operations.
///
/// None of these ever reach the embedding runtime directly: the bridge
/// flattens them into `false` or an empty detection list after logging.
#[derive(Debug, Error)]
pub enum DetectorError {
    // -- Model backend --
    #[error("model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("model backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    InvalidFrame { expected: usize, actual: usize },

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Host bridge --
    #[error("host bridge error: {0}")]
    Bridge(String),

    #[error("no host function named `{0}` is registered")]
    UnknownFunction(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DetectorError>;
