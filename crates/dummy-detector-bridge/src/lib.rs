// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Dummy Detector — host runtime bridge.
//!
//! The embedding JavaScript runtime sees two global functions,
//! `detectObjects` and `loadDetectionModel`. This crate defines the value
//! model those functions exchange ([`value::HostValue`]), the registration
//! seam ([`traits::HostRuntime`]) and the `install` step that wires them to a
//! shared [`Detector`]. Native hosts reach it through the C ABI in [`ffi`]
//! or, on Android, through the JNI entry points in `android`.

pub mod ffi;
pub mod install;
pub mod stub;
pub mod traits;
pub mod value;

#[cfg(target_os = "android")]
pub mod android;

use std::sync::{Arc, OnceLock};

use dummy_detector_core::DetectorConfig;
use dummy_detector_engine::Detector;

pub use install::install;
pub use stub::StubRuntime;
pub use traits::{HostFunction, HostRuntime};
pub use value::HostValue;

static SHARED_DETECTOR: OnceLock<Arc<Detector>> = OnceLock::new();

/// Retrieves the process-wide detector used by the C ABI and JNI surfaces.
///
/// Created on first use from `DUMMY_DETECTOR_CONFIG` (see
/// [`DetectorConfig::from_env`]). A broken config file is logged and the
/// defaults are used instead, since the host has no channel to report it.
pub fn shared_detector() -> Arc<Detector> {
    SHARED_DETECTOR
        .get_or_init(|| {
            let detector = DetectorConfig::from_env()
                .and_then(Detector::new)
                .unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "detector config rejected, using defaults");
                    Detector::default()
                });
            Arc::new(detector)
        })
        .clone()
}

/// Install a `tracing` subscriber unless the host already set one.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
