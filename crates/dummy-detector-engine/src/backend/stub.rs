// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub backend for builds without a neural-network runtime.
//
// Loading always fails with `BackendUnavailable`; inference returns nothing.

use dummy_detector_core::Detection;
use dummy_detector_core::error::{DetectorError, Result};

use super::{FrameView, ModelBackend, ModelPaths};

/// Backend that never becomes ready.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubBackend;

impl ModelBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn load(&mut self, paths: &ModelPaths) -> Result<()> {
        tracing::warn!(
            param = %paths.param_path.display(),
            bin = %paths.bin_path.display(),
            "ModelBackend::load called on stub backend"
        );
        Err(DetectorError::BackendUnavailable(
            "no neural-network runtime is compiled into this build".into(),
        ))
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn infer(&self, frame: &FrameView<'_>) -> Result<Vec<Detection>> {
        tracing::debug!(size = %frame.size(), "ModelBackend::infer called on stub backend");
        Ok(Vec::new())
    }
}
