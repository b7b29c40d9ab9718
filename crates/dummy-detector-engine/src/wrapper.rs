// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inference wrapper: the boolean/empty-list face of a model backend.
//
// The host surface has no way to carry error detail, so every failure below
// is logged here and then flattened to `false` or an empty `Vec`.

use std::path::Path;

use dummy_detector_core::error::Result;
use dummy_detector_core::{Detection, FrameSize};
use tracing::{debug, info, instrument, warn};

use crate::backend::{FrameView, ModelBackend, ModelPaths, default_backend};

/// Owns a [`ModelBackend`] and exposes `load_model` / `forward`.
pub struct InferenceWrapper {
    backend: Box<dyn ModelBackend>,
}

impl Default for InferenceWrapper {
    fn default() -> Self {
        Self::new(default_backend())
    }
}

impl std::fmt::Debug for InferenceWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceWrapper")
            .field("backend", &self.backend.name())
            .field("ready", &self.backend.is_ready())
            .finish()
    }
}

impl InferenceWrapper {
    pub fn new(backend: Box<dyn ModelBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn is_ready(&self) -> bool {
        self.backend.is_ready()
    }

    /// Load a model pair, returning `true` only if the backend is now ready.
    pub fn load_model(&mut self, param_path: impl AsRef<Path>, bin_path: impl AsRef<Path>) -> bool {
        let paths = ModelPaths::new(param_path.as_ref(), bin_path.as_ref());
        match self.try_load(&paths) {
            Ok(()) => {
                info!(backend = self.backend.name(), "detection model loaded");
                true
            }
            Err(err) => {
                warn!(
                    backend = self.backend.name(),
                    error = %err,
                    "failed to load detection model"
                );
                false
            }
        }
    }

    /// Like [`load_model`](Self::load_model) but keeps the error.
    #[instrument(skip_all, fields(
        param = %paths.param_path.display(),
        bin = %paths.bin_path.display(),
    ))]
    pub fn try_load(&mut self, paths: &ModelPaths) -> Result<()> {
        paths.validate()?;
        self.backend.load(paths)
    }

    /// Run the backend over an RGBA buffer.
    ///
    /// Returns an empty list when no model is loaded, when the buffer does
    /// not match `size`, or when the backend itself fails.
    pub fn forward(&self, pixels: &[u8], size: FrameSize) -> Vec<Detection> {
        if !self.backend.is_ready() {
            debug!(backend = self.backend.name(), "forward skipped, no model loaded");
            return Vec::new();
        }
        let frame = match FrameView::rgba(pixels, size) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(%size, error = %err, "rejecting pixel buffer");
                return Vec::new();
            }
        };
        self.backend.infer(&frame).unwrap_or_else(|err| {
            warn!(backend = self.backend.name(), error = %err, "forward pass failed");
            Vec::new()
        })
    }
}
