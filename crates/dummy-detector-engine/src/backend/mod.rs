// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Model backend abstraction.
//
// A backend is whatever actually turns pixels into detections: an NCNN
// network, an ONNX session, or nothing at all. The detector only talks to the
// `ModelBackend` trait, so dropping a real runtime in later does not change
// what the host sees from `detectObjects`.

pub mod stub;

use std::path::PathBuf;

use dummy_detector_core::error::{DetectorError, Result};
use dummy_detector_core::{Detection, FrameSize};

pub use stub::StubBackend;

/// Bytes per pixel of the RGBA frames handed over by the camera pipeline.
pub const RGBA_CHANNELS: usize = 4;

/// A pluggable inference capability.
pub trait ModelBackend: Send + Sync {
    /// Short identifier used in logs (e.g. "stub", "ncnn").
    fn name(&self) -> &'static str;

    /// Load the network description and weights.
    fn load(&mut self, paths: &ModelPaths) -> Result<()>;

    /// Whether a model is loaded and `infer` may be called.
    fn is_ready(&self) -> bool;

    /// Run a forward pass over one frame.
    fn infer(&self, frame: &FrameView<'_>) -> Result<Vec<Detection>>;
}

/// The backend compiled into this build.
pub fn default_backend() -> Box<dyn ModelBackend> {
    Box::new(StubBackend)
}

/// The pair of files that make up a model: network structure and weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    /// Network description (NCNN `.param`).
    pub param_path: PathBuf,
    /// Weights blob (NCNN `.bin`).
    pub bin_path: PathBuf,
}

impl ModelPaths {
    pub fn new(param_path: impl Into<PathBuf>, bin_path: impl Into<PathBuf>) -> Self {
        Self {
            param_path: param_path.into(),
            bin_path: bin_path.into(),
        }
    }

    /// Verify that both files exist.
    pub fn validate(&self) -> Result<()> {
        for path in [&self.param_path, &self.bin_path] {
            if !path.is_file() {
                return Err(DetectorError::ModelNotFound(path.clone()));
            }
        }
        Ok(())
    }
}

/// A borrowed RGBA frame, checked against its declared dimensions.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pixels: &'a [u8],
    size: FrameSize,
}

impl<'a> FrameView<'a> {
    /// Wrap an RGBA buffer, rejecting it if the length does not match `size`.
    pub fn rgba(pixels: &'a [u8], size: FrameSize) -> Result<Self> {
        let expected = usize::try_from(size.area())
            .ok()
            .and_then(|area| area.checked_mul(RGBA_CHANNELS))
            .ok_or_else(|| DetectorError::Inference(format!("frame {size} is too large")))?;
        if pixels.len() != expected {
            return Err(DetectorError::InvalidFrame {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { pixels, size })
    }

    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }
}
