// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The detector behind `detectObjects` / `loadDetectionModel`.

use std::path::Path;
use std::sync::{PoisonError, RwLock};

use dummy_detector_core::error::Result;
use dummy_detector_core::{Detection, DetectorConfig, FrameSize};
use tracing::{debug, trace};

use crate::backend::ModelBackend;
use crate::toy::toy_detections;
use crate::wrapper::InferenceWrapper;

/// Composes the synthetic detector with an optional model backend.
///
/// Shared across host threads: detection only takes a read lock, loading a
/// model takes the write lock.
#[derive(Debug)]
pub struct Detector {
    config: DetectorConfig,
    wrapper: RwLock<InferenceWrapper>,
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            config: DetectorConfig::default(),
            wrapper: RwLock::new(InferenceWrapper::default()),
        }
    }
}

impl Detector {
    /// Build a detector with the default backend after validating `config`.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        Self::with_wrapper(config, InferenceWrapper::default())
    }

    /// Build a detector around a specific backend.
    pub fn with_backend(config: DetectorConfig, backend: Box<dyn ModelBackend>) -> Result<Self> {
        Self::with_wrapper(config, InferenceWrapper::new(backend))
    }

    fn with_wrapper(config: DetectorConfig, wrapper: InferenceWrapper) -> Result<Self> {
        config.validate()?;
        debug!(backend = wrapper.backend_name(), "detector created");
        Ok(Self {
            config,
            wrapper: RwLock::new(wrapper),
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Apply the permissive argument policy to raw host numbers.
    pub fn resolve_frame(&self, width: Option<f64>, height: Option<f64>) -> FrameSize {
        FrameSize::from_host_numbers(width, height, self.config.default_frame)
    }

    /// Detect objects in a frame.
    ///
    /// When a model is loaded and pixels are supplied, the backend's output is
    /// returned. Otherwise the synthetic detector runs and `pixels` is ignored.
    pub fn detect_objects(&self, size: FrameSize, pixels: Option<&[u8]>) -> Vec<Detection> {
        let wrapper = self.wrapper.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(pixels) = pixels.filter(|p| !p.is_empty()) {
            if wrapper.is_ready() {
                trace!(%size, bytes = pixels.len(), "running model backend");
                return wrapper.forward(pixels, size);
            }
        }
        toy_detections(size, &self.config)
    }

    /// Load a model pair into the backend. `false` on any failure.
    pub fn load_model(&self, param_path: impl AsRef<Path>, bin_path: impl AsRef<Path>) -> bool {
        self.wrapper
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .load_model(param_path, bin_path)
    }

    pub fn is_model_ready(&self) -> bool {
        self.wrapper
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrapper::tests::{EchoBackend, model_files};
    use approx::assert_abs_diff_eq;
    use std::sync::Arc;

    #[test]
    fn default_detector_matches_reference_example() {
        let detector = Detector::default();
        let dets = detector.detect_objects(FrameSize::new(640, 480), None);
        assert_eq!(dets.len(), 1);
        assert_abs_diff_eq!(dets[0].score, 0.7872, epsilon = 1e-12);
        assert!(detector.detect_objects(FrameSize::new(100, 100), None).is_empty());
    }

    #[test]
    fn pixels_do_not_change_synthetic_output() {
        let detector = Detector::default();
        let size = FrameSize::new(640, 480);
        let pixels = vec![128u8; 640 * 480 * 4];
        assert_eq!(
            detector.detect_objects(size, Some(&pixels)),
            detector.detect_objects(size, None)
        );
        assert_eq!(
            detector.detect_objects(size, Some(&[1, 2, 3])),
            detector.detect_objects(size, None)
        );
    }

    #[test]
    fn load_model_fails_with_stub() {
        let dir = tempfile::tempdir().unwrap();
        let (param, bin) = model_files(&dir);
        let detector = Detector::default();
        assert!(!detector.load_model(&param, &bin));
        assert!(!detector.is_model_ready());
    }

    #[test]
    fn resolve_frame_uses_configured_default() {
        let config = DetectorConfig {
            default_frame: FrameSize::new(1280, 720),
            ..DetectorConfig::default()
        };
        let detector = Detector::new(config).unwrap();
        assert_eq!(detector.resolve_frame(None, Some(10.0)), FrameSize::new(1280, 720));
        assert_eq!(detector.resolve_frame(Some(10.0), Some(20.0)), FrameSize::new(10, 20));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DetectorConfig {
            label: String::new(),
            ..DetectorConfig::default()
        };
        assert!(Detector::new(config).is_err());
    }

    #[test]
    fn ready_backend_takes_over_when_pixels_present() {
        let dir = tempfile::tempdir().unwrap();
        let (param, bin) = model_files(&dir);
        let detector =
            Detector::with_backend(DetectorConfig::default(), Box::new(EchoBackend::default()))
                .unwrap();
        assert!(detector.load_model(&param, &bin));
        assert!(detector.is_model_ready());

        let size = FrameSize::new(2, 2);
        let dets = detector.detect_objects(size, Some(&[9u8; 16]));
        assert_eq!(dets[0].label, "echo");

        // No pixels: still synthetic (and 2x2 is below the area threshold).
        assert!(detector.detect_objects(size, None).is_empty());
    }

    #[test]
    fn concurrent_callers_see_identical_results() {
        let detector = Arc::new(Detector::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let detector = Arc::clone(&detector);
                std::thread::spawn(move || {
                    detector.detect_objects(FrameSize::new(1920, 1080), None)
                })
            })
            .collect();
        let expected = detector.detect_objects(FrameSize::new(1920, 1080), None);
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
