// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The one-time `install` step and the two host functions it registers.

use std::sync::Arc;

use dummy_detector_core::error::Result;
use dummy_detector_engine::Detector;
use tracing::{debug, info};

use crate::traits::HostRuntime;
use crate::value::HostValue;

/// Global name of the detection entry point.
pub const DETECT_OBJECTS: &str = "detectObjects";
/// Global name of the model loader.
pub const LOAD_DETECTION_MODEL: &str = "loadDetectionModel";

/// Register `detectObjects` and `loadDetectionModel` on `runtime`.
///
/// Meant to be called once per runtime at start-up. Calling it again simply
/// rebinds both globals to `detector`.
pub fn install(runtime: &mut dyn HostRuntime, detector: Arc<Detector>) -> Result<()> {
    let detect = Arc::clone(&detector);
    runtime.set_global_function(
        DETECT_OBJECTS,
        3,
        Box::new(move |args| Ok(detect_objects(&detect, args))),
    )?;

    let load = detector;
    runtime.set_global_function(
        LOAD_DETECTION_MODEL,
        2,
        Box::new(move |args| Ok(load_detection_model(&load, args))),
    )?;

    info!(runtime = runtime.runtime_name(), "detector host functions installed");
    Ok(())
}

/// `detectObjects(width, height, pixels?)`.
///
/// Never fails: unusable dimensions fall back to the configured default frame,
/// and anything other than a byte buffer in the third slot counts as "no
/// pixels".
pub fn detect_objects(detector: &Detector, args: &[HostValue]) -> HostValue {
    let arg = |i: usize| args.get(i).and_then(HostValue::as_number);
    let size = detector.resolve_frame(arg(0), arg(1));
    let pixels = match args.get(2) {
        None => None,
        Some(value) if value.is_nullish() => None,
        Some(value) => {
            let bytes = value.as_bytes();
            if bytes.is_none() {
                debug!("detectObjects: third argument is not a pixel buffer, ignoring it");
            }
            bytes
        }
    };

    let detections = detector.detect_objects(size, pixels);
    debug!(%size, count = detections.len(), "detectObjects");
    HostValue::from(detections.as_slice())
}

/// `loadDetectionModel(paramPath, binPath)`.
///
/// Returns `false` without touching the backend unless both arguments are
/// strings.
pub fn load_detection_model(detector: &Detector, args: &[HostValue]) -> HostValue {
    let param = args.first().and_then(HostValue::as_str);
    let bin = args.get(1).and_then(HostValue::as_str);
    match (param, bin) {
        (Some(param), Some(bin)) => HostValue::Bool(detector.load_model(param, bin)),
        _ => {
            debug!("loadDetectionModel called without two string arguments");
            HostValue::Bool(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use dummy_detector_core::DetectorConfig;

    fn detector() -> Detector {
        Detector::default()
    }

    fn num(v: f64) -> HostValue {
        HostValue::Number(v)
    }

    #[test]
    fn vga_call_returns_single_box() {
        let result = detect_objects(&detector(), &[num(640.0), num(480.0), HostValue::Null]);
        let items = result.as_array().unwrap();
        assert_eq!(items.len(), 1);
        let score = items[0].get("score").and_then(HostValue::as_number).unwrap();
        assert_abs_diff_eq!(score, 0.7872, epsilon = 1e-12);
        assert_eq!(items[0].get("x1").and_then(HostValue::as_number), Some(0.25));
        assert_eq!(
            items[0].get("label").and_then(HostValue::as_str),
            Some("toy_object")
        );
    }

    #[test]
    fn small_frame_returns_empty_array() {
        let result = detect_objects(&detector(), &[num(100.0), num(100.0)]);
        assert_eq!(result, HostValue::Array(vec![]));
    }

    #[test]
    fn missing_or_non_numeric_args_use_defaults() {
        let d = detector();
        let expected = detect_objects(&d, &[num(640.0), num(480.0)]);

        assert_eq!(detect_objects(&d, &[]), expected);
        assert_eq!(detect_objects(&d, &[num(100.0)]), expected);
        assert_eq!(
            detect_objects(&d, &[HostValue::String("1920".into()), num(1080.0)]),
            expected
        );
        assert_eq!(detect_objects(&d, &[HostValue::Undefined, HostValue::Null]), expected);
        assert_eq!(detect_objects(&d, &[num(f64::NAN), num(480.0)]), expected);
    }

    #[test]
    fn zero_dimensions_are_numeric_and_give_nothing() {
        // The JS facade passes `width || 0`; zero is a number, not a default.
        let result = detect_objects(&detector(), &[num(0.0), num(0.0), HostValue::Null]);
        assert_eq!(result, HostValue::Array(vec![]));
    }

    #[test]
    fn pixel_buffer_does_not_change_result() {
        let d = detector();
        let with = detect_objects(
            &d,
            &[num(1280.0), num(720.0), HostValue::Bytes(vec![7; 64])],
        );
        let without = detect_objects(&d, &[num(1280.0), num(720.0)]);
        assert_eq!(with, without);
    }

    #[test]
    fn non_buffer_third_argument_is_ignored() {
        let d = detector();
        let expected = detect_objects(&d, &[num(1920.0), num(1080.0)]);
        for third in [
            HostValue::Undefined,
            HostValue::Null,
            HostValue::String("frame".into()),
            HostValue::Array(vec![num(1.0)]),
        ] {
            assert_eq!(detect_objects(&d, &[num(1920.0), num(1080.0), third]), expected);
        }
    }

    #[test]
    fn load_requires_two_strings() {
        let d = detector();
        assert_eq!(load_detection_model(&d, &[]), HostValue::Bool(false));
        assert_eq!(
            load_detection_model(&d, &[HostValue::String("a.param".into())]),
            HostValue::Bool(false)
        );
        assert_eq!(
            load_detection_model(&d, &[HostValue::String("a.param".into()), num(1.0)]),
            HostValue::Bool(false)
        );
    }

    #[test]
    fn load_with_stub_backend_is_false() {
        let dir = tempfile::tempdir().unwrap();
        let param = dir.path().join("m.param");
        let bin = dir.path().join("m.bin");
        std::fs::write(&param, b"7767517\n").unwrap();
        std::fs::write(&bin, [0u8; 4]).unwrap();

        let args = [
            HostValue::String(param.display().to_string()),
            HostValue::String(bin.display().to_string()),
        ];
        assert_eq!(load_detection_model(&detector(), &args), HostValue::Bool(false));
    }

    #[test]
    fn configured_default_frame_is_honoured() {
        let config = DetectorConfig {
            default_frame: dummy_detector_core::FrameSize::new(320, 240),
            ..DetectorConfig::default()
        };
        let d = Detector::new(config).unwrap();
        // 320x240 is below the area threshold.
        assert_eq!(detect_objects(&d, &[]), HostValue::Array(vec![]));
    }
}
