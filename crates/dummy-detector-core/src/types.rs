// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Dummy Detector.

use serde::{Deserialize, Serialize};

/// A single detected object.
///
/// Coordinates are normalised to `[0, 1]` relative to the frame, with
/// `(x1, y1)` the top-left and `(x2, y2)` the bottom-right corner. The field
/// names match the object shape the JavaScript side reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Confidence in `[0, 1]`.
    pub score: f64,
    /// Category name, e.g. `"toy_object"`.
    pub label: String,
}

/// Dimensions of a camera frame in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel count, widened so `u32::MAX * u32::MAX` cannot overflow.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Resolve a frame size from loosely-typed host arguments.
    ///
    /// Both values must be usable numbers for either to be taken; otherwise
    /// `fallback` is returned unchanged. A usable number is finite. It is
    /// truncated toward zero, and negatives are clamped to 0.
    pub fn from_host_numbers(width: Option<f64>, height: Option<f64>, fallback: FrameSize) -> Self {
        match (
            width.and_then(coerce_dimension),
            height.and_then(coerce_dimension),
        ) {
            (Some(width), Some(height)) => Self { width, height },
            _ => fallback,
        }
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl std::fmt::Display for FrameSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Convert a host number into a pixel dimension.
///
/// Returns `None` for NaN and infinities. Finite values saturate into
/// `0..=u32::MAX` after truncation.
fn coerce_dimension(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated <= 0.0 {
        Some(0)
    } else if truncated >= f64::from(u32::MAX) {
        Some(u32::MAX)
    } else {
        Some(truncated as u32)
    }
}
