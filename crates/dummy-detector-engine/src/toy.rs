// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Toy CPU "inference": a centred box sized from the frame dimensions.
//
// Not machine learning. It stands in for per-frame native work so the host
// side can be exercised end to end before a real model is wired in.

use dummy_detector_core::{Detection, DetectorConfig, FrameSize};
use tracing::trace;

/// Produce the synthetic detections for a frame.
///
/// Frames smaller than `config.min_area` yield nothing. Otherwise exactly one
/// box is returned, centred at `(0.5, 0.5)`, with width
/// `min(max_box_extent, reference_width / width)` and the analogous height.
/// The score grows with area and is capped at `base_score + max_score_boost`.
pub fn toy_detections(size: FrameSize, config: &DetectorConfig) -> Vec<Detection> {
    let area = size.area();
    if area < config.min_area {
        trace!(%size, area, "frame below minimum area, no detections");
        return Vec::new();
    }

    let (cx, cy) = (0.5, 0.5);
    let w = config
        .max_box_extent
        .min(config.reference_width / f64::from(size.width.max(1)));
    let h = config
        .max_box_extent
        .min(config.reference_height / f64::from(size.height.max(1)));
    let score = config.base_score + (area as f64 / config.area_scale).min(config.max_score_boost);

    trace!(%size, area, w, h, score, "toy detection");
    vec![Detection {
        x1: cx - w / 2.0,
        y1: cy - h / 2.0,
        x2: cx + w / 2.0,
        y2: cy + h / 2.0,
        score,
        label: config.label.clone(),
    }]
}
