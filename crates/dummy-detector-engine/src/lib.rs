// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! dummy-detector-engine — the detection path behind the host bridge.
//!
//! `toy` holds the deterministic placeholder detector, `backend` the
//! pluggable model capability (only a permanently failing stub today), and
//! `detector` composes the two into the single entry point the bridge calls.

pub mod backend;
pub mod detector;
pub mod toy;
pub mod wrapper;

pub use backend::{FrameView, ModelBackend, ModelPaths};
pub use detector::Detector;
pub use toy::toy_detections;
pub use wrapper::InferenceWrapper;
