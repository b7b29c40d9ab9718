// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic definition of the embedding runtime.
//
// A runtime only has to offer one capability: binding a native function to a
// global name. JSI, an in-process test runtime, or anything else that can do
// that can host the detector.

use dummy_detector_core::error::Result;

use crate::value::HostValue;

/// A native function callable from the embedding runtime.
///
/// Receives the call's arguments (possibly fewer than the declared arity) and
/// returns a single value. Errors surface as exceptions on the JS side.
pub type HostFunction = Box<dyn Fn(&[HostValue]) -> Result<HostValue> + Send + Sync>;

/// A JavaScript runtime that native code can register globals into.
pub trait HostRuntime {
    /// Human-readable runtime name (e.g. "Hermes", "in-process stub").
    fn runtime_name(&self) -> &str;

    /// Bind `function` to the global property `name`.
    ///
    /// `arity` is the `length` the function reports to JavaScript; it does
    /// not constrain how many arguments callers actually pass.
    fn set_global_function(
        &mut self,
        name: &str,
        arity: usize,
        function: HostFunction,
    ) -> Result<()>;
}
