// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process runtime for desktop/CI builds where no JavaScript engine exists.
//
// Stores whatever `install` registers and lets Rust code invoke it by name,
// which is how the host functions are exercised without a device.

use std::collections::BTreeMap;

use dummy_detector_core::error::{DetectorError, Result};

use crate::traits::{HostFunction, HostRuntime};
use crate::value::HostValue;

struct RegisteredFunction {
    arity: usize,
    function: HostFunction,
}

/// A map of global functions standing in for a JavaScript runtime.
#[derive(Default)]
pub struct StubRuntime {
    globals: BTreeMap<String, RegisteredFunction>,
}

impl StubRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke a registered global the way JavaScript would.
    pub fn call(&self, name: &str, args: &[HostValue]) -> Result<HostValue> {
        let registered = self
            .globals
            .get(name)
            .ok_or_else(|| DetectorError::UnknownFunction(name.to_owned()))?;
        (registered.function)(args)
    }

    /// Declared arity of a registered global.
    pub fn arity(&self, name: &str) -> Option<usize> {
        self.globals.get(name).map(|f| f.arity)
    }

    /// Names of all registered globals, sorted.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.globals.keys().map(String::as_str)
    }
}

impl HostRuntime for StubRuntime {
    fn runtime_name(&self) -> &str {
        "in-process (stub)"
    }

    fn set_global_function(
        &mut self,
        name: &str,
        arity: usize,
        function: HostFunction,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(DetectorError::Bridge("global function name is empty".into()));
        }
        if self
            .globals
            .insert(name.to_owned(), RegisteredFunction { arity, function })
            .is_some()
        {
            tracing::debug!(name, "replacing existing global function");
        }
        Ok(())
    }
}
