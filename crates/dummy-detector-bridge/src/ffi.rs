// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// C ABI for native host shims.
//
// A JSI host function cannot be created from Rust without the C++ JSI
// headers, so the platform shim owns the `jsi::Function` objects and forwards
// each call here. Values cross as plain C scalars and strings; detections come
// back as a JSON array that the shim hands to `JSON.parse` (or walks itself).
//
// Every string returned by this module must be released with
// `dd_string_free`.
//
// The platform installer hands over the runtime address through
// `attach_runtime`; the shim registers a `RuntimeInstaller` with
// `dd_set_runtime_installer` and is called back with that address to create
// the JS globals.

use std::ffi::{CStr, CString, c_char, c_void};
use std::ptr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

use dummy_detector_core::Detection;
use dummy_detector_core::error::{DetectorError, Result};
use tracing::{info, warn};

use crate::shared_detector;

/// Prepare the process-wide detector and logging. Safe to call repeatedly.
#[unsafe(no_mangle)]
pub extern "C" fn dd_install() -> bool {
    crate::init_tracing();
    let detector = shared_detector();
    info!(
        model_ready = detector.is_model_ready(),
        label = %detector.config().label,
        "dummy detector installed"
    );
    true
}

/// Callback that binds `detectObjects` / `loadDetectionModel` on a runtime.
pub type RuntimeInstaller = unsafe extern "C" fn(runtime: *mut c_void);

/// Address of the runtime most recently attached; 0 if none.
static RUNTIME_HANDLE: AtomicI64 = AtomicI64::new(0);

static RUNTIME_INSTALLER: Mutex<Option<RuntimeInstaller>> = Mutex::new(None);

/// Register the callback that creates the host functions on a runtime.
///
/// If a runtime is already attached, the callback runs immediately with it.
/// Passing null clears the registration.
///
/// # Safety
///
/// `installer` must be safe to call with every handle passed to
/// `attach_runtime` for as long as it stays registered.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dd_set_runtime_installer(installer: Option<RuntimeInstaller>) {
    *RUNTIME_INSTALLER
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = installer;
    let handle = RUNTIME_HANDLE.load(Ordering::Acquire);
    if let Some(installer) = installer.filter(|_| handle != 0) {
        // SAFETY: upheld by the caller per the contract above.
        unsafe { installer(handle as usize as *mut c_void) };
    }
}

/// Address of the attached runtime, or 0 before the first attach.
#[unsafe(no_mangle)]
pub extern "C" fn dd_installed_runtime() -> i64 {
    RUNTIME_HANDLE.load(Ordering::Acquire)
}

/// Prepare the detector for `runtime` and bind the host functions on it.
///
/// Returns `false` for a null handle. A repeated attach (app reload) rebinds
/// the globals on the new runtime.
pub fn attach_runtime(runtime: i64) -> bool {
    if runtime == 0 {
        warn!("attach called with a null JS runtime, skipping");
        return false;
    }
    dd_install();
    let previous = RUNTIME_HANDLE.swap(runtime, Ordering::AcqRel);
    if previous != 0 && previous != runtime {
        info!("JS runtime replaced (app reload)");
    }

    let installer = *RUNTIME_INSTALLER
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    match installer {
        // SAFETY: guaranteed by whoever registered it via `dd_set_runtime_installer`.
        Some(installer) => unsafe { installer(runtime as usize as *mut c_void) },
        None => warn!("no runtime installer registered, host functions not bound yet"),
    }
    true
}

/// Run `detectObjects` and return the detections as a JSON array.
///
/// Pass `NaN` for a width or height the caller could not read as a number.
/// Returns null only if the result could not be encoded.
///
/// # Safety
///
/// `pixels` must be null or point to `len` readable bytes that stay valid for
/// the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dd_detect_objects(
    width: f64,
    height: f64,
    pixels: *const u8,
    len: usize,
) -> *mut c_char {
    let pixels = if pixels.is_null() || len == 0 {
        None
    } else {
        // SAFETY: upheld by the caller per the contract above.
        Some(unsafe { std::slice::from_raw_parts(pixels, len) })
    };

    let detector = shared_detector();
    let size = detector.resolve_frame(Some(width), Some(height));
    let detections = detector.detect_objects(size, pixels);

    match detections_to_c_json(&detections) {
        Ok(json) => json.into_raw(),
        Err(err) => {
            warn!(error = %err, "failed to encode detections");
            ptr::null_mut()
        }
    }
}

/// Run `loadDetectionModel`. Null or non-UTF-8 paths yield `false`.
///
/// # Safety
///
/// Each pointer must be null or point to a NUL-terminated string that stays
/// valid for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dd_load_detection_model(
    param_path: *const c_char,
    bin_path: *const c_char,
) -> bool {
    // SAFETY: upheld by the caller per the contract above.
    let (param, bin) = unsafe { (borrow_c_str(param_path), borrow_c_str(bin_path)) };
    match (param, bin) {
        (Some(param), Some(bin)) => shared_detector().load_model(param, bin),
        _ => {
            warn!("dd_load_detection_model: null or non-UTF-8 path");
            false
        }
    }
}

/// Release a string returned by this library. Null is ignored.
///
/// # Safety
///
/// `ptr` must have come from this library and must not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dd_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        // SAFETY: the pointer was produced by `CString::into_raw` in this module.
        drop(unsafe { CString::from_raw(ptr) });
    }
}

fn detections_to_c_json(detections: &[Detection]) -> Result<CString> {
    let json = serde_json::to_string(detections)?;
    CString::new(json).map_err(|e| DetectorError::Bridge(format!("interior NUL in JSON: {e}")))
}

/// # Safety
///
/// `ptr` must be null or a valid NUL-terminated string outliving `'a`.
unsafe fn borrow_c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the function contract.
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}
