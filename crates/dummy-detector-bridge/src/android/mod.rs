// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android entry points via JNI.
//
// Targets `aarch64-linux-android` / `armv7-linux-androideabi`. The Kotlin side
// is the `DummyDetectorInstaller` object in the host app:
//
// ```kotlin
// object DummyDetectorInstaller {
//     init { System.loadLibrary("dummy_detector_bridge") }
//     @JvmStatic external fun install(runtimePtr: Long)
//     @JvmStatic external fun loadModel(paramPath: String, binPath: String): Boolean
// }
// ```
//
// `install` receives the address of the app's `jsi::Runtime` once the React
// context is ready and passes it to `crate::ffi::attach_runtime`. The JSI shim
// linked into the same `.so` registers itself with `dd_set_runtime_installer`
// when the library loads, is called back with that address, creates the
// `detectObjects` / `loadDetectionModel` host functions and forwards them to
// the C ABI in `crate::ffi`.

#![cfg(target_os = "android")]

use jni::JNIEnv;
use jni::objects::{JClass, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jlong};

use dummy_detector_core::error::{DetectorError, Result};

/// Convenience: map any `jni::errors::Error` into `DetectorError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> DetectorError {
    DetectorError::Bridge(format!("{context}: {e}"))
}

/// Copy a Java string into Rust, treating `null` as an error.
fn java_string(env: &mut JNIEnv<'_>, value: &JString<'_>) -> Result<String> {
    if value.is_null() {
        return Err(DetectorError::Bridge("unexpected null string".into()));
    }
    env.get_string(value)
        .map(String::from)
        .map_err(|e| jni_err("get_string", e))
}

/// `DummyDetectorInstaller.install(runtimePtr: Long)`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_amirzhou_rahcapp_DummyDetectorInstaller_install<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    runtime_ptr: jlong,
) {
    if crate::ffi::attach_runtime(runtime_ptr) {
        tracing::info!(runtime = %format!("{runtime_ptr:#x}"), "Android: detector installed");
    }
}

/// `DummyDetectorInstaller.loadModel(paramPath: String, binPath: String): Boolean`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_amirzhou_rahcapp_DummyDetectorInstaller_loadModel<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    param_path: JString<'local>,
    bin_path: JString<'local>,
) -> jboolean {
    let paths = java_string(&mut env, &param_path)
        .and_then(|param| Ok((param, java_string(&mut env, &bin_path)?)));
    match paths {
        Ok((param, bin)) if crate::shared_detector().load_model(&param, &bin) => JNI_TRUE,
        Ok(_) => JNI_FALSE,
        Err(err) => {
            tracing::warn!(error = %err, "Android: loadModel rejected arguments");
            JNI_FALSE
        }
    }
}
