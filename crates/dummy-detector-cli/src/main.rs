// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dummy Detector — desktop harness.
//
// Entry point. Initialises logging, builds the detector from config, installs
// the host functions into an in-process runtime and calls them exactly as the
// app's test screen does.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use dummy_detector_bridge::install::{DETECT_OBJECTS, LOAD_DETECTION_MODEL};
use dummy_detector_bridge::{HostValue, StubRuntime, install};
use dummy_detector_core::DetectorConfig;
use dummy_detector_core::config::CONFIG_ENV_VAR;
use dummy_detector_core::error::Result;
use dummy_detector_engine::Detector;

#[derive(Debug, Parser)]
#[command(name = "dummy-detector", version, about = "Run the toy detector outside the app")]
struct Cli {
    /// JSON file overriding detector settings.
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Call `detectObjects` and print the detections as JSON.
    Detect {
        /// Frame width in pixels (omit to use the configured default).
        #[arg(long, allow_negative_numbers = true)]
        width: Option<f64>,
        /// Frame height in pixels (omit to use the configured default).
        #[arg(long, allow_negative_numbers = true)]
        height: Option<f64>,
        /// Raw RGBA frame to pass as the pixel buffer.
        #[arg(long)]
        pixels: Option<PathBuf>,
    },
    /// Call `loadDetectionModel`; exits non-zero when loading fails.
    LoadModel {
        /// Network description file (`.param`).
        param: PathBuf,
        /// Weights file (`.bin`).
        bin: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli, &mut std::io::stdout().lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!(error = %err, "dummy-detector failed");
            ExitCode::from(2)
        }
    }
}

/// Execute one subcommand, writing its result to `out`. `Ok(false)` means the
/// call ran but reported failure.
fn run(cli: Cli, out: &mut dyn Write) -> Result<bool> {
    let config = match &cli.config {
        Some(path) => DetectorConfig::from_json_file(path)?,
        None => DetectorConfig::default(),
    };

    let mut runtime = StubRuntime::new();
    install(&mut runtime, Arc::new(Detector::new(config)?))?;

    match cli.command {
        Command::Detect {
            width,
            height,
            pixels,
        } => {
            let pixels = pixels.map(std::fs::read).transpose()?;
            let result = runtime.call(DETECT_OBJECTS, &detect_args(width, height, pixels))?;
            let json = serde_json::to_string_pretty(&serde_json::Value::from(result))?;
            writeln!(out, "{json}")?;
            Ok(true)
        }
        Command::LoadModel { param, bin } => {
            let args = [
                HostValue::String(param.to_string_lossy().into_owned()),
                HostValue::String(bin.to_string_lossy().into_owned()),
            ];
            let loaded = runtime
                .call(LOAD_DETECTION_MODEL, &args)?
                .as_bool()
                .unwrap_or(false);
            writeln!(out, "{loaded}")?;
            Ok(loaded)
        }
    }
}

/// Build the argument list a JS caller would pass: omitted numbers become
/// `undefined`, a missing buffer becomes `null`.
fn detect_args(width: Option<f64>, height: Option<f64>, pixels: Option<Vec<u8>>) -> [HostValue; 3] {
    [
        width.map_or(HostValue::Undefined, HostValue::Number),
        height.map_or(HostValue::Undefined, HostValue::Number),
        pixels.map_or(HostValue::Null, HostValue::Bytes),
    ]
}
