//! Entry shim - bridge the host invocation convention to the runner
//!
//! Parameters arrive as a JSON document (file or stdin); the payload is
//! emitted as JSON on stdout. Exactly one of the success or failure
//! payloads is produced per invocation, and the exit code mirrors which
//! one it was.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

use modkit::runner::{self, Invocation};

use crate::cli::RunArgs;
use crate::file::FileModule;
use crate::ui;

/// Execute the file module and emit its payload.
///
/// Returns the process exit code: 0 when the success payload was
/// emitted, 1 when the failure payload was emitted.
pub fn run(args: &RunArgs) -> i32 {
    let invocation = match read_params(&args.params) {
        Ok(raw) => runner::dispatch(&FileModule, raw),
        Err(err) => Invocation::failure(&err),
    };

    match serde_json::to_string_pretty(&invocation.payload) {
        Ok(out) => println!("{out}"),
        Err(err) => {
            ui::error(&format!("failed to encode payload: {err}"));
            return 1;
        }
    }

    i32::from(invocation.failed)
}

fn read_params(path: &Path) -> Result<Value> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read parameters from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read parameters from {}", path.display()))?
    };

    serde_json::from_str(&raw).context("parameters are not valid JSON")
}
