//! Dump the parameter contract as JSON

use anyhow::{Context, Result};

use modkit::runner::Module;

use crate::file::FileModule;

pub fn run() -> Result<()> {
    let spec = FileModule.spec();
    let out = serde_json::to_string_pretty(&spec).context("failed to encode parameter contract")?;
    println!("{out}");
    Ok(())
}
