//! Print the generated module documentation

use anyhow::Result;

use modkit::docgen;
use modkit::runner::Module;

use crate::file::FileModule;

pub fn run() -> Result<()> {
    let spec = FileModule.spec();
    print!("{}", docgen::render_markdown(FileModule.name(), &spec));
    Ok(())
}
