use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filemod")]
#[command(version)]
#[command(about = "Declarative file-state module for configuration management", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the module against a parameter document
    Run(RunArgs),

    /// Print the generated module documentation
    Docs,

    /// Print the parameter contract as JSON
    Spec,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to the JSON parameter document, or '-' for stdin
    #[arg(default_value = "-")]
    pub params: PathBuf,
}
