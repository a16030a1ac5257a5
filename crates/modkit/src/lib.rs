//! # modkit
//!
//! Host-framework glue for declarative configuration modules.
//!
//! This crate provides the pieces a module needs to be driven by a
//! configuration-management host:
//! - A parameter contract ([`ModuleSpec`]) declaring accepted keys with
//!   types, defaults, required flags, and allowed values
//! - Input validation against that contract before any handler runs
//! - A result reporter ([`Report`]) accumulating an action log and a
//!   changed-flag
//! - A runner ([`dispatch`]) translating handler outcomes into exactly
//!   one success or failure payload per invocation
//! - A documentation generator rendering the contract as Markdown
//!
//! ## Example
//!
//! ```
//! use modkit::{FieldSpec, FieldType, Module, ModuleSpec, Report};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize)]
//! struct Params {
//!     name: String,
//! }
//!
//! struct Greet;
//!
//! impl Module for Greet {
//!     type Params = Params;
//!
//!     fn name(&self) -> &'static str {
//!         "greet"
//!     }
//!
//!     fn spec(&self) -> ModuleSpec {
//!         ModuleSpec::new(&["Greet someone."])
//!             .field(FieldSpec::new("name", FieldType::String, "Who to greet.").required())
//!     }
//!
//!     fn handle(&self, params: Params, report: &mut Report) -> anyhow::Result<()> {
//!         report.record_action(format!("Greeted {}", params.name));
//!         Ok(())
//!     }
//! }
//!
//! let invocation = modkit::dispatch(&Greet, json!({"name": "world"}));
//! assert!(!invocation.failed);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod docgen;
pub mod error;
pub mod report;
pub mod runner;
pub mod spec;

pub use error::{Error, Result};
pub use report::Report;
pub use runner::{Invocation, Module, dispatch};
pub use spec::{FieldSpec, FieldType, ModuleSpec, ReturnSpec};
