//! Documentation tables for the file module
//!
//! Pure data consumed by the documentation generator; no runtime logic.

/// Synopsis lines for generated documentation
pub const DESCRIPTION: &[&str] = &["Create, update, and destroy files."];

/// Example parameter documents
pub const EXAMPLES: &[&str] = &[
    r#"{
  "state": "present",
  "path": "foo.txt",
  "content": ["line1", "line2"],
  "permissions": "777"
}"#,
    r#"{
  "state": "absent",
  "path": "foo.txt"
}"#,
];

/// Sample payloads for the `file` return value
pub const FILE_SAMPLES: &[&str] =
    &[r#"{"file": {"size": 12, "permissions": "644", "path": "/path/to/my/file"}}"#];
