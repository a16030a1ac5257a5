//! The `file` module - declarative file state reconciliation
//!
//! Converges a single path to the desired state (`present` or `absent`)
//! with the smallest sufficient set of filesystem mutations, recording
//! every mutation performed. The filesystem is the sole source of truth:
//! state is observed fresh on every invocation and never cached.
//!
//! The reconciler takes no locks. Concurrent invocations against the
//! same path can race between observation and mutation; callers are
//! expected to serialize invocations per path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use modkit::report::Report;
use modkit::runner::Module;
use modkit::spec::{FieldSpec, FieldType, ModuleSpec, ReturnSpec};

use crate::docs;

/// Desired terminal state for the target path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileState {
    /// The file exists with the desired content and permissions
    Present,
    /// The file does not exist
    Absent,
}

/// Validated parameters for one invocation
#[derive(Debug, Clone, Deserialize)]
pub struct FileParams {
    /// Desired state of the file
    pub state: FileState,
    /// Target path
    pub path: PathBuf,
    /// Create missing parent directories before writing
    pub create_directories: bool,
    /// Desired mode bits as an octal string, e.g. "644"
    pub permissions: String,
    /// Lines to write; each gets a trailing newline
    pub content: Vec<String>,
}

/// Info about the resulting file, returned under the `file` key
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    /// Size in bytes
    pub size: u64,
    /// Mode bits as an octal string
    pub permissions: String,
    /// Target path as supplied
    pub path: String,
}

#[cfg(unix)]
fn mode_bits(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn mode_bits(_metadata: &fs::Metadata) -> u32 {
    0
}

/// The file module
#[derive(Debug)]
pub struct FileModule;

impl Module for FileModule {
    type Params = FileParams;

    fn name(&self) -> &'static str {
        "file"
    }

    fn spec(&self) -> ModuleSpec {
        ModuleSpec::new(docs::DESCRIPTION)
            .field(
                FieldSpec::new("state", FieldType::String, "The state of the file.")
                    .required()
                    .choices(&["present", "absent"]),
            )
            .field(FieldSpec::new("path", FieldType::String, "The path of the file.").required())
            .field(
                FieldSpec::new(
                    "create_directories",
                    FieldType::Bool,
                    "Whether or not to create parent directories if they do not exist.",
                )
                .default(json!(true)),
            )
            .field(
                FieldSpec::new(
                    "permissions",
                    FieldType::String,
                    "The permissions to give the file.",
                )
                .default(json!("644")),
            )
            .field(
                FieldSpec::new(
                    "content",
                    FieldType::List,
                    "A list of lines to write to the file.",
                )
                .element_type(FieldType::String)
                .default(json!([])),
            )
            .examples(docs::EXAMPLES)
            .returns(
                ReturnSpec::new("file", FieldType::Dict, "Info about the resulting file.")
                    .samples(docs::FILE_SAMPLES),
            )
    }

    fn handle(&self, params: FileParams, report: &mut Report) -> Result<()> {
        let reconciler = Reconciler::new(&params);

        match params.state {
            FileState::Present => reconciler.handle_present(report),
            FileState::Absent => reconciler.handle_absent(report),
        }
    }
}

/// Single-invocation reconciler for one target path
struct Reconciler<'a> {
    params: &'a FileParams,
}

impl<'a> Reconciler<'a> {
    fn new(params: &'a FileParams) -> Self {
        Self { params }
    }

    fn path(&self) -> &Path {
        &self.params.path
    }

    /// Desired content as lines, each with a trailing newline
    fn desired_lines(&self) -> Vec<String> {
        self.params
            .content
            .iter()
            .map(|line| format!("{line}\n"))
            .collect()
    }

    /// Read the file as lines, trailing newlines retained
    fn read_lines(&self) -> Result<Vec<String>> {
        let content = fs::read_to_string(self.path())
            .with_context(|| format!("failed to read {}", self.path().display()))?;

        Ok(content.split_inclusive('\n').map(str::to_string).collect())
    }

    /// Write the desired lines, replacing any existing content wholesale
    fn write_lines(&self) -> Result<()> {
        fs::write(self.path(), self.desired_lines().concat())
            .with_context(|| format!("failed to write {}", self.path().display()))
    }

    /// Create missing parent directories when `create_directories` is set
    fn ensure_parent_directories(&self, report: &mut Report) -> Result<()> {
        if !self.params.create_directories {
            return Ok(());
        }

        let Some(parent) = self.path().parent() else {
            return Ok(());
        };

        // A bare filename has an empty parent, which always exists
        if parent.as_os_str().is_empty() || parent.is_dir() {
            return Ok(());
        }

        report.record_action(format!("Created path {}", parent.display()));
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))
    }

    /// Rewrite the file when its lines differ from the desired lines.
    /// Replacement is all-or-nothing; there is no line-level patching.
    fn ensure_content(&self, report: &mut Report) -> Result<()> {
        if self.read_lines()? == self.desired_lines() {
            return Ok(());
        }

        report.record_action(format!(
            "Updated file content for {}",
            self.path().display()
        ));
        self.write_lines()
    }

    /// Converge mode bits to the desired permission mask
    #[cfg(unix)]
    fn ensure_permissions(&self, report: &mut Report) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let desired = self.desired_mode()?;

        let metadata = fs::metadata(self.path())
            .with_context(|| format!("failed to stat {}", self.path().display()))?;
        let actual = metadata.permissions().mode() & 0o777;

        if actual == desired {
            return Ok(());
        }

        report.record_action(format!("Updated file permissions {actual:o} -> {desired:o}"));
        fs::set_permissions(self.path(), fs::Permissions::from_mode(desired))
            .with_context(|| format!("failed to chmod {}", self.path().display()))
    }

    #[cfg(not(unix))]
    fn ensure_permissions(&self, _report: &mut Report) -> Result<()> {
        log::debug!("mode bits are not supported on this platform, skipping");
        Ok(())
    }

    /// Parse the desired permission mask, restricted to the low 9 bits
    #[cfg(unix)]
    fn desired_mode(&self) -> Result<u32> {
        let parsed = u32::from_str_radix(&self.params.permissions, 8).with_context(|| {
            format!(
                "invalid permissions '{}': expected an octal string",
                self.params.permissions
            )
        })?;

        Ok(parsed & 0o777)
    }

    /// Describe the file as it exists now
    fn file_info(&self) -> Result<FileInfo> {
        let metadata = fs::metadata(self.path())
            .with_context(|| format!("failed to stat {}", self.path().display()))?;

        Ok(FileInfo {
            size: metadata.len(),
            permissions: format!("{:o}", mode_bits(&metadata)),
            path: self.path().display().to_string(),
        })
    }

    fn handle_present(&self, report: &mut Report) -> Result<()> {
        self.ensure_parent_directories(report)?;

        if self.path().is_file() {
            self.ensure_content(report)?;
        } else {
            self.write_lines()?;
            report.record_action(format!("Created file {}", self.path().display()));
        }

        self.ensure_permissions(report)?;

        report.set_extra("file", serde_json::to_value(self.file_info()?)?);
        Ok(())
    }

    fn handle_absent(&self, report: &mut Report) -> Result<()> {
        if !self.path().is_file() {
            return Ok(());
        }

        // Capture the stat before the file disappears
        report.set_extra("file", serde_json::to_value(self.file_info()?)?);

        fs::remove_file(self.path())
            .with_context(|| format!("failed to delete {}", self.path().display()))?;
        report.record_action(format!("Deleted file {}", self.path().display()));

        Ok(())
    }
}
