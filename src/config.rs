//! Job file configuration.
//!
//! A job file lists the source image and the outputs to write, so a project
//! can keep its icon recipe next to its assets instead of in shell history.
//!
//! ## Job File
//!
//! ```toml
//! # iconcrop.toml
//! input = "design/logo.png"
//! fail_fast = false
//!
//! [[outputs]]
//! path = "public/pwa-512x512.png"
//!
//! [[outputs]]
//! path = "public/pwa-192x192.png"   # "192" in the name → small variant
//!
//! [[outputs]]
//! path = "public/apple-touch-icon.png"
//! variant = "small"                 # explicit variant wins over the name
//! ```
//!
//! Relative paths resolve against the directory holding the job file.
//! Unknown keys are rejected to catch typos early. The crop margin and the
//! two target sizes are fixed and cannot be set here.

use crate::imaging::Variant;
use crate::request::OutputRequest;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Contents of a job file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Source image.
    pub input: Option<PathBuf>,
    /// Stop at the first failed write.
    pub fail_fast: bool,
    /// Files to write, in order.
    pub outputs: Vec<OutputEntry>,
}

/// One `[[outputs]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputEntry {
    pub path: PathBuf,
    /// `"large"` or `"small"`; inferred from the filename when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
}

impl OutputEntry {
    pub fn to_request(&self) -> OutputRequest {
        match self.variant {
            Some(v) => OutputRequest::new(&self.path, v),
            None => OutputRequest::inferred(&self.path),
        }
    }
}

impl JobConfig {
    /// Check the job for values the pipeline cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Validation("input must not be empty".into()));
        }
        for (i, entry) in self.outputs.iter().enumerate() {
            if entry.path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "outputs[{i}].path must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Rewrite relative paths so they are relative to `base` instead.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: &PathBuf| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.clone()
            }
        };
        self.input = self.input.as_ref().map(resolve);
        for entry in &mut self.outputs {
            entry.path = resolve(&entry.path);
        }
        self
    }

    pub fn requests(&self) -> Vec<OutputRequest> {
        self.outputs.iter().map(OutputEntry::to_request).collect()
    }
}

/// Parse and validate job file contents. Paths are left as written.
pub fn parse_config(content: &str) -> Result<JobConfig, ConfigError> {
    let config: JobConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load a job file, resolving its relative paths against its directory.
pub fn load_config(path: &Path) -> Result<JobConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base))
}

/// Returns a fully-commented stock job file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# iconcrop job file
# ==================
# Run with: iconcrop process --config iconcrop.toml
# Relative paths are resolved against the directory holding this file.
# Paths given on the command line override the ones below.
#
# Every run trims a fixed 50px border from the source, then writes a
# 512x512 ("large") or 192x192 ("small") Lanczos3 resize to each output.

# Source image (PNG, JPEG, WebP or ICO).
input = "logo.png"

# Stop at the first output that fails to write.
# When false, every output is attempted and all failures are reported.
fail_fast = false

# Outputs are written in order. The format follows the extension:
# .png, .ico (multi-size icon, largest frame 256px), .jpg/.jpeg, .webp
#
# Without `variant`, a filename containing "192" gets the small variant
# and everything else gets the large one.

[[outputs]]
path = "public/pwa-512x512.png"

[[outputs]]
path = "public/pwa-192x192.png"

[[outputs]]
path = "public/favicon.png"

[[outputs]]
path = "public/favicon.ico"

# [[outputs]]
# path = "public/apple-touch-icon.png"
# variant = "small"
"##
}
