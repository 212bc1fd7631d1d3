//! Output requests: which variant goes to which path.
//!
//! Every output the pipeline writes is an [`OutputRequest`] carrying an
//! explicit [`Variant`]. Callers that only have a path get the legacy
//! filename rule via [`OutputRequest::inferred`].
//!
//! ## Output specs
//!
//! On the command line an output is written as `[VARIANT:]PATH`:
//! - `"small:public/apple-touch.png"` → small, explicit
//! - `"LARGE:public/logo.png"` → large, explicit (variant name is case-insensitive)
//! - `"public/pwa-192x192.png"` → small, inferred from `192` in the filename
//! - `"public/favicon.ico"` → large, inferred
//! - `"C:\\icons\\favicon.png"` → large, inferred (`C` is not a variant name)

use crate::imaging::Variant;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("output spec '{0}' has no path")]
    EmptyPath(String),
}

/// One destination file and the variant written to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRequest {
    pub path: PathBuf,
    pub variant: Variant,
}

impl OutputRequest {
    pub fn new(path: impl Into<PathBuf>, variant: Variant) -> Self {
        Self {
            path: path.into(),
            variant,
        }
    }

    /// Build a request whose variant comes from the filename rule.
    pub fn inferred(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let variant = Variant::from_filename(&path);
        Self { path, variant }
    }

    /// Parse an output spec of the form `[VARIANT:]PATH`.
    pub fn parse(spec: &str) -> Result<Self, RequestError> {
        let (variant, path) = match spec.split_once(':') {
            Some((prefix, rest)) => match Variant::from_name(prefix) {
                Some(v) => (Some(v), rest),
                None => (None, spec),
            },
            None => (None, spec),
        };

        if path.trim().is_empty() {
            return Err(RequestError::EmptyPath(spec.to_string()));
        }

        Ok(match variant {
            Some(v) => Self::new(path, v),
            None => Self::inferred(path),
        })
    }
}

/// Parse a list of output specs, stopping at the first invalid one.
pub fn parse_requests<S: AsRef<str>>(specs: &[S]) -> Result<Vec<OutputRequest>, RequestError> {
    specs.iter().map(|s| OutputRequest::parse(s.as_ref())).collect()
}
