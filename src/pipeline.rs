//! The icon pipeline: load → crop → resize → save.
//!
//! ```text
//! source.png (W×H)
//!   └─ crop 50px from every edge      → (W−100)×(H−100)
//!        ├─ Lanczos3 → 512×512 (large) → every request bound to Large
//!        └─ Lanczos3 → 192×192 (small) → every request bound to Small
//! ```
//!
//! The crop happens once; each variant is resized independently from the
//! cropped image, and only variants some request needs are produced.
//! Requests are written in order.
//!
//! ## Failure behavior
//!
//! | Stage | Error | Effect |
//! |---|---|---|
//! | load | [`PipelineError::Decode`] | nothing written |
//! | crop | [`PipelineError::InvalidRegion`] | nothing written |
//! | save | [`PipelineError::Write`] | other requests still attempted unless `fail_fast`; successful writes stay on disk |
//!
//! Nothing is retried.
//!
//! ## Progress events
//!
//! Callers can pass a `Sender<PipelineEvent>` to observe progress; the CLI
//! prints them on a separate thread. [`PipelineEvent::Completed`] is sent
//! only when every request was written.

use crate::imaging::{
    BackendError, CropRegion, Dimensions, ImageBackend, Margin, RustBackend, Variant,
    calculate_crop_region,
};
use crate::request::OutputRequest;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("decode failed for {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error(
        "crop failed: a {margin}px margin leaves no image in a {width}x{height} source \
         (both sides must be larger than twice the margin)"
    )]
    InvalidRegion { width: u32, height: u32, margin: u32 },
    #[error("write failed for {}", describe_failures(.failures))]
    Write { failures: Vec<WriteFailure> },
    #[error("no outputs requested")]
    NoOutputs,
}

/// A single request that could not be written.
#[derive(Debug)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub variant: Variant,
    pub error: BackendError,
}

fn describe_failures(failures: &[WriteFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.path.display(), f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Knobs for a pipeline run. Margin and target sizes are fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Stop at the first failed write instead of attempting the rest.
    pub fail_fast: bool,
}

/// Progress notifications sent while the pipeline runs.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    SourceLoaded {
        path: PathBuf,
        dimensions: Dimensions,
    },
    Cropped {
        region: CropRegion,
    },
    OutputWritten {
        path: PathBuf,
        variant: Variant,
        dimensions: Dimensions,
    },
    OutputFailed {
        path: PathBuf,
        variant: Variant,
        error: String,
    },
    Completed {
        written: usize,
    },
}

/// One successfully written output, with the size actually encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenOutput {
    pub path: PathBuf,
    pub variant: Variant,
    pub dimensions: Dimensions,
}

/// Summary of a successful run, serialized by `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub source: PathBuf,
    pub source_dimensions: Dimensions,
    pub margin: u32,
    pub cropped_dimensions: Dimensions,
    pub outputs: Vec<WrittenOutput>,
}

/// Result of a dry run: what the pipeline would crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub source: PathBuf,
    pub source_dimensions: Dimensions,
    pub margin: u32,
    pub cropped_dimensions: Dimensions,
}

fn emit(events: Option<&Sender<PipelineEvent>>, event: PipelineEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is watching
        tx.send(event).ok();
    }
}

/// Run the pipeline with the production [`RustBackend`].
pub fn process(
    input: &Path,
    requests: &[OutputRequest],
    options: PipelineOptions,
    events: Option<Sender<PipelineEvent>>,
) -> Result<PipelineReport, PipelineError> {
    process_with_backend(&RustBackend::new(), input, requests, options, events)
}

/// Decode the input and compute the crop without writing anything.
pub fn check(input: &Path) -> Result<CheckReport, PipelineError> {
    check_with_backend(&RustBackend::new(), input)
}

/// Load the source and crop the fixed margin off every edge.
fn load_and_crop<B: ImageBackend>(
    backend: &B,
    input: &Path,
    events: Option<&Sender<PipelineEvent>>,
) -> Result<(Dimensions, CropRegion, B::Image), PipelineError> {
    let margin = Margin::DEFAULT;

    let source = backend.load(input).map_err(|source| PipelineError::Decode {
        path: input.to_path_buf(),
        source,
    })?;
    let dims = backend.dimensions(&source);
    debug!(path = %input.display(), %dims, "loaded source");
    emit(
        events,
        PipelineEvent::SourceLoaded {
            path: input.to_path_buf(),
            dimensions: dims,
        },
    );

    let invalid = || PipelineError::InvalidRegion {
        width: dims.width,
        height: dims.height,
        margin: margin.value(),
    };
    let region = calculate_crop_region(dims.as_tuple(), margin).ok_or_else(invalid)?;
    let cropped = backend.crop(&source, region).map_err(|e| {
        warn!(error = %e, "backend rejected crop region");
        invalid()
    })?;
    debug!(?region, "cropped source");
    emit(events, PipelineEvent::Cropped { region });

    Ok((dims, region, cropped))
}

/// Dry run against a specific backend (allows testing with mock).
pub fn check_with_backend<B: ImageBackend>(
    backend: &B,
    input: &Path,
) -> Result<CheckReport, PipelineError> {
    let (dims, region, _) = load_and_crop(backend, input, None)?;
    Ok(CheckReport {
        source: input.to_path_buf(),
        source_dimensions: dims,
        margin: Margin::DEFAULT.value(),
        cropped_dimensions: Dimensions::new(region.width, region.height),
    })
}

/// Run the pipeline using a specific backend (allows testing with mock).
pub fn process_with_backend<B: ImageBackend>(
    backend: &B,
    input: &Path,
    requests: &[OutputRequest],
    options: PipelineOptions,
    events: Option<Sender<PipelineEvent>>,
) -> Result<PipelineReport, PipelineError> {
    if requests.is_empty() {
        return Err(PipelineError::NoOutputs);
    }
    let events = events.as_ref();

    let (dims, region, cropped) = load_and_crop(backend, input, events)?;

    let mut variants: BTreeMap<Variant, B::Image> = BTreeMap::new();
    for variant in Variant::ALL {
        if requests.iter().any(|r| r.variant == variant) {
            variants.insert(variant, backend.resize(&cropped, variant.resize_params()));
            debug!(%variant, edge = variant.edge(), "resized variant");
        }
    }
    // The cropped image is not needed once both variants exist
    drop(cropped);

    let mut outputs = Vec::with_capacity(requests.len());
    let mut failures = Vec::new();

    for request in requests {
        let image = &variants[&request.variant];
        match backend.save(image, &request.path) {
            Ok(dimensions) => {
                debug!(
                    path = %request.path.display(),
                    variant = %request.variant,
                    %dimensions,
                    "wrote output"
                );
                emit(
                    events,
                    PipelineEvent::OutputWritten {
                        path: request.path.clone(),
                        variant: request.variant,
                        dimensions,
                    },
                );
                outputs.push(WrittenOutput {
                    path: request.path.clone(),
                    variant: request.variant,
                    dimensions,
                });
            }
            Err(error) => {
                warn!(path = %request.path.display(), %error, "write failed");
                emit(
                    events,
                    PipelineEvent::OutputFailed {
                        path: request.path.clone(),
                        variant: request.variant,
                        error: error.to_string(),
                    },
                );
                failures.push(WriteFailure {
                    path: request.path.clone(),
                    variant: request.variant,
                    error,
                });
                if options.fail_fast {
                    break;
                }
            }
        }
    }

    if !failures.is_empty() {
        return Err(PipelineError::Write { failures });
    }

    info!(written = outputs.len(), "images processed and saved");
    emit(
        events,
        PipelineEvent::Completed {
            written: outputs.len(),
        },
    );

    Ok(PipelineReport {
        source: input.to_path_buf(),
        source_dimensions: dims,
        margin: Margin::DEFAULT.value(),
        cropped_dimensions: Dimensions::new(region.width, region.height),
        outputs,
    })
}
