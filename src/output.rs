//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Process
//!
//! ```text
//! Source: design/logo.png (612x612)
//!     Cropped: 512x512 (50px margin)
//!     large 512x512 → public/pwa-512x512.png
//!     small 192x192 → public/pwa-192x192.png
//!     large 256x256 → public/favicon.ico
//! Images processed and saved.
//! ```
//!
//! A failed write shows up in place of its output line:
//!
//! ```text
//!     FAILED large → /readonly/favicon.png: IO error: Permission denied (os error 13)
//! ```
//!
//! ## Check
//!
//! ```text
//! Source: design/logo.png (612x612)
//!     Cropped: 512x512 (50px margin)
//! Input is valid
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` and does no I/O; the
//! `print_*` wrappers write to stdout.

use crate::imaging::{Dimensions, Variant};
use crate::pipeline::{CheckReport, PipelineEvent};
use std::path::Path;

/// Line printed once every output has been written.
pub const COMPLETION_MESSAGE: &str = "Images processed and saved.";

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn source_line(path: &Path, dims: Dimensions) -> String {
    format!("Source: {} ({})", path.display(), dims)
}

fn cropped_line(dims: Dimensions, margin: u32) -> String {
    format!("{}Cropped: {} ({}px margin)", indent(1), dims, margin)
}


/// Format a single pipeline progress event as display lines.
pub fn format_process_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        PipelineEvent::SourceLoaded { path, dimensions } => {
            vec![source_line(path, *dimensions)]
        }
        PipelineEvent::Cropped { region } => vec![cropped_line(
            Dimensions::new(region.width, region.height),
            region.x,
        )],
        PipelineEvent::OutputWritten {
            path,
            variant,
            dimensions,
        } => vec![format!(
            "{}{} {} → {}",
            indent(1),
            variant,
            dimensions,
            path.display()
        )],
        PipelineEvent::OutputFailed {
            path,
            variant,
            error,
        } => vec![format!(
            "{}FAILED {} → {}: {}",
            indent(1),
            variant,
            path.display(),
            error
        )],
        PipelineEvent::Completed { .. } => vec![COMPLETION_MESSAGE.to_string()],
    }
}

/// Format the result of a dry run.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    vec![
        source_line(&report.source, report.source_dimensions),
        cropped_line(report.cropped_dimensions, report.margin),
        "Input is valid".to_string(),
    ]
}

/// Print check output to stdout.
pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::CropRegion;
    use std::path::PathBuf;

    #[test]
    fn source_loaded_line() {
        let lines = format_process_event(&PipelineEvent::SourceLoaded {
            path: PathBuf::from("design/logo.png"),
            dimensions: Dimensions::new(612, 612),
        });
        assert_eq!(lines, vec!["Source: design/logo.png (612x612)"]);
    }

    #[test]
    fn cropped_line_shows_size_and_margin() {
        let lines = format_process_event(&PipelineEvent::Cropped {
            region: CropRegion {
                x: 50,
                y: 50,
                width: 512,
                height: 300,
            },
        });
        assert_eq!(lines, vec!["    Cropped: 512x300 (50px margin)"]);
    }

    #[test]
    fn written_line_shows_variant_and_path() {
        let lines = format_process_event(&PipelineEvent::OutputWritten {
            path: PathBuf::from("public/pwa-192x192.png"),
            variant: Variant::Small,
            dimensions: Dimensions::new(192, 192),
        });
        assert_eq!(lines, vec!["    small 192x192 → public/pwa-192x192.png"]);
    }

    #[test]
    fn written_line_shows_encoded_size() {
        let lines = format_process_event(&PipelineEvent::OutputWritten {
            path: PathBuf::from("public/favicon.ico"),
            variant: Variant::Large,
            dimensions: Dimensions::new(256, 256),
        });
        assert_eq!(lines, vec!["    large 256x256 → public/favicon.ico"]);
    }

    #[test]
    fn failed_line_includes_error() {
        let lines = format_process_event(&PipelineEvent::OutputFailed {
            path: PathBuf::from("/ro/favicon.png"),
            variant: Variant::Large,
            error: "IO error: denied".to_string(),
        });
        assert_eq!(
            lines,
            vec!["    FAILED large → /ro/favicon.png: IO error: denied"]
        );
    }

    #[test]
    fn completed_prints_completion_message() {
        let lines = format_process_event(&PipelineEvent::Completed { written: 4 });
        assert_eq!(lines, vec!["Images processed and saved."]);
    }

    #[test]
    fn check_output_lines() {
        let report = CheckReport {
            source: PathBuf::from("logo.png"),
            source_dimensions: Dimensions::new(700, 500),
            margin: 50,
            cropped_dimensions: Dimensions::new(600, 400),
        };
        assert_eq!(
            format_check_output(&report),
            vec![
                "Source: logo.png (700x500)",
                "    Cropped: 600x400 (50px margin)",
                "Input is valid",
            ]
        );
    }
}
