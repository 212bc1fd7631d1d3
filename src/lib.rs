//! # iconcrop
//!
//! Turn one piece of source artwork into the icon set a web app needs:
//! trim a fixed border, resize twice, write every requested file.
//!
//! # Pipeline
//!
//! ```text
//! load      logo.png             →  W×H raster
//! crop      50px from each edge  →  (W−100)×(H−100)
//! resize    Lanczos3             →  512×512 (large) and 192×192 (small)
//! save      per output request   →  PNG / ICO / JPEG / WebP by extension
//! ```
//!
//! The sequence is strictly linear and single-threaded. The crop runs once
//! and both variants are resized from the same cropped image.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | The load → crop → resize → save sequence, its errors, events and report |
//! | [`request`] | `OutputRequest` (path + variant) and output spec parsing |
//! | [`imaging`] | Backend trait, `image`-crate backend, crop math, ICO encoding |
//! | [`config`] | Optional TOML job file naming the input and outputs |
//! | [`output`] | CLI output formatting for progress events and checks |
//!
//! # Design Decisions
//!
//! ## Fixed Margin
//!
//! The 50px margin is a constant tuned for generated logo artwork whose
//! rounded corners sit inside that band. No border detection is done: a
//! source with a wider or narrower frame needs to be prepared beforehand.
//! Sources with either side of 100px or less are rejected rather than
//! producing an empty crop.
//!
//! ## Explicit Variants
//!
//! Each output carries its variant. The historical rule of "a `192` in the
//! filename means the small icon" is kept only as the default for outputs
//! given without a `large:` or `small:` prefix. It is a plain substring test,
//! so `icon-1920.png` also counts as small; prefix it with `large:` to opt out.
//!
//! ## ICO Frames
//!
//! ICO entries cannot exceed 256×256. An `.ico` output is therefore a
//! multi-resolution favicon whose largest frame is 256px for the large
//! variant and 192px for the small one.
//!
//! ## Write Failures
//!
//! A failed write does not stop the remaining outputs; all failures are
//! reported together and files already written stay on disk. `--fail-fast`
//! restores strict stop-at-first-error behavior.

pub mod config;
pub mod imaging;
pub mod output;
pub mod pipeline;
pub mod request;
