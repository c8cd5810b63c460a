//! tgalign library
//!
//! Aligns transcript lines against the word timings of a Praat TextGrid,
//! merges aligned lines into clip-sized blocks, checks the resulting
//! timestamp files and cuts audio along them.

pub mod align;
pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod files;
pub mod logging;
pub mod pipeline;
pub mod split;
pub mod textgrid;
pub mod timestamp;
pub mod validate;

pub use config::Config;
pub use diagnostics::{Finding, FindingKind, Findings};
pub use pipeline::{AlignJob, AlignOutcome, PipelineError};
pub use textgrid::{TextGrid, TextGridError};
