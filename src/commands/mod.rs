//! Command handlers for the tgalign CLI.
//!
//! Each submodule handles one CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod align;
pub mod check;
pub mod completions;
pub mod config;
pub mod metadata;
pub mod split;
pub mod tiers;

use std::path::Path;

use anyhow::Result;

use tgalign::diagnostics::Severity;
use tgalign::{Config, Finding};

/// Load the config from `--config` when given, else from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// One-line tally of findings, e.g. `2 warnings, 1 error`.
pub fn findings_summary(findings: &[Finding]) -> String {
    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = findings.len() - errors;
    format!(
        "{} warning{}, {} error{}",
        warnings,
        plural(warnings),
        errors,
        plural(errors)
    )
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
