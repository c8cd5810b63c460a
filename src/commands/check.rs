//! Check command handler

use std::path::Path;

use anyhow::{Context, Result};

use tgalign::files::WritePolicy;
use tgalign::pipeline::{self, CheckReport};
use tgalign::validate::Numbering;
use tgalign::Config;

use super::findings_summary;

fn print_report(report: &CheckReport) {
    let status = if report.written {
        format!("wrote {}", report.output.display())
    } else {
        format!("{} exists, kept", report.output.display())
    };
    println!(
        "{}: {}/{} lines kept, {} ({})",
        report.input.display(),
        report.kept,
        report.checked,
        findings_summary(&report.findings),
        status
    );
}

/// Check an aligned file and write the lines that pass.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    config: &Config,
    file: &Path,
    output: Option<&Path>,
    force: bool,
    report: Option<&Path>,
    numbering: Option<Numbering>,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(numbering) = numbering {
        config.validation.numbering = numbering;
    }

    let result = pipeline::validate_file(file, output, &config, WritePolicy::from_force(force))
        .with_context(|| format!("Failed to check {}", file.display()))?;
    print_report(&result);

    if let Some(path) = report {
        pipeline::write_report(path, "check", &result)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }
    Ok(())
}
