//! Tiers command handler

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use tgalign::TextGrid;

/// One line per tier: index, name, interval count and labelled count.
pub fn describe_tiers(grid: &TextGrid) -> String {
    let mut out = String::new();
    for (index, tier) in grid.tiers.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}\t{}\t{} intervals ({} labelled)\t{:.2}-{:.2}",
            index,
            tier.name,
            tier.intervals.len(),
            tier.labelled().count(),
            tier.start,
            tier.end
        );
    }
    out
}

/// List the tiers of a TextGrid.
#[cfg(not(tarpaulin_include))]
pub fn handle(textgrid: &Path) -> Result<()> {
    let grid = TextGrid::parse(textgrid)
        .with_context(|| format!("Failed to read {}", textgrid.display()))?;
    print!("{}", describe_tiers(&grid));
    Ok(())
}
