//! TextGrid writer for the long text format.
//!
//! Produces exactly the layout the reader expects, so a written file parses
//! back to an equal document and re-serializes byte for byte.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::types::TextGrid;

/// Format a time value the way Praat tooling does: shortest round-trip
/// representation, with `.0` kept on integral values.
fn format_time(value: f64) -> String {
    format!("{:?}", value)
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

impl TextGrid {
    /// Write the TextGrid to a path.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut file =
            fs::File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;

        self.write_to(&mut file)
    }

    /// Write the TextGrid to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.render().as_bytes())?;
        Ok(())
    }

    /// Render the document to a string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render_into(&mut out);
        out
    }

    fn render_into<O: std::fmt::Write>(&self, out: &mut O) -> std::fmt::Result {
        writeln!(out, "File type = \"ooTextFile\"")?;
        writeln!(out, "Object class = \"TextGrid\"")?;
        writeln!(out)?;
        writeln!(out, "xmin = {}", format_time(self.start))?;
        writeln!(out, "xmax = {}", format_time(self.end))?;
        writeln!(out, "tiers? <exists>")?;
        writeln!(out, "size = {}", self.tiers.len())?;
        writeln!(out, "item []:")?;

        for (i, tier) in self.tiers.iter().enumerate() {
            writeln!(out, "    item [{}]:", i + 1)?;
            writeln!(out, "        class = \"IntervalTier\"")?;
            writeln!(out, "        name = {}", quote(&tier.name))?;
            writeln!(out, "        xmin = {}", format_time(tier.start))?;
            writeln!(out, "        xmax = {}", format_time(tier.end))?;
            writeln!(out, "        intervals: size = {}", tier.intervals.len())?;
            for (j, interval) in tier.intervals.iter().enumerate() {
                writeln!(out, "        intervals [{}]:", j + 1)?;
                writeln!(out, "            xmin = {}", format_time(interval.start))?;
                writeln!(out, "            xmax = {}", format_time(interval.end))?;
                writeln!(out, "            text = {}", quote(&interval.text))?;
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for TextGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.render_into(f)
    }
}
