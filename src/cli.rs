//! CLI definitions for tgalign
//!
//! The clap structure lives apart from main.rs so tests can parse argument
//! lists without running a command.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use tgalign::textgrid::TierSelector;
use tgalign::validate::Numbering;

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: placeholders and valid values
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

fn parse_tier(value: &str) -> Result<TierSelector, String> {
    Ok(TierSelector::parse(value))
}

#[derive(Parser)]
#[command(name = "tgalign")]
#[command(about = "Align transcripts with TextGrid word timings and cut audio into clips")]
#[command(
    long_about = "tgalign - turn a forced-alignment TextGrid and its transcript into clips.

A forced aligner gives word-level timings; tgalign finds which run of words
each transcript line covers, merges lines into clip-sized blocks, checks the
resulting timestamp file and cuts the audio along it with ffmpeg.

WORKFLOW:
    tgalign align RJ01_a.TextGrid         Writes RJ01_a.lines.txt and RJ01_a.aligned.txt
    tgalign check RJ01_a.aligned.txt      Writes RJ01_a.ok.txt
    tgalign split RJ01_a.mp3              Cuts clips into RJ01/
    tgalign metadata RJ01                 Writes RJ01/metadata.csv

Problems found along the way are logged as warnings and never stop a run.
Use -v for per-segment detail or RUST_LOG for fine-grained filtering."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Use this config file instead of ~/.config/tgalign/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Verbosity passed to the log setup: -1 quiet, 0 default, 1+ verbose.
    pub fn verbosity(&self) -> i8 {
        if self.quiet {
            -1
        } else {
            self.verbose.min(2) as i8
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align transcript lines against TextGrid word timings
    #[command(long_about = "Align each transcript line against the word tier of a TextGrid.

For every TextGrid the transcript next to it (same stem, .txt) is read, each
non-blank line is matched against the word intervals in order, and two
files are written next to the TextGrid:

    <stem>.lines.txt      one line per transcript line with its time range
    <stem>.aligned.txt    lines merged into blocks of at most merge.max_span

Existing outputs are kept unless --force is given. Directories are expanded
to the TextGrid files they contain and processed in parallel.

EXAMPLES:
    tgalign align RJ01_a.TextGrid
    tgalign align RJ01_a.TextGrid --transcript script.txt --tier words
    tgalign align corpus/ --jobs 4 --report align.json")]
    Align {
        /// TextGrid files or directories
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Transcript to use instead of <stem>.txt (single TextGrid only)
        #[arg(long, value_name = "FILE")]
        transcript: Option<PathBuf>,

        /// Word tier by name or zero-based index (overrides config)
        #[arg(long, value_parser = parse_tier, value_name = "NAME|INDEX")]
        tier: Option<TierSelector>,

        /// Overwrite existing outputs
        #[arg(long, short)]
        force: bool,

        /// Write a JSON report of counts and findings
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Number of worker threads (default: one per core)
        #[arg(long, short, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Check an aligned timestamp file
    #[command(long_about = "Check a merged <stem>.aligned.txt file line by line.

Times must be mm:ss.cc. Per-line <stem>.lines.txt files switch to
hh:mm:ss.cc after one hour and are not meant as input here.

Lines that cannot be read, run backwards or span more than
validation.max_span seconds are reported and dropped. Surviving lines are
written to <stem>.ok.txt with their times re-rendered.

EXAMPLES:
    tgalign check RJ01_a.aligned.txt
    tgalign check RJ01_a.aligned.txt --output clips.txt --numbering contiguous")]
    Check {
        /// Aligned file to check
        file: PathBuf,

        /// Output path (default: <stem>.ok.txt)
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing output
        #[arg(long, short)]
        force: bool,

        /// Write a JSON report of counts and findings
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Keep source line numbers or renumber from 1 (overrides config)
        #[arg(long, value_enum)]
        numbering: Option<Numbering>,
    },

    /// Cut audio into clips along checked timestamps
    #[command(long_about = "Cut an audio file into one clip per checked timestamp entry.

Entries are read from <audio stem>.ok.txt unless --timestamps is given. Each
clip is written as <stem>_<n>.<ext> with a <stem>_<n>.txt sidecar holding
its text. By default clips go to a directory named after the part of the
audio stem matching split.group_pattern.

A failed cut is reported and the remaining clips are still cut.

EXAMPLES:
    tgalign split RJ01_a.mp3
    tgalign split RJ01_a.mp3 --timestamps RJ01_a.ok.txt --output-dir clips")]
    Split {
        /// Audio file to cut
        audio: PathBuf,

        /// Checked timestamp file (default: <audio stem>.ok.txt)
        #[arg(long, value_name = "FILE")]
        timestamps: Option<PathBuf>,

        /// Directory for clips (default: derived from the audio stem)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Write a JSON report of clips and findings
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// List the tiers of a TextGrid
    Tiers {
        /// TextGrid file
        textgrid: PathBuf,
    },

    /// Write metadata.csv for a directory of clips
    #[command(long_about = "Pair each clip in a directory with its .txt sidecar and write
metadata.csv with the columns file_name and sentence.

EXAMPLES:
    tgalign metadata RJ01
    tgalign metadata RJ01 --extension wav --remove-sidecars")]
    Metadata {
        /// Directory holding clips and sidecars
        dir: PathBuf,

        /// Clip file extension
        #[arg(long, default_value = tgalign::dataset::DEFAULT_CLIP_EXTENSION)]
        extension: String,

        /// Delete sidecars once metadata.csv is written
        #[arg(long)]
        remove_sidecars: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions (internal use)
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

Every field is preceded by a comment describing it. Fields missing from the
config file show their defaults.

EXAMPLE:
    tgalign config show
    tgalign --config ./project.toml config show")]
    Show,
    /// Print the config file location
    Path,
}
