//! tgalign - CLI entry point

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};
use commands::load_config;

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    tgalign::logging::init(cli.verbosity());

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Align {
            paths,
            transcript,
            tier,
            force,
            report,
            jobs,
        } => commands::align::handle(
            &load_config(config_path)?,
            &paths,
            transcript.as_deref(),
            tier,
            force,
            report.as_deref(),
            jobs,
        ),
        Commands::Check {
            file,
            output,
            force,
            report,
            numbering,
        } => commands::check::handle(
            &load_config(config_path)?,
            &file,
            output.as_deref(),
            force,
            report.as_deref(),
            numbering,
        ),
        Commands::Split {
            audio,
            timestamps,
            output_dir,
            report,
        } => commands::split::handle(
            &load_config(config_path)?,
            &audio,
            timestamps.as_deref(),
            output_dir.as_deref(),
            report.as_deref(),
        ),
        Commands::Tiers { textgrid } => commands::tiers::handle(&textgrid),
        Commands::Metadata {
            dir,
            extension,
            remove_sidecars,
        } => commands::metadata::handle(&dir, &extension, remove_sidecars),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&load_config(config_path)?),
            ConfigCommands::Path => commands::config::handle_path(config_path),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
