//! Config subcommands handler

use std::path::{Path, PathBuf};

use anyhow::Result;

use tgalign::Config;

/// Show the effective configuration as TOML with documentation comments.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", config.to_annotated_toml()?);
    Ok(())
}

/// The file a run reads its configuration from.
pub fn effective_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Print the config file location and whether it exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(explicit: Option<&Path>) -> Result<()> {
    let path = effective_path(explicit)?;
    if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{} (not found, using defaults)", path.display());
    }
    Ok(())
}
