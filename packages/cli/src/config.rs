//! Service settings for the command line.
//!
//! Read from `--config` if given, else from `livedocx/config.json` in the
//! user configuration directory if it exists. The `LIVEDOCX_*` environment
//! variables are applied on top.

use std::path::{Path, PathBuf};

use livedocx_soap::ServiceConfig;

use crate::error::Result;

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("livedocx").join("config.json"))
}

pub fn load(explicit: Option<&Path>) -> Result<ServiceConfig> {
    load_with(explicit, default_path(), |name| std::env::var(name).ok())
}

fn load_with(
    explicit: Option<&Path>,
    default_path: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ServiceConfig> {
    let file = explicit
        .map(Path::to_path_buf)
        .or_else(|| default_path.filter(|path| path.exists()));

    let config = match file {
        Some(path) => ServiceConfig::from_json_file(path)?,
        None => ServiceConfig::default(),
    };
    Ok(config.overlay(lookup)?)
}
