//! `urlforge config` – show where the config lives and what it contains.

use anyhow::Result;
use urlforge_core::config::{self, UrlforgeConfig};

pub fn run_config(cfg: &UrlforgeConfig) -> Result<String> {
    let path = config::config_path()?;
    let body = toml::to_string_pretty(cfg)?;
    Ok(format!("# {}\n{}", path.display(), body))
}
