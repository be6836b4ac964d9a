//! `urlforge build <PART>...` – assemble and print a URL.

use anyhow::{Context, Result};
use urlforge_core::config::UrlforgeConfig;
use urlforge_core::params::insert_assignment;
use urlforge_core::{build_url, BuildOptions, ParametersMap, PathParts};

#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    pub parts: Vec<String>,
    pub params: Vec<String>,
    pub params_json: Option<String>,
    pub no_defaults: bool,
}

/// Merges parameters (config defaults < `--params-json` < `-p`) and builds the URL.
pub fn run_build(cfg: &UrlforgeConfig, args: BuildArgs) -> Result<String> {
    let mut parameters = if args.no_defaults {
        ParametersMap::new()
    } else {
        cfg.parameters.clone()
    };

    if let Some(json) = &args.params_json {
        let from_json: ParametersMap =
            serde_json::from_str(json).context("--params-json must be a JSON object")?;
        parameters.extend(from_json);
    }

    for arg in &args.params {
        insert_assignment(&mut parameters, arg).with_context(|| format!("invalid --param {arg:?}"))?;
    }

    let mut parts = PathParts::default();
    if let Some(base) = cfg.base_url.as_ref().filter(|_| !args.no_defaults) {
        parts.push(base.as_str());
    }
    for part in args.parts {
        parts.push(part);
    }

    tracing::debug!(parts = ?parts, parameters = ?parameters, "building url");
    Ok(build_url(parts, BuildOptions::with_parameters(parameters)))
}
