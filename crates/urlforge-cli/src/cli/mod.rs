//! CLI for the urlforge URL builder.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use urlforge_core::config;

use commands::{run_build, run_config, BuildArgs};

/// Top-level CLI for urlforge.
#[derive(Debug, Parser)]
#[command(name = "urlforge")]
#[command(about = "urlforge: assemble normalized URLs from path parts and parameters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Build a URL and print it.
    Build {
        /// Path parts, joined in order (the first may carry a `scheme://`).
        #[arg(required = true, value_name = "PART")]
        parts: Vec<String>,

        /// Query parameter as KEY=VALUE; KEY[]=VALUE appends to a list. Repeatable.
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Parameters as a JSON object, e.g. '{"id": 5, "tags": ["a", "b"]}'.
        #[arg(long, value_name = "JSON")]
        params_json: Option<String>,

        /// Ignore `base_url` and default parameters from the config file.
        #[arg(long)]
        no_defaults: bool,
    },

    /// Show the config file location and its effective contents.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Build {
                parts,
                params,
                params_json,
                no_defaults,
            } => {
                let args = BuildArgs {
                    parts,
                    params,
                    params_json,
                    no_defaults,
                };
                println!("{}", run_build(&cfg, args)?);
            }
            CliCommand::Config => print!("{}", run_config(&cfg)?),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
