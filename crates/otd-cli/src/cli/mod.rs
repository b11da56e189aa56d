use clap::Parser;
use otd_config::OtdConfig;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `otd` binary.
#[derive(Debug, Parser)]
#[command(
    name = "otd",
    version,
    about = "Feyenoord on this day, from the Nationaal Archief photo collection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (default from config, else json)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve global flags, falling back to `general.default_format`.
    #[must_use]
    pub fn global_flags(&self, config: &OtdConfig) -> GlobalFlags {
        let format = self.format.unwrap_or_else(|| {
            OutputFormat::from_config(&config.general.default_format).unwrap_or_else(|| {
                tracing::warn!(
                    value = %config.general.default_format,
                    "unknown general.default_format; using json"
                );
                OutputFormat::Json
            })
        });
        GlobalFlags {
            format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}
