use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `revq` binary.
#[derive(Debug, Parser)]
#[command(name = "revq", version, about = "revq - peer-review assignment for article catalogs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to auto-detect via .revq)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Reviewer credential id
    #[arg(short, long, global = true, env = "REVQ_REVIEWER_ID")]
    pub reviewer: Option<String>,

    /// Reviewer display name, matched case-insensitively
    #[arg(short, long, global = true, env = "REVQ_REVIEWER_NAME")]
    pub name: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
            reviewer: self.reviewer.clone(),
            name: self.name.clone(),
        }
    }
}
