use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::analysis::Priority;
use crate::config::{CliOverrides, OutputFormat};
use crate::export::SortField;

#[derive(Debug, Parser)]
#[command(name = "quorum")]
#[command(about = "Extract action items, decisions and entities from meeting transcripts")]
pub struct Cli {
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Default tracing filter, e.g. `debug` or `quorum=trace`. `RUST_LOG` still wins.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[arg(long, global = true)]
    pub simulated_latency_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a transcript and print the result.
    Analyze(AnalyzeArgs),
    /// Print the flattened task list of a transcript.
    Tasks(TasksArgs),
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Transcript file, or `-` for stdin.
    pub input: PathBuf,

    /// Defaults to `output.format` from the configuration.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Clone, Args)]
pub struct TasksArgs {
    /// Transcript file, or `-` for stdin.
    pub input: PathBuf,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    #[arg(long, value_enum, default_value_t = SortField::Name)]
    pub sort: SortField,

    #[arg(long)]
    pub desc: bool,

    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn to_overrides(&self) -> CliOverrides {
        CliOverrides {
            config_path: self.config.clone(),
            log_level: self.log_level.clone(),
            simulated_latency_ms: self.simulated_latency_ms,
        }
    }
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    Priority::parse(raw)
        .ok_or_else(|| format!("unknown priority `{raw}` (use low, medium or high)"))
}
