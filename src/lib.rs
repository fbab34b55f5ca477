pub mod analysis;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod output;
#[cfg(test)]
mod test_support;

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::analysis::{AnalysisResult, Analyzer, Transcript};
use crate::bootstrap::AppPaths;
use crate::cli::{AnalyzeArgs, Cli, Command, TasksArgs};
use crate::config::{load_config, AppConfig, OutputFormat};
use crate::error::{AppError, AppResult};
use crate::export::{FlatTask, TaskQuery};
use crate::output::ClipboardOutput;

const STDIN_MARKER: &str = "-";

trait CommandExecutor {
    fn analyze(&self, analyzer: &Analyzer, config: &AppConfig, args: &AnalyzeArgs)
        -> AppResult<()>;
    fn tasks(&self, analyzer: &Analyzer, config: &AppConfig, args: &TasksArgs) -> AppResult<()>;
    fn show_config(&self, config: &AppConfig) -> AppResult<()>;
}

struct DefaultCommandExecutor;

impl CommandExecutor for DefaultCommandExecutor {
    fn analyze(
        &self,
        analyzer: &Analyzer,
        config: &AppConfig,
        args: &AnalyzeArgs,
    ) -> AppResult<()> {
        let transcript = read_transcript(&args.input)?;
        let result = run_analysis(analyzer, config, &transcript);
        let format = args.format.unwrap_or(config.output.format);
        let rendered = render(&result, format)?;

        match &args.output {
            Some(path) => {
                std::fs::write(path, &rendered)?;
                tracing::info!(path = %path.display(), "analysis written");
            }
            None => println!("{rendered}"),
        }

        if args.copy || config.output.copy_to_clipboard {
            ClipboardOutput::copy_export(&rendered, format)?;
            tracing::info!(format = format.label(), "analysis copied to clipboard");
        }
        Ok(())
    }

    fn tasks(&self, analyzer: &Analyzer, config: &AppConfig, args: &TasksArgs) -> AppResult<()> {
        let transcript = read_transcript(&args.input)?;
        let result = run_analysis(analyzer, config, &transcript);
        let query = TaskQuery {
            search: args.search.clone(),
            priority: args.priority,
            sort: args.sort,
            descending: args.desc,
        };
        let tasks = export::flatten_tasks(&result.task_table, &query);
        println!("{}", render_tasks(&result, &tasks, args.json)?);
        Ok(())
    }

    fn show_config(&self, config: &AppConfig) -> AppResult<()> {
        print!("{}", toml::to_string_pretty(config)?);
        Ok(())
    }
}

fn execute_command<E: CommandExecutor>(
    command: Command,
    analyzer: &Analyzer,
    config: &AppConfig,
    executor: &E,
) -> AppResult<()> {
    match command {
        Command::Analyze(args) => executor.analyze(analyzer, config, &args),
        Command::Tasks(args) => executor.tasks(analyzer, config, &args),
        Command::Config => executor.show_config(config),
    }
}

/// Reads a transcript from a file, or from stdin when `input` is `-`.
fn read_transcript(input: &Path) -> AppResult<Transcript> {
    if input == Path::new(STDIN_MARKER) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|error| decode_error(error, "stdin"))?;
        return Ok(Transcript::from_text("stdin", content));
    }

    let content = std::fs::read_to_string(input)
        .map_err(|error| decode_error(error, &input.display().to_string()))?;
    let title = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let mut transcript = Transcript::from_text(&title, content);
    transcript.source_file = input.display().to_string();
    Ok(transcript)
}

fn decode_error(error: std::io::Error, source: &str) -> AppError {
    if error.kind() == std::io::ErrorKind::InvalidData {
        AppError::Input(format!("{source} is not valid UTF-8 text"))
    } else {
        AppError::Io(error)
    }
}

fn run_analysis(
    analyzer: &Analyzer,
    config: &AppConfig,
    transcript: &Transcript,
) -> AnalysisResult {
    if transcript.content.trim().is_empty() {
        tracing::warn!(
            title = %transcript.title,
            "transcript is empty, results will be canned fallbacks"
        );
    }

    let latency = config.analysis.simulated_latency_ms;
    if latency > 0 {
        tracing::debug!(latency_ms = latency, "simulating analysis latency");
        std::thread::sleep(Duration::from_millis(latency));
    }

    let result = analyzer.analyze(transcript);
    tracing::info!(
        title = %transcript.title,
        action_items = result.action_items.len(),
        decisions = result.key_decisions.len(),
        "analysis complete"
    );
    result
}

fn render(result: &AnalysisResult, format: OutputFormat) -> AppResult<String> {
    Ok(match format {
        OutputFormat::Json => export::to_json(result)?,
        OutputFormat::Text => export::render_report(result),
        OutputFormat::Summary => result.summary.clone(),
    })
}

fn render_tasks(result: &AnalysisResult, tasks: &[FlatTask], json: bool) -> AppResult<String> {
    if json {
        return Ok(serde_json::to_string_pretty(tasks)?);
    }

    let stats = export::statistics(&result.task_table);
    let mut out = format!(
        "{} tasks, {} high priority, {:.1} per person\n",
        stats.total_tasks, stats.high_priority_tasks, stats.tasks_per_person
    );
    out.push_str(&format!(
        "{:<24} {:<8} {:<12} {:<16} {}\n",
        "ASSIGNEE", "PRIORITY", "ASSIGNED", "DEADLINE", "TASK"
    ));
    for task in tasks {
        out.push_str(&format!(
            "{:<24} {:<8} {:<12} {:<16} {}\n",
            task.assignee, task.priority, task.assigned_date, task.deadline, task.task
        ));
    }
    Ok(out.trim_end().to_owned())
}

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact()
        .init();
}

pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let paths = AppPaths::resolve()?;
    paths.ensure_dirs()?;

    let config = load_config(&paths, &cli.to_overrides())?;
    init_tracing(&config.diagnostics.log_level);
    tracing::debug!(config_file = %paths.config_file.display(), "configuration loaded");

    let analyzer = Analyzer::new(config.analyzer_tables())?;

    execute_command(cli.command, &analyzer, &config, &DefaultCommandExecutor)
}
