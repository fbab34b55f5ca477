use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::bootstrap::AppPaths;
use crate::config::schema::{AppConfig, OutputFormat};
use crate::error::{AppError, AppResult};

const MAX_SIMULATED_LATENCY_MS: u64 = 60_000;

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub simulated_latency_ms: Option<u64>,
}

pub fn load_config(paths: &AppPaths, overrides: &CliOverrides) -> AppResult<AppConfig> {
    let config_path = overrides
        .config_path
        .clone()
        .unwrap_or_else(|| paths.config_file.clone());

    let mut config = if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)?;
        toml::from_str::<AppConfig>(&raw)?
    } else {
        let defaults = AppConfig::default();
        write_default_config(&config_path, &defaults)?;
        defaults
    };

    apply_env_overrides(&mut config);
    apply_cli_overrides(&mut config, overrides);

    validate(&config)?;
    Ok(config)
}

fn write_default_config(path: &Path, defaults: &AppConfig) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let data = toml::to_string_pretty(defaults)?;
    std::fs::write(path, data)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}

fn validate(config: &AppConfig) -> AppResult<()> {
    if config.analysis.simulated_latency_ms > MAX_SIMULATED_LATENCY_MS {
        return Err(AppError::Config(format!(
            "analysis.simulated_latency_ms must be <= {MAX_SIMULATED_LATENCY_MS}"
        )));
    }

    if EnvFilter::try_new(&config.diagnostics.log_level).is_err() {
        return Err(AppError::Config(format!(
            "diagnostics.log_level `{}` is not a valid filter directive",
            config.diagnostics.log_level
        )));
    }

    let names = config
        .gazetteer
        .first_names
        .iter()
        .chain(&config.gazetteer.last_names);
    for name in names {
        if name.trim().is_empty() || name.split_whitespace().count() > 1 {
            return Err(AppError::Config(format!(
                "gazetteer names must be single words, got `{name}`"
            )));
        }
    }

    Ok(())
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(value) = std::env::var("QUORUM_SIMULATED_LATENCY_MS") {
        if let Ok(parsed) = value.trim().parse::<u64>() {
            config.analysis.simulated_latency_ms = parsed;
        }
    }
    if let Ok(value) = std::env::var("QUORUM_OUTPUT_FORMAT") {
        if let Some(parsed) = parse_output_format(&value) {
            config.output.format = parsed;
        }
    }
    if let Ok(value) = std::env::var("QUORUM_COPY_TO_CLIPBOARD") {
        if let Some(parsed) = parse_bool(&value) {
            config.output.copy_to_clipboard = parsed;
        }
    }
    if let Ok(value) = std::env::var("QUORUM_FIRST_NAMES") {
        config.gazetteer.first_names.extend(parse_name_list(&value));
    }
    if let Ok(value) = std::env::var("QUORUM_LAST_NAMES") {
        config.gazetteer.last_names.extend(parse_name_list(&value));
    }
    if let Ok(value) = std::env::var("QUORUM_LOG_LEVEL") {
        config.diagnostics.log_level = value;
    }
}

fn apply_cli_overrides(config: &mut AppConfig, overrides: &CliOverrides) {
    if let Some(value) = &overrides.log_level {
        config.diagnostics.log_level = value.clone();
    }
    if let Some(value) = overrides.simulated_latency_ms {
        config.analysis.simulated_latency_ms = value;
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_output_format(value: &str) -> Option<OutputFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "json" => Some(OutputFormat::Json),
        "text" | "report" => Some(OutputFormat::Text),
        "summary" => Some(OutputFormat::Summary),
        _ => None,
    }
}

fn parse_name_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}
