use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerTables;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub gazetteer: GazetteerConfig,
    pub output: OutputConfig,
    pub diagnostics: DiagnosticsConfig,
}

impl AppConfig {
    /// Built-in lookup tables extended with the names listed under `[gazetteer]`.
    pub fn analyzer_tables(&self) -> AnalyzerTables {
        let mut tables = AnalyzerTables::default();
        tables
            .gazetteer
            .extend(&self.gazetteer.first_names, &self.gazetteer.last_names);
        tables
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Artificial wait before analysis, in milliseconds. Zero disables it.
    pub simulated_latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GazetteerConfig {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub copy_to_clipboard: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            copy_to_clipboard: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Json,
    Text,
    Summary,
}

impl OutputFormat {
    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Summary => "summary",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub log_level: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
        }
    }
}
