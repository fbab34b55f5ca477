//! Serializers and derived views handed to sharing and download collaborators.

pub mod tasks;
pub mod text;

pub use tasks::{flatten_tasks, statistics, FlatTask, SortField, Statistics, TaskQuery};
pub use text::{render_report, share_text};

use crate::analysis::AnalysisResult;
use crate::error::AppResult;

pub fn to_json(result: &AnalysisResult) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
