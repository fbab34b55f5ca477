pub mod action_items;
pub mod decisions;
pub mod entities;
pub mod model;
pub mod participants;
pub mod patterns;
pub mod summary;
pub mod tables;
pub mod task_table;

use chrono::{DateTime, Utc};

pub use action_items::{ActionItemExtractor, ExtractionStrategy};
pub use model::{
    ActionItem, AnalysisResult, Entities, EntityKind, Priority, TaskStatus, TaskTable,
    TaskTableRow, Transcript,
};
pub use participants::ParticipantMap;
pub use tables::{AnalyzerTables, Fallbacks, Gazetteer};

use crate::analysis::action_items::{ExtractionContext, MIN_TASK_CHARS};
use crate::analysis::patterns::CuePatterns;
use crate::error::{AppError, AppResult};

/// The transcript analyzer. Immutable once built and safe to share between
/// threads; every call works on its own input and allocates a fresh result.
pub struct Analyzer {
    patterns: CuePatterns,
    tables: AnalyzerTables,
    action_items: ActionItemExtractor,
}

impl Analyzer {
    pub fn new(tables: AnalyzerTables) -> AppResult<Self> {
        validate_tables(&tables)?;
        Ok(Self {
            patterns: CuePatterns::compile()?,
            tables,
            action_items: ActionItemExtractor::default(),
        })
    }

    pub fn with_defaults() -> AppResult<Self> {
        Self::new(AnalyzerTables::default())
    }

    pub fn tables(&self) -> &AnalyzerTables {
        &self.tables
    }

    pub fn analyze(&self, transcript: &Transcript) -> AnalysisResult {
        self.analyze_at(transcript, Utc::now())
    }

    /// Same as [`Analyzer::analyze`] with an explicit clock; ids, `created_at`
    /// and the task table's assigned date derive from `now`.
    pub fn analyze_at(&self, transcript: &Transcript, now: DateTime<Utc>) -> AnalysisResult {
        let content = transcript.content.as_str();
        let stamp = now.timestamp_millis();

        let participants = self.participants(content);
        let context = ExtractionContext::new(content, &participants, &self.patterns, &self.tables);
        let action_items = self.action_items.extract(&context, stamp);
        let key_decisions =
            decisions::extract_decisions(content, &self.patterns, &self.tables.fallbacks);
        let entities = entities::extract_all(content, &participants, &self.patterns, &self.tables);
        let summary = summary::generate_summary(content, &self.patterns);
        let task_table =
            task_table::build_task_table(&action_items, &participants, now.date_naive());

        tracing::debug!(
            transcript_id = %transcript.id,
            participants = participants.len(),
            action_items = action_items.len(),
            decisions = key_decisions.len(),
            "transcript analyzed"
        );

        AnalysisResult {
            id: format!("analysis-{stamp}"),
            transcript_id: transcript.id.clone(),
            summary,
            key_decisions,
            action_items,
            task_table,
            entities,
            created_at: now.to_rfc3339(),
        }
    }

    pub fn participants(&self, content: &str) -> ParticipantMap {
        ParticipantMap::parse(content, &self.patterns)
    }

    pub fn entities(&self, content: &str, kind: EntityKind) -> Vec<String> {
        let participants = self.participants(content);
        entities::extract_entities(content, kind, &participants, &self.patterns, &self.tables)
    }
}

/// The fallback lists back the never-empty guarantees, so they must be
/// non-empty and their tasks long enough to survive filtering.
fn validate_tables(tables: &AnalyzerTables) -> AppResult<()> {
    let fallbacks = &tables.fallbacks;
    let required = [
        ("fallbacks.action_items", fallbacks.action_items.is_empty()),
        ("fallbacks.decisions", fallbacks.decisions.is_empty()),
        ("fallbacks.people", fallbacks.people.is_empty()),
        ("fallbacks.organizations", fallbacks.organizations.is_empty()),
        ("fallbacks.dates", fallbacks.dates.is_empty()),
        ("fallbacks.topics", fallbacks.topics.is_empty()),
    ];
    if let Some((name, _)) = required.iter().find(|(_, empty)| *empty) {
        return Err(AppError::Config(format!("{name} must not be empty")));
    }

    if let Some(item) = fallbacks
        .action_items
        .iter()
        .find(|item| item.task.chars().count() <= MIN_TASK_CHARS)
    {
        return Err(AppError::Config(format!(
            "fallback action item `{}` must be longer than {MIN_TASK_CHARS} characters",
            item.task
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Analyzer, AnalyzerTables, Transcript};
    use crate::analysis::model::{EntityKind, Priority};
    use crate::analysis::tables::FallbackActionItem;
    use crate::error::AppError;
    use chrono::{TimeZone, Utc};

    fn transcript(content: &str) -> Transcript {
        Transcript {
            id: "transcript-1".to_owned(),
            title: "Weekly sync".to_owned(),
            content: content.to_owned(),
            source_file: "weekly.txt".to_owned(),
            created_at: "2026-10-19T09:00:00Z".to_owned(),
            updated_at: None,
        }
    }

    #[test]
    fn analyze_at_derives_time_fields_from_clock() {
        let analyzer = Analyzer::with_defaults().expect("analyzer");
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 30, 0).single().expect("time");
        let result = analyzer.analyze_at(&transcript("Hello. How are you."), now);

        assert_eq!(result.id, format!("analysis-{}", now.timestamp_millis()));
        assert_eq!(result.transcript_id, "transcript-1");
        assert_eq!(result.created_at, now.to_rfc3339());
        assert!(result
            .task_table
            .rows
            .iter()
            .all(|row| row.assigned_date == "2026-10-19"));
    }

    #[test]
    fn task_table_is_built_from_extracted_items() {
        let analyzer = Analyzer::with_defaults().expect("analyzer");
        let result = analyzer.analyze(&transcript(
            "Participants: Tom Wilson (TW), Jane Smith (JS)\n\
             TW: Jane, please review the budget by next Friday. This is urgent.\n\
             JS: Tom, can you update the roadmap slides when you have time?",
        ));

        assert_eq!(result.action_items.len(), 2);
        assert_eq!(result.task_table.metadata.total_tasks, 2);
        assert_eq!(result.task_table.metadata.high_priority_tasks, 1);
        assert_eq!(result.task_table.metadata.tasks_with_deadlines, 1);
        let jane = result
            .task_table
            .rows
            .iter()
            .find(|row| row.assignee == "Jane Smith")
            .expect("jane row");
        assert_eq!(jane.priority, Priority::High);
        let tom = result
            .task_table
            .rows
            .iter()
            .find(|row| row.assignee == "Tom Wilson")
            .expect("tom row");
        assert_eq!(tom.priority, Priority::Low);
    }

    #[test]
    fn entities_accessor_matches_full_analysis() {
        let analyzer = Analyzer::with_defaults().expect("analyzer");
        let content = "Participants: Priya Nair (PN)\nPN: Amit will share the report.";
        let result = analyzer.analyze(&transcript(content));
        assert_eq!(
            analyzer.entities(content, EntityKind::People),
            result.entities.people
        );
        assert_eq!(result.entities.people, vec!["Priya Nair", "Amit"]);
    }

    #[test]
    fn substituted_fallback_items_are_emitted_as_given() {
        let mut tables = AnalyzerTables::default();
        tables.fallbacks.action_items = vec![FallbackActionItem {
            task: "Circulate the meeting notes".to_owned(),
            assignee: "Facilitator".to_owned(),
            due_date: None,
            priority: Priority::Low,
        }];
        let analyzer = Analyzer::new(tables).expect("analyzer");
        let result = analyzer.analyze(&transcript("Hello. How are you."));

        assert_eq!(result.action_items.len(), 1);
        let item = &result.action_items[0];
        assert_eq!(item.task, "Circulate the meeting notes");
        assert_eq!(item.assignee, "Facilitator");
        assert_eq!(item.due_date, None);
        assert_eq!(item.priority, Priority::Low);
    }

    #[test]
    fn empty_fallback_lists_are_rejected() {
        let mut tables = AnalyzerTables::default();
        tables.fallbacks.decisions.clear();
        let error = Analyzer::new(tables).err().expect("must fail");
        assert!(matches!(
            error,
            AppError::Config(message) if message.contains("fallbacks.decisions")
        ));
    }

    #[test]
    fn short_fallback_tasks_are_rejected() {
        let mut tables = AnalyzerTables::default();
        tables.fallbacks.action_items[0].task = "too short".to_owned();
        let error = Analyzer::new(tables).err().expect("must fail");
        assert!(matches!(error, AppError::Config(message) if message.contains("too short")));
    }
}
