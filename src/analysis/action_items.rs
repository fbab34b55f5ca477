//! Action item extraction as an ordered chain of strategies.
//!
//! Each strategy is tried only when every strategy before it produced nothing;
//! the last one always yields the canned fallback list, so the chain never
//! comes back empty.

use crate::analysis::model::{ActionItem, Priority, TaskStatus, UNASSIGNED};
use crate::analysis::participants::ParticipantMap;
use crate::analysis::patterns::CuePatterns;
use crate::analysis::tables::{AnalyzerTables, Gazetteer};

/// Items whose task text is this short or shorter are discarded.
pub const MIN_TASK_CHARS: usize = 10;

/// Lines on either side of a line searched for a speaker label.
const CONTEXT_WINDOW: usize = 3;

pub struct ExtractionContext<'a> {
    pub content: &'a str,
    pub lines: Vec<&'a str>,
    pub participants: &'a ParticipantMap,
    pub patterns: &'a CuePatterns,
    pub tables: &'a AnalyzerTables,
}

impl<'a> ExtractionContext<'a> {
    pub fn new(
        content: &'a str,
        participants: &'a ParticipantMap,
        patterns: &'a CuePatterns,
        tables: &'a AnalyzerTables,
    ) -> Self {
        Self {
            content,
            lines: content.lines().collect(),
            participants,
            patterns,
            tables,
        }
    }
}

/// An action item before an id and status are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub task: String,
    pub assignee: String,
    pub due_date: Option<String>,
    pub priority: Priority,
}

impl Candidate {
    fn qualifies(&self) -> bool {
        self.task.chars().count() > MIN_TASK_CHARS
    }
}

pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, context: &ExtractionContext<'_>) -> Vec<Candidate>;
}

pub struct ActionItemExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ActionItemExtractor {
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(LineScan),
            Box::new(SpeakerAssignment),
            Box::new(DecisionsBlock),
            Box::new(StaticFallback),
        ])
    }
}

impl ActionItemExtractor {
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    pub fn extract(&self, context: &ExtractionContext<'_>, id_stamp: i64) -> Vec<ActionItem> {
        for strategy in &self.strategies {
            let mut candidates = strategy.extract(context);
            candidates.retain(Candidate::qualifies);
            if candidates.is_empty() {
                tracing::debug!(tier = strategy.name(), "action item tier produced nothing");
                continue;
            }

            tracing::debug!(
                tier = strategy.name(),
                items = candidates.len(),
                "action item tier selected"
            );
            return candidates
                .into_iter()
                .enumerate()
                .map(|(index, candidate)| ActionItem {
                    id: format!("action-{id_stamp}-{index}"),
                    task: candidate.task,
                    assignee: candidate.assignee,
                    due_date: candidate.due_date,
                    status: TaskStatus::Pending,
                    priority: candidate.priority,
                })
                .collect();
        }

        Vec::new()
    }
}

/// Tier 1: trigger-phrase lines with direct-assignment, direct-address and
/// gazetteer assignee heuristics, in that order.
pub struct LineScan;

impl ExtractionStrategy for LineScan {
    fn name(&self) -> &'static str {
        "line_scan"
    }

    fn extract(&self, context: &ExtractionContext<'_>) -> Vec<Candidate> {
        let patterns = context.patterns;
        let mut candidates = Vec::new();

        for (index, line) in context.lines.iter().enumerate() {
            if patterns.participants_line.is_match(line) || !patterns.action_trigger.is_match(line)
            {
                continue;
            }

            let mut task = patterns.label_prefix.replace(line, "").trim().to_owned();
            let mut assignee = UNASSIGNED.to_owned();

            if let Some(captures) = patterns
                .direct_assignment
                .iter()
                .find_map(|pattern| pattern.captures(line))
            {
                assignee = captures[1].trim().to_owned();
                task = captures[2].trim().to_owned();
            } else if let Some(captures) = patterns.direct_address.captures(line) {
                assignee = captures[1].trim().to_owned();
            } else if let Some(name) = gazetteer_name_in_words(line, &context.tables.gazetteer) {
                assignee = name;
            }

            let assignee = resolve_assignee(assignee, index, &task, context);

            candidates.push(Candidate {
                task,
                assignee,
                due_date: patterns.due_date(line),
                priority: patterns.priority(line),
            });
        }

        candidates
    }
}

/// Tier 2: `XY:` speaker lines that hand work to another participant.
pub struct SpeakerAssignment;

impl ExtractionStrategy for SpeakerAssignment {
    fn name(&self) -> &'static str {
        "speaker_assignment"
    }

    fn extract(&self, context: &ExtractionContext<'_>) -> Vec<Candidate> {
        let patterns = context.patterns;
        let mut candidates = Vec::new();

        for line in &context.lines {
            let Some(label) = patterns.speaker_label.captures(line) else {
                continue;
            };
            let speaker = &label[1];
            let remainder = match label.get(0) {
                Some(prefix) => &line[prefix.end()..],
                None => continue,
            };
            if !patterns.assignment_cue.is_match(remainder) {
                continue;
            }

            let assignee = patterns
                .initials_token
                .find_iter(remainder)
                .map(|token| token.as_str())
                .filter(|token| *token != speaker)
                .find_map(|token| context.participants.full_name_for(token))
                .map(str::to_owned)
                .or_else(|| gazetteer_name_in_text(remainder, &context.tables.gazetteer));
            let Some(assignee) = assignee else {
                continue;
            };

            candidates.push(Candidate {
                task: remainder.trim().to_owned(),
                assignee,
                due_date: patterns.due_date(remainder),
                priority: patterns.priority(remainder),
            });
        }

        candidates
    }
}

/// Tier 3: numbered `<n>. <Name> will <task> by <date>` lines inside a
/// `decisions for today are:` block.
pub struct DecisionsBlock;

impl ExtractionStrategy for DecisionsBlock {
    fn name(&self) -> &'static str {
        "decisions_block"
    }

    fn extract(&self, context: &ExtractionContext<'_>) -> Vec<Candidate> {
        let patterns = context.patterns;
        let Some(block) = patterns
            .decisions_block
            .captures(context.content)
            .and_then(|captures| captures.get(1))
        else {
            return Vec::new();
        };

        block
            .as_str()
            .lines()
            .filter_map(|line| patterns.numbered_assignment.captures(line))
            .map(|captures| Candidate {
                task: captures[2].trim().to_owned(),
                assignee: captures[1].trim().to_owned(),
                due_date: Some(captures[3].trim().to_owned()).filter(|due| !due.is_empty()),
                priority: Priority::Medium,
            })
            .collect()
    }
}

/// Tier 4: the canned list from the analyzer tables.
pub struct StaticFallback;

impl ExtractionStrategy for StaticFallback {
    fn name(&self) -> &'static str {
        "static_fallback"
    }

    fn extract(&self, context: &ExtractionContext<'_>) -> Vec<Candidate> {
        context
            .tables
            .fallbacks
            .action_items
            .iter()
            .map(|item| Candidate {
                task: item.task.clone(),
                assignee: item.assignee.clone(),
                due_date: item.due_date.clone(),
                priority: item.priority,
            })
            .collect()
    }
}

/// Maps an extracted name onto a participant when possible: initials first,
/// then exact full names, then a unique first name, and finally the last
/// participant label found within the surrounding lines.
fn resolve_assignee(
    assignee: String,
    line_index: usize,
    task: &str,
    context: &ExtractionContext<'_>,
) -> String {
    let participants = context.participants;
    if let Some(full_name) = participants.full_name_for(&assignee) {
        return full_name.to_owned();
    }
    if participants.is_full_name(&assignee) {
        return assignee;
    }
    if let Some(full_name) = participants.unique_first_name_match(&assignee) {
        return full_name.to_owned();
    }
    if participants.is_empty() || task.is_empty() {
        return assignee;
    }

    let start = line_index.saturating_sub(CONTEXT_WINDOW);
    let end = (line_index + CONTEXT_WINDOW).min(context.lines.len().saturating_sub(1));
    let mut resolved = assignee;
    for index in (start..=end).filter(|index| *index != line_index) {
        let nearby = context.lines[index];
        if let Some(participant) = participants
            .entries()
            .iter()
            .find(|participant| nearby.contains(&format!("{}:", participant.initials)))
        {
            resolved = participant.full_name.clone();
        }
    }
    resolved
}

fn clean_word(word: &str) -> &str {
    word.trim_end_matches(['.', ',', ';', ':', '!', '?'])
}

/// Scans words left to right for a known first name, joining a directly
/// following known last name.
fn gazetteer_name_in_words(text: &str, gazetteer: &Gazetteer) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().map(clean_word).collect();
    let (index, first) = words
        .iter()
        .enumerate()
        .find(|(_, word)| gazetteer.is_first_name(word))?;
    Some(join_with_last_name(first, words.get(index + 1).copied(), gazetteer))
}

/// Looks for gazetteer first names in list order rather than text order.
fn gazetteer_name_in_text(text: &str, gazetteer: &Gazetteer) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().map(clean_word).collect();
    gazetteer.first_names.iter().find_map(|name| {
        let index = words.iter().position(|word| word == name)?;
        Some(join_with_last_name(
            name,
            words.get(index + 1).copied(),
            gazetteer,
        ))
    })
}

fn join_with_last_name(first: &str, next: Option<&str>, gazetteer: &Gazetteer) -> String {
    match next {
        Some(last) if gazetteer.is_last_name(last) => format!("{first} {last}"),
        _ => first.to_owned(),
    }
}
