//! Declarative cue tables for the extraction stages.
//!
//! Every heuristic the analyzer relies on is listed here as a named pattern so
//! each one can be exercised on its own. Patterns are compiled once, when an
//! [`Analyzer`](crate::analysis::Analyzer) is constructed.

use regex::Regex;

use crate::analysis::model::Priority;
use crate::error::AppResult;

const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
const MONTHS: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";

/// A named date cue. The first non-empty capture group is the due date; the
/// whole match is used when the pattern has no groups.
#[derive(Debug)]
pub struct DateCue {
    pub name: &'static str,
    pub pattern: Regex,
}

#[derive(Debug)]
pub struct CuePatterns {
    pub participants_line: Regex,
    pub participant_entry: Regex,

    pub action_trigger: Regex,
    pub label_prefix: Regex,
    pub direct_assignment: Vec<Regex>,
    pub direct_address: Regex,
    pub date_cues: Vec<DateCue>,
    pub high_priority: Regex,
    pub low_priority: Regex,

    pub speaker_label: Regex,
    pub assignment_cue: Regex,
    pub initials_token: Regex,

    pub decisions_block: Regex,
    pub numbered_assignment: Regex,
    pub decision_indicator: Regex,

    pub agenda: Regex,
    pub topic_word: Regex,
    pub following_capitalized: Regex,
}

impl CuePatterns {
    pub fn compile() -> AppResult<Self> {
        let day_phrase = format!(
            r"(?:(?:next|this)\s+(?:week|month|quarter|{WEEKDAYS})|tomorrow|today|end\s+of\s+(?:the\s+)?(?:day|week|month|quarter)|{WEEKDAYS}|\d[\d/]*)"
        );

        Ok(Self {
            participants_line: Regex::new(r"(?i)Participants:(.+)")?,
            participant_entry: Regex::new(r"([A-Za-z\s]+)\s*\(([A-Z]+)\)")?,

            action_trigger: Regex::new(
                r"(?i)action item|todo|follow[ -]?up|will|assign|please|can you|should|need to|have to",
            )?,
            label_prefix: Regex::new(r"^[^:]*:\s*")?,
            direct_assignment: vec![
                Regex::new(r"(?i)action\s+item\s+(?:for|to)\s+([A-Za-z\s]+):\s*(.+?)$")?,
                Regex::new(r"(?i)task\s+(?:for|to)\s+([A-Za-z\s]+):\s*(.+?)$")?,
            ],
            direct_address: Regex::new(r"(?i)(\w+),\s+(?:please|can you)")?,
            date_cues: vec![
                DateCue {
                    name: "by_phrase",
                    pattern: Regex::new(&format!(r"(?i)\bby\s+({day_phrase})\b"))?,
                },
                DateCue {
                    name: "deadline_phrase",
                    pattern: Regex::new(&format!(
                        r"(?i)\b(?:due(?:\s+(?:on|by))?|deadline(?:\s+is)?:?|complete\s+by|finish\s+by|submit\s+by)\s+({day_phrase})\b"
                    ))?,
                },
                DateCue {
                    name: "month_day",
                    pattern: Regex::new(&format!(
                        r"(?i)\b(?:{MONTHS})\s+\d{{1,2}}(?:st|nd|rd|th)?\b"
                    ))?,
                },
                DateCue {
                    name: "day_month",
                    pattern: Regex::new(&format!(
                        r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS})\b"
                    ))?,
                },
                DateCue {
                    name: "next_period",
                    pattern: Regex::new(r"(?i)\bnext\s+(?:week|month|quarter)\b")?,
                },
            ],
            high_priority: Regex::new(
                r"(?i)urgent|critical|high priority|asap|immediately|right away|crucial",
            )?,
            low_priority: Regex::new(
                r"(?i)low priority|when you have time|not urgent|can wait|if you have time",
            )?,

            speaker_label: Regex::new(r"^([A-Z]{2}):\s*")?,
            assignment_cue: Regex::new(
                r"(?i)\b(?:will|please|should|needs?\s+to|have\s+to|assigned\s+to)\b",
            )?,
            initials_token: Regex::new(r"\b([A-Z]{2})\b")?,

            decisions_block: Regex::new(
                r"(?is)decisions for today are:\s*(.+?)(?:\r?\n[ \t]*\r?\n|\n[a-z]|\z)",
            )?,
            numbered_assignment: Regex::new(
                r"(?i)^\s*\d+\.\s+([A-Za-z\s]+?)\s+will\s+(.+?)\s+(?:by|before)\s+(.+?)(?:,|$)",
            )?,
            decision_indicator: Regex::new(
                r"(?i)decided|agreed|concluded|determined|resolved|finalized",
            )?,

            agenda: Regex::new(r"(?i)agenda is to (.+?)\.")?,
            topic_word: Regex::new(
                r"(?i)\b(issue|problem|feature|project|implementation|integration)\b",
            )?,
            following_capitalized: Regex::new(r"^\s+([A-Z][a-z]+)")?,
        })
    }

    /// First date cue that matches, trimmed.
    pub fn due_date(&self, text: &str) -> Option<String> {
        self.date_cues.iter().find_map(|cue| {
            let captures = cue.pattern.captures(text)?;
            let matched = captures
                .iter()
                .skip(1)
                .flatten()
                .find(|group| !group.as_str().trim().is_empty())
                .or_else(|| captures.get(0))?;
            let due = matched.as_str().trim();
            tracing::trace!(cue = cue.name, due, "date cue matched");
            (!due.is_empty()).then(|| due.to_owned())
        })
    }

    /// High cues are checked first on the raw text, so a line saying
    /// "not urgent" still ranks high because it contains "urgent".
    pub fn priority(&self, text: &str) -> Priority {
        if self.high_priority.is_match(text) {
            Priority::High
        } else if self.low_priority.is_match(text) {
            Priority::Low
        } else {
            Priority::Medium
        }
    }
}
