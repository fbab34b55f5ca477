use crate::analysis::model::{Entities, EntityKind};
use crate::analysis::participants::ParticipantMap;
use crate::analysis::patterns::CuePatterns;
use crate::analysis::tables::AnalyzerTables;

pub fn extract_all(
    content: &str,
    participants: &ParticipantMap,
    patterns: &CuePatterns,
    tables: &AnalyzerTables,
) -> Entities {
    let extract = |kind| extract_entities(content, kind, participants, patterns, tables);
    Entities {
        people: extract(EntityKind::People),
        organizations: extract(EntityKind::Organizations),
        dates: extract(EntityKind::Dates),
        topics: extract(EntityKind::Topics),
    }
}

/// Only people are actually extracted; the other kinds return the canned
/// lists from the tables.
pub fn extract_entities(
    content: &str,
    kind: EntityKind,
    participants: &ParticipantMap,
    patterns: &CuePatterns,
    tables: &AnalyzerTables,
) -> Vec<String> {
    let fallbacks = &tables.fallbacks;
    match kind {
        EntityKind::People => {
            let people = extract_people(content, participants, patterns, tables);
            if people.is_empty() {
                fallbacks.people.clone()
            } else {
                people
            }
        }
        EntityKind::Organizations => fallbacks.organizations.clone(),
        EntityKind::Dates => fallbacks.dates.clone(),
        EntityKind::Topics => fallbacks.topics.clone(),
    }
}

fn extract_people(
    content: &str,
    participants: &ParticipantMap,
    patterns: &CuePatterns,
    tables: &AnalyzerTables,
) -> Vec<String> {
    let gazetteer = &tables.gazetteer;
    let mut people: Vec<String> = participants.full_names().map(str::to_owned).collect();

    for name in &gazetteer.entity_names {
        if people.iter().any(|person| person.contains(name.as_str())) {
            continue;
        }
        let Some(position) = find_word(content, name) else {
            continue;
        };

        let after = &content[position + name.len()..];
        let surname = patterns
            .following_capitalized
            .captures(after)
            .map(|captures| captures[1].to_owned())
            .filter(|surname| gazetteer.is_last_name(surname));
        match surname {
            Some(surname) => people.push(format!("{name} {surname}")),
            None => people.push(name.clone()),
        }
    }

    people
}

/// Byte offset of the first occurrence of `word` that is not part of a
/// longer word.
fn find_word(text: &str, word: &str) -> Option<usize> {
    if word.is_empty() {
        return None;
    }
    text.match_indices(word).map(|(index, _)| index).find(|index| {
        let before = text[..*index].chars().next_back();
        let after = text[index + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
