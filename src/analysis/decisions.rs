use crate::analysis::patterns::CuePatterns;
use crate::analysis::tables::Fallbacks;

/// Collects decision lines, then the lines of a `decisions for today are:`
/// block. Falls back to the canned decisions when both come up empty.
pub fn extract_decisions(
    content: &str,
    patterns: &CuePatterns,
    fallbacks: &Fallbacks,
) -> Vec<String> {
    let mut decisions: Vec<String> = content
        .lines()
        .filter(|line| patterns.decision_indicator.is_match(line))
        .map(|line| line.trim().to_owned())
        .collect();

    if let Some(block) = patterns
        .decisions_block
        .captures(content)
        .and_then(|captures| captures.get(1))
    {
        decisions.extend(
            block
                .as_str()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned),
        );
    }

    if decisions.is_empty() {
        tracing::debug!("no decisions found, using canned decisions");
        return fallbacks.decisions.clone();
    }
    decisions
}
