use crate::analysis::patterns::CuePatterns;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub full_name: String,
    pub initials: String,
}

/// Bidirectional full-name / initials mapping parsed from a `Participants:` line.
///
/// Entries keep the order they were declared in. When a full name or an
/// initials token is declared twice the later declaration wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantMap {
    entries: Vec<Participant>,
}

impl ParticipantMap {
    pub fn parse(content: &str, patterns: &CuePatterns) -> Self {
        let mut map = Self::default();
        let Some(line) = patterns
            .participants_line
            .captures(content)
            .and_then(|captures| captures.get(1))
        else {
            return map;
        };

        for captures in patterns.participant_entry.captures_iter(line.as_str()) {
            let full_name = captures[1].trim();
            let initials = captures[2].trim();
            if full_name.is_empty() {
                continue;
            }
            map.insert(full_name, initials);
        }

        tracing::debug!(participants = map.entries.len(), "parsed participants line");
        map
    }

    pub fn insert(&mut self, full_name: &str, initials: &str) {
        self.entries
            .retain(|entry| entry.full_name != full_name && entry.initials != initials);
        self.entries.push(Participant {
            full_name: full_name.to_owned(),
            initials: initials.to_owned(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Participant] {
        &self.entries
    }

    pub fn full_name_for(&self, initials: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.initials == initials)
            .map(|entry| entry.full_name.as_str())
    }

    pub fn initials_for(&self, full_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.full_name == full_name)
            .map(|entry| entry.initials.as_str())
    }

    pub fn is_initials(&self, token: &str) -> bool {
        self.full_name_for(token).is_some()
    }

    pub fn is_full_name(&self, name: &str) -> bool {
        self.initials_for(name).is_some()
    }

    /// Full name of the only participant whose first name is `first_name`.
    pub fn unique_first_name_match(&self, first_name: &str) -> Option<&str> {
        let mut matches = self.entries.iter().filter(|entry| {
            entry
                .full_name
                .split_whitespace()
                .next()
                .is_some_and(|first| first == first_name)
        });
        let found = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(found.full_name.as_str())
    }

    pub fn full_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.full_name.as_str())
    }
}
