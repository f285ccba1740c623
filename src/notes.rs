/// Per-trial annotation log. Voice transcripts and manually typed notes
/// land here and are harvested into the trial record at trial end.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSource {
    Voice,
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub text: String,
    pub source: NoteSource,
    pub elapsed_ms: u64,
}

#[derive(Default)]
pub struct NoteLog {
    notes: Vec<Note>,
}

impl NoteLog {
    pub fn new() -> Self {
        NoteLog { notes: Vec::new() }
    }

    /// Empty transcripts are dropped; the speech engine emits them on
    /// breath noise and they carry no annotation content.
    pub fn add(&mut self, text: &str, source: NoteSource, elapsed_ms: u64) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.notes.push(Note {
            text: text.to_string(),
            source,
            elapsed_ms,
        });
    }

    /// Clear the log at a trial boundary.
    pub fn clear(&mut self) {
        self.notes.clear();
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Joined note bodies for the results row.
    pub fn joined_content(&self) -> String {
        self.notes
            .iter()
            .map(|n| n.text.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_notes_dropped() {
        let mut log = NoteLog::new();
        log.add("", NoteSource::Voice, 0);
        log.add("   ", NoteSource::Manual, 10);
        assert!(log.is_empty());
    }

    #[test]
    fn test_harvest_joins_in_order() {
        let mut log = NoteLog::new();
        log.add("first point", NoteSource::Voice, 1000);
        log.add("second point", NoteSource::Manual, 2000);

        assert_eq!(log.len(), 2);
        assert_eq!(log.joined_content(), "first point | second point");
    }

    #[test]
    fn test_clear_between_trials() {
        let mut log = NoteLog::new();
        log.add("leftover", NoteSource::Voice, 500);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.joined_content(), "");
    }
}
