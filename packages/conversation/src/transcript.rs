use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    Assistant,
    User,
}

/// A single visible line of the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: String,
    pub author: Author,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Create a machine-authored entry
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content.into(), Author::Assistant)
    }

    /// Create a user-authored entry
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content.into(), Author::User)
    }

    fn new(content: String, author: Author) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

/// Owns the conversation log. Entries are appended as the flow moves
/// forward; only a re-edit truncates from the back.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a machine-authored entry
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.entries.push(TranscriptEntry::assistant(content));
    }

    /// Append a user-authored entry
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.entries.push(TranscriptEntry::user(content));
    }

    /// Get all entries in order
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&TranscriptEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only the first `len` entries
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of user-authored entries
    pub fn user_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_user()).count()
    }

    /// Ordinal of the entry at `index` among user entries, or None when the
    /// index is out of range or names a machine entry
    pub fn user_ordinal(&self, index: usize) -> Option<usize> {
        let entry = self.entries.get(index)?;
        if !entry.is_user() {
            return None;
        }
        Some(
            self.entries[..index]
                .iter()
                .filter(|earlier| earlier.is_user())
                .count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("Welcome");
        transcript.push_assistant("First question");
        transcript.push_user("First answer");

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.entries()[0].content, "Welcome");
        assert_eq!(transcript.entries()[2].content, "First answer");
        assert_eq!(transcript.entries()[0].author, Author::Assistant);
        assert_eq!(transcript.entries()[2].author, Author::User);
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let mut transcript = Transcript::new();
        transcript.push_user("one");
        transcript.push_user("one");
        let ids: Vec<_> = transcript.entries().iter().map(|e| e.id.clone()).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_user_count_ignores_machine_entries() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("q1");
        transcript.push_user("a1");
        transcript.push_assistant("q2");
        transcript.push_user("a2");
        assert_eq!(transcript.user_count(), 2);
    }

    #[test]
    fn test_user_ordinal() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("welcome"); // 0
        transcript.push_assistant("q1"); // 1
        transcript.push_user("a1"); // 2
        transcript.push_assistant("q2"); // 3
        transcript.push_user("a2"); // 4

        assert_eq!(transcript.user_ordinal(2), Some(0));
        assert_eq!(transcript.user_ordinal(4), Some(1));
        // machine entry
        assert_eq!(transcript.user_ordinal(3), None);
        // out of range
        assert_eq!(transcript.user_ordinal(9), None);
    }

    #[test]
    fn test_truncate_drops_from_the_back() {
        let mut transcript = Transcript::new();
        transcript.push_assistant("q1");
        transcript.push_user("a1");
        transcript.push_assistant("q2");
        transcript.truncate(1);
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.entries()[0].content, "q1");
    }
}
