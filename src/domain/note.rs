//! Note domain model.
//!
//! Defines the [`Note`] record returned by the notes API, the [`NotesPage`]
//! envelope that one list request yields, and the [`NewNote`] draft submitted
//! by the creation form.

use super::error::{NotesError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Title length bounds, in characters.
pub const TITLE_MIN_CHARS: usize = 3;
/// Upper title bound, in characters.
pub const TITLE_MAX_CHARS: usize = 50;
/// Upper content bound, in characters.
pub const CONTENT_MAX_CHARS: usize = 500;

/// Category attached to every note.
///
/// Tags the API does not know about deserialize into [`NoteTag::Other`] so an
/// unexpected value never fails a whole page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
    #[serde(other)]
    Other,
}

impl NoteTag {
    /// Tags a user can pick in the creation form, in display order.
    pub const SELECTABLE: [Self; 5] = [
        Self::Todo,
        Self::Work,
        Self::Personal,
        Self::Meeting,
        Self::Shopping,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Meeting => "Meeting",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    /// Next selectable tag, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::SELECTABLE.iter().position(|t| *t == self).unwrap_or(0);
        Self::SELECTABLE[(idx + 1) % Self::SELECTABLE.len()]
    }

    /// Previous selectable tag, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let len = Self::SELECTABLE.len();
        let idx = Self::SELECTABLE.iter().position(|t| *t == self).unwrap_or(0);
        Self::SELECTABLE[(idx + len - 1) % len]
    }
}

/// A single note as stored by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tag: NoteTag,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Note {
    /// Returns a short relative age ("just now", "5m ago", "3h ago", "7d ago")
    /// for the note's creation time, measured against `now`.
    ///
    /// Returns an empty string when the API timestamp is missing or not RFC 3339.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use notepane::domain::{Note, NoteTag};
    ///
    /// let note = Note {
    ///     id: "1".into(),
    ///     title: "t".into(),
    ///     content: String::new(),
    ///     tag: NoteTag::Todo,
    ///     created_at: "2024-05-01T10:00:00Z".into(),
    ///     updated_at: String::new(),
    /// };
    /// let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 5, 0).unwrap();
    /// assert_eq!(note.age_at(now), "5m ago");
    /// ```
    #[must_use]
    pub fn age_at(&self, now: DateTime<Utc>) -> String {
        let Ok(created) = DateTime::parse_from_rfc3339(&self.created_at) else {
            return String::new();
        };
        let diff = (now - created.with_timezone(&Utc)).num_seconds();

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

/// One page of notes as returned by a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesPage {
    pub notes: Vec<Note>,
    #[serde(default)]
    pub total_pages: u32,
}

impl NotesPage {
    /// Whether the page carries no notes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// A note draft as submitted by the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl NewNote {
    /// Checks the draft against the API's field rules.
    ///
    /// # Errors
    ///
    /// Returns [`NotesError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let title_len = self.title.trim().chars().count();
        if title_len == 0 {
            return Err(NotesError::Validation("Title is required".to_string()));
        }
        if title_len < TITLE_MIN_CHARS {
            return Err(NotesError::Validation(format!(
                "Title must be at least {TITLE_MIN_CHARS} characters"
            )));
        }
        if title_len > TITLE_MAX_CHARS {
            return Err(NotesError::Validation(format!(
                "Title must be at most {TITLE_MAX_CHARS} characters"
            )));
        }
        if self.content.chars().count() > CONTENT_MAX_CHARS {
            return Err(NotesError::Validation(format!(
                "Content must be at most {CONTENT_MAX_CHARS} characters"
            )));
        }
        if self.tag == NoteTag::Other {
            return Err(NotesError::Validation("Pick a tag".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn page_decodes_camel_case_payload() {
        let body = r#"{
            "notes": [{
                "id": "abc",
                "title": "Plan",
                "content": "write it down",
                "tag": "Work",
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-02T00:00:00Z"
            }],
            "totalPages": 7
        }"#;

        let page: NotesPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.total_pages, 7);
        assert_eq!(page.notes[0].tag, NoteTag::Work);
        assert_eq!(page.notes[0].created_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn unknown_tag_falls_back_to_other() {
        let note: Note =
            serde_json::from_str(r#"{"id":"1","title":"x","tag":"Ideas"}"#).unwrap();
        assert_eq!(note.tag, NoteTag::Other);
    }

    #[test]
    fn tag_cycling_wraps_and_skips_other() {
        assert_eq!(NoteTag::Shopping.next(), NoteTag::Todo);
        assert_eq!(NoteTag::Todo.previous(), NoteTag::Shopping);
        assert_eq!(NoteTag::Other.next(), NoteTag::Work);
    }

    #[test]
    fn age_is_bucketed() {
        let mut note = Note {
            id: "1".into(),
            title: "t".into(),
            content: String::new(),
            tag: NoteTag::Todo,
            created_at: "2024-05-01T00:00:00Z".into(),
            updated_at: String::new(),
        };
        let now = Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 30).unwrap();
        assert_eq!(note.age_at(now), "2d ago");

        note.created_at = "not a date".into();
        assert_eq!(note.age_at(now), "");
    }

    #[test]
    fn draft_validation_rules() {
        let mut draft = NewNote {
            title: "ok".into(),
            content: String::new(),
            tag: NoteTag::Todo,
        };
        assert!(matches!(draft.validate(), Err(NotesError::Validation(_))));

        draft.title = "Okay".into();
        assert!(draft.validate().is_ok());

        draft.content = "x".repeat(CONTENT_MAX_CHARS + 1);
        assert!(draft.validate().is_err());

        draft.content.clear();
        draft.title = "y".repeat(TITLE_MAX_CHARS + 1);
        assert!(draft.validate().is_err());
    }
}
