//! Note creation form and the modal hosting it.

use super::query::RequestIds;
use crate::api::RequestId;
use crate::domain::{NewNote, NoteTag, NotesError};

/// Field of the creation form holding input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Content,
    Tag,
}

impl FormField {
    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Content,
            Self::Content => Self::Tag,
            Self::Tag => Self::Title,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Title => Self::Tag,
            Self::Content => Self::Title,
            Self::Tag => Self::Content,
        }
    }
}

/// Editable draft of a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
    pub field: FormField,
    /// Inline message shown under the fields.
    pub error: Option<String>,
    /// Create request in flight, if submitted.
    pub submitting: Option<RequestId>,
}

impl NoteForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        if self.submitting.is_some() {
            return;
        }
        match self.field {
            FormField::Title => self.title.push(c),
            FormField::Content => self.content.push(c),
            FormField::Tag => return,
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if self.submitting.is_some() {
            return;
        }
        match self.field {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Content => {
                self.content.pop();
            }
            FormField::Tag => {}
        }
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn previous_field(&mut self) {
        self.field = self.field.previous();
    }

    /// Cycles the tag. Only effective while the tag field is focused.
    pub fn cycle_tag(&mut self, forward: bool) {
        if self.field != FormField::Tag || self.submitting.is_some() {
            return;
        }
        self.tag = if forward {
            self.tag.next()
        } else {
            self.tag.previous()
        };
    }

    /// The draft as a request payload, trimmed.
    #[must_use]
    pub fn draft(&self) -> NewNote {
        NewNote {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            tag: self.tag,
        }
    }

    /// Validates the draft and marks it as submitted.
    ///
    /// Returns `None` and records an inline error if validation fails or a
    /// submission is already in flight.
    pub fn begin_submit(&mut self, ids: &mut RequestIds) -> Option<(RequestId, NewNote)> {
        if self.submitting.is_some() {
            return None;
        }
        let draft = self.draft();
        if let Err(err) = draft.validate() {
            tracing::debug!(error = %err, "note form rejected");
            self.error = Some(match err {
                NotesError::Validation(message) => message,
                other => other.to_string(),
            });
            return None;
        }

        let request_id = ids.next_id();
        self.submitting = Some(request_id);
        self.error = None;
        Some((request_id, draft))
    }

    /// Records a failed submission so the user can retry.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = None;
        self.error = Some(message.into());
    }
}

/// Open/closed state of the modal dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalControl {
    #[default]
    Closed,
    Open(NoteForm),
}

impl ModalControl {
    /// Opens the modal with a fresh form. No-op if already open.
    pub fn open(&mut self) {
        if matches!(self, Self::Closed) {
            *self = Self::Open(NoteForm::new());
        }
    }

    /// Closes the modal, discarding the draft.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    #[must_use]
    pub const fn form(&self) -> Option<&NoteForm> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut NoteForm> {
        match self {
            Self::Open(form) => Some(form),
            Self::Closed => None,
        }
    }
}
