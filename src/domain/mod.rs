//! Domain layer for the notepane plugin.
//!
//! Core types that are independent of Zellij APIs and of the HTTP plumbing.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`note`]: Note records, result pages and note drafts
//!
//! # Examples
//!
//! ```
//! use notepane::domain::{NewNote, NoteTag};
//!
//! let draft = NewNote {
//!     title: "Groceries".to_string(),
//!     content: "milk, eggs".to_string(),
//!     tag: NoteTag::Shopping,
//! };
//! assert!(draft.validate().is_ok());
//! ```

pub mod error;
pub mod note;

pub use error::{NotesError, Result};
pub use note::{NewNote, Note, NoteTag, NotesPage};
