//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event; the
//! runtime executes them in order. Keeping effects as data lets the whole
//! application layer run in tests without a Zellij host.

use super::timers::TimerKind;
use crate::api::RequestId;
use crate::domain::NewNote;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Schedules a timer whose `Timer` event is fed back as
    /// [`Event::TimerFired`](super::Event::TimerFired).
    SetTimeout {
        kind: TimerKind,
        after: Duration,
    },

    /// Requests one page of notes for the given query key.
    FetchNotes {
        request_id: RequestId,
        page: u32,
        search: String,
    },

    /// Submits a new note.
    CreateNote {
        request_id: RequestId,
        note: NewNote,
    },
}
