//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer ticks, and API replies, translating them into state changes and
//! action sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type and mutates state
//! 3. Post-event effects run (empty-result notice, toast timers)
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Lifecycle**: `Start`, `PermissionDenied`, `CloseFocus`
//! - **Search**: `FocusSearch`, `LeaveSearch`, `Char`, `Backspace`
//! - **Browsing**: `SelectionDown`, `SelectionUp`, `NextPage`, `PreviousPage`
//! - **Modal**: `OpenCreateForm`, `CloseModal`, `NextField`, `PreviousField`,
//!   `CycleTag`, `SubmitForm`
//! - **Runtime**: `TimerFired`, `ApiReply`

use super::notify::Notifier;
use super::query::{Applied, QueryKey};
use super::timers::TimerKind;
use crate::api::ApiReply;
use crate::app::{Action, AppState, InputMode};
use crate::domain::error::Result;

/// Toast raised when the user refuses the web access permission.
const PERMISSION_DENIED_MESSAGE: &str = "Web access was denied, notes cannot be loaded.";

/// Events triggered by user input, timers, or API replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions granted; issue the first query.
    Start,
    /// Web access permission refused.
    PermissionDenied,
    /// Hides the plugin pane.
    CloseFocus,

    /// Gives the search box keyboard focus.
    FocusSearch,
    /// Returns focus to the note list. Pending input still commits.
    LeaveSearch,
    /// Types a character into the focused input (search box or form field).
    Char(char),
    /// Deletes the last character of the focused input.
    Backspace,

    /// Moves selection cursor down by one position (wraps to top).
    SelectionDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    SelectionUp,
    NextPage,
    PreviousPage,

    /// Opens the creation modal.
    OpenCreateForm,
    /// Dismisses the creation modal, discarding the draft.
    CloseModal,
    NextField,
    PreviousField,
    /// Cycles the tag of the draft.
    CycleTag {
        forward: bool,
    },
    SubmitForm,

    /// A scheduled timer elapsed.
    TimerFired(TimerKind),

    /// A decoded reply to one of our web requests.
    ApiReply(ApiReply),
}

/// Processes an event, mutates application state, and returns whether to
/// re-render along with the actions to execute.
///
/// # Errors
///
/// Returns errors from state transitions. None of the current transitions
/// fail; the signature leaves room for ones that do.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (render, mut actions) = dispatch(state, event)?;

    let effects = state.run_effects();
    let render = render || !effects.is_empty();
    actions.extend(effects);

    Ok((render, actions))
}

#[allow(clippy::unnecessary_wraps, clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::Start => {
            tracing::debug!("starting initial query");
            Ok((true, state.sync_query().into_iter().collect()))
        }
        Event::PermissionDenied => {
            tracing::warn!("web access permission denied");
            state.toasts.error(PERMISSION_DENIED_MESSAGE);
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::FocusSearch => {
            if state.modal.is_open() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::LeaveSearch => {
            state.input_mode = InputMode::Browse;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if let Some(form) = state.modal.form_mut() {
                form.insert_char(*c);
                return Ok((true, vec![]));
            }
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            state.search_input.push(*c);
            Ok((true, vec![schedule_search_commit(state)]))
        }
        Event::Backspace => {
            if let Some(form) = state.modal.form_mut() {
                form.backspace();
                return Ok((true, vec![]));
            }
            if state.input_mode != InputMode::Search || state.search_input.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![schedule_search_commit(state)]))
        }

        Event::SelectionDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::SelectionUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextPage | Event::PreviousPage => {
            let target = if matches!(event, Event::NextPage) {
                state.page.saturating_add(1)
            } else {
                state.page.saturating_sub(1)
            };
            if !state.set_page(target) {
                return Ok((false, vec![]));
            }
            Ok((true, state.sync_query().into_iter().collect()))
        }

        Event::OpenCreateForm => {
            state.modal.open();
            Ok((true, vec![]))
        }
        Event::CloseModal => {
            state.modal.close();
            Ok((true, vec![]))
        }
        Event::NextField | Event::PreviousField | Event::CycleTag { .. } => {
            let Some(form) = state.modal.form_mut() else {
                return Ok((false, vec![]));
            };
            match event {
                Event::NextField => form.next_field(),
                Event::PreviousField => form.previous_field(),
                Event::CycleTag { forward } => form.cycle_tag(*forward),
                _ => {}
            }
            Ok((true, vec![]))
        }
        Event::SubmitForm => {
            let Some(form) = state.modal.form_mut() else {
                return Ok((false, vec![]));
            };
            let actions = form
                .begin_submit(&mut state.request_ids)
                .map(|(request_id, note)| {
                    tracing::debug!(request_id = %request_id, title = %note.title, "submitting note");
                    Action::CreateNote { request_id, note }
                })
                .into_iter()
                .collect();
            Ok((true, actions))
        }

        Event::TimerFired(TimerKind::SearchDebounce) => {
            let Some(value) = state.debouncer.tick() else {
                return Ok((false, vec![]));
            };
            Ok((true, state.commit_search(value).into_iter().collect()))
        }
        Event::TimerFired(TimerKind::ToastExpiry) => Ok((state.toasts.expire_oldest(), vec![])),

        Event::ApiReply(reply) => Ok(handle_reply(state, reply)),
    }
}

/// Pushes the current search input into the debouncer and schedules its tick.
fn schedule_search_commit(state: &mut AppState) -> Action {
    let after = state.debouncer.push(state.search_input.clone());
    Action::SetTimeout {
        kind: TimerKind::SearchDebounce,
        after,
    }
}

fn handle_reply(state: &mut AppState, reply: &ApiReply) -> (bool, Vec<Action>) {
    match reply {
        ApiReply::NotesListed {
            request_id,
            page,
            search,
            outcome,
        } => {
            if let Err(failure) = outcome {
                tracing::warn!(request_id = %request_id, page, search = %search, error = %failure, "notes query failed");
            }
            let key = QueryKey::new(*page, search.clone());
            let applied = state.query.resolve(*request_id, &key, outcome.clone());
            state.clamp_selection();
            (applied == Applied::Current, vec![])
        }
        ApiReply::NoteCreated {
            request_id,
            outcome,
        } => {
            let awaited = state
                .modal
                .form()
                .is_some_and(|form| form.submitting == Some(*request_id));

            match outcome {
                Ok(note) => {
                    tracing::info!(request_id = %request_id, note_id = %note.id, "note created");
                    if awaited {
                        state.modal.close();
                    }
                    let refetch = state.query.invalidate(&mut state.request_ids).map(|fetch| {
                        Action::FetchNotes {
                            request_id: fetch.request_id,
                            page: fetch.key.page,
                            search: fetch.key.search,
                        }
                    });
                    (true, refetch.into_iter().collect())
                }
                Err(failure) => {
                    tracing::warn!(request_id = %request_id, error = %failure, "note creation failed");
                    if !awaited {
                        return (false, vec![]);
                    }
                    if let Some(form) = state.modal.form_mut() {
                        form.fail(format!("Could not create note: {failure}"));
                    }
                    (true, vec![])
                }
            }
        }
    }
}
