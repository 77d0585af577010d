//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the NotePane library and
//! the Zellij plugin system. It implements `ZellijPlugin`, translates host
//! events into library [`Event`]s, and performs the library's [`Action`]s
//! through the host API.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, Timer, `WebRequestResult`,
//!    `PermissionRequestResult` events
//! 3. **Start**: Once web access is granted, issue the first query
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Timer(elapsed)` → `Event::TimerFired(kind)` via the [`TimerLedger`]
//! - `WebRequestResult` → `Event::ApiReply` via [`decode_reply`]
//! - `PermissionRequestResult` → `Event::Start` / `Event::PermissionDenied`
//!
//! # Keybindings
//!
//! In browse mode:
//! - `j`/`Down`: Move down
//! - `k`/`Up`: Move up
//! - `h`/`Left`: Previous page
//! - `l`/`Right`: Next page
//! - `/`: Focus search
//! - `n` / `Ctrl+n`: Open the creation form
//! - `q`: Close plugin
//!
//! In search mode:
//! - any character: Type into the search box
//! - `Enter`/`Esc`: Back to the list
//!
//! With the creation form open:
//! - `Tab` / `Shift+Tab`: Next / previous field
//! - `Left`/`Right`: Cycle tag (on the tag field)
//! - `Enter`: Submit
//! - `Esc`: Cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use notepane::api::{decode_reply, ApiFailure, ApiReply, HttpMethod, HttpRequest, NoteService};
use notepane::app::TimerLedger;
use notepane::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns: the request
/// builder and the timer ledger that maps `Timer` events back to their
/// purpose.
struct State {
    /// Core application state from library layer.
    app: notepane::app::AppState,

    /// `None` when the configured API URL could not be parsed.
    service: Option<NoteService>,

    ledger: TimerLedger,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: notepane::initialize(&default_config),
            service: NoteService::from_config(&default_config).ok(),
            ledger: TimerLedger::new(),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes application state, requests web
    /// access, and subscribes to events. No request is issued until the
    /// permission is granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        notepane::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, per_page = config.per_page, "parsed configuration");
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "invalid configuration, requests will fail");
        }

        self.app = notepane::initialize(&config);
        self.service = match NoteService::from_config(&config) {
            Ok(service) => Some(service),
            Err(e) => {
                tracing::warn!(error = %e, "cannot build notes service");
                None
            }
        };

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        tracing::debug!("subscribing to events");
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(elapsed) => match self.ledger.resolve(elapsed) {
                Some(kind) => Event::TimerFired(kind),
                None => {
                    tracing::debug!(elapsed, "timer with no scheduled purpose");
                    return false;
                }
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match decode_reply(status, &body, &context) {
                    Some(reply) => Event::ApiReply(reply),
                    None => {
                        tracing::debug!(status, "ignoring web reply without our context");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - starting");
                    Event::Start
                }
                PermissionStatus::Denied => {
                    tracing::warn!("web access denied");
                    Event::PermissionDenied
                }
            },
            _ => return false,
        };

        self.dispatch(our_event)
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        notepane::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Feeds an event to the library and executes the resulting actions.
    ///
    /// Actions that fail before reaching the host produce a follow-up event,
    /// which is dispatched in turn.
    fn dispatch(&mut self, event: Event) -> bool {
        let mut pending = vec![event];
        let mut should_render = false;

        while let Some(event) = pending.pop() {
            match handle_event(&mut self.app, &event) {
                Ok((render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render = render, "event handled successfully");
                    should_render |= render;
                    pending.extend(actions.iter().filter_map(|a| self.execute_action(a)));
                }
                Err(e) => {
                    tracing::debug!(error = %e, "error handling event");
                }
            }
        }

        should_render
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events according to what has
    /// focus: the modal, the search box, or the list.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.modal.is_open() {
            return Some(match key.bare_key {
                BareKey::Esc => Event::CloseModal,
                BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PreviousField,
                BareKey::Tab => Event::NextField,
                BareKey::Left => Event::CycleTag { forward: false },
                BareKey::Right => Event::CycleTag { forward: true },
                BareKey::Enter => Event::SubmitForm,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::OpenCreateForm);
        }

        Some(match self.app.input_mode {
            InputMode::Search => match key.bare_key {
                BareKey::Esc | BareKey::Enter => Event::LeaveSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Browse => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::SelectionDown,
                BareKey::Up | BareKey::Char('k') => Event::SelectionUp,
                BareKey::Left | BareKey::Char('h') => Event::PreviousPage,
                BareKey::Right | BareKey::Char('l') => Event::NextPage,
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('n') => Event::OpenCreateForm,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
        })
    }

    /// Hands a request description to the Zellij host.
    fn send(request: HttpRequest) {
        let verb = match request.method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
        };
        web_request(request.url, verb, request.headers, request.body, request.context);
    }

    /// Executes an action returned from event handling.
    ///
    /// Returns an event to dispatch when the action could not be performed.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) -> Option<Event> {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                None
            }
            Action::SetTimeout { kind, after } => {
                let secs = self.ledger.schedule(*kind, *after);
                tracing::debug!(kind = ?kind, secs, "scheduling timer");
                set_timeout(secs);
                None
            }
            Action::FetchNotes {
                request_id,
                page,
                search,
            } => {
                let Some(service) = &self.service else {
                    return Some(Event::ApiReply(ApiReply::NotesListed {
                        request_id: *request_id,
                        page: *page,
                        search: search.clone(),
                        outcome: Err(Self::no_service()),
                    }));
                };
                Self::send(service.list_request(*request_id, *page, search));
                None
            }
            Action::CreateNote { request_id, note } => {
                let request = self
                    .service
                    .as_ref()
                    .ok_or_else(Self::no_service)
                    .and_then(|s| s.create_request(*request_id, note).map_err(ApiFailure::from));
                match request {
                    Ok(request) => {
                        Self::send(request);
                        None
                    }
                    Err(failure) => Some(Event::ApiReply(ApiReply::NoteCreated {
                        request_id: *request_id,
                        outcome: Err(failure),
                    })),
                }
            }
        }
    }

    fn no_service() -> ApiFailure {
        ApiFailure::transport("notes API is not configured")
    }
}
