//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain/api
//! layers. Nothing in it talks to Zellij directly, so the whole shell runs in
//! tests.
//!
//! # Architecture
//!
//! ```text
//! User Input / Timer / Web Reply → Event → handle_event → State → Actions
//!          ↑                                                        ↓
//!          └────────────── runtime executes actions ────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode state
//! - [`state`]: Central application state container and view model computation
//! - [`debounce`]: Single-slot debouncer for search input
//! - [`query`]: Keyed fetch-and-cache state machine
//! - [`notify`]: Notifier capability, toasts, empty-result notice
//! - [`form`]: Creation form and modal control
//! - [`timers`]: Maps host timer events back to their purpose
//!
//! # Example
//!
//! ```rust
//! use notepane::app::{handle_event, Action, AppState, Event};
//! use notepane::ui::Theme;
//! use std::time::Duration;
//!
//! let mut state = AppState::new(Theme::default(), Duration::from_millis(300), Duration::from_secs(3));
//! let (render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::FetchNotes { page: 1, .. }));
//! # Ok::<(), notepane::NotesError>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod form;
pub mod handler;
pub mod modes;
pub mod notify;
pub mod query;
pub mod state;
pub mod timers;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use notify::Notifier;
pub use state::AppState;
pub use timers::{TimerKind, TimerLedger};
