//! User interface rendering layer with component-based architecture.
//!
//! This module turns view models into ANSI-styled output through small
//! rendering components. It provides theme support and search match
//! highlighting.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (cursor, highlighting, fitting)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//!
//! # Example
//!
//! ```rust,no_run
//! use notepane::app::AppState;
//! use notepane::ui::{render, Theme};
//! use std::time::Duration;
//!
//! let state = AppState::new(Theme::default(), Duration::from_millis(300), Duration::from_secs(3));
//! render(&state, 24, 80); // Renders to stdout
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    BodyInfo, FooterInfo, HeaderInfo, ModalInfo, NoteItem, PageSlot, PaginationInfo,
    SearchBarInfo, ToastInfo, ToolbarInfo, UIViewModel,
};
