//! Infrastructure layer for filesystem and environment interactions.
//!
//! Zellij plugins run in a WASI sandbox where the host filesystem is mounted
//! under `/host`. Paths coming from configuration are mapped into that view
//! here.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
