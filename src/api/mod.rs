//! Notes API plumbing over Zellij's host-performed web requests.
//!
//! # Architecture
//!
//! - `messages`: request identity and trace context carried through the
//!   `web_request` context map
//! - `client`: request builder ([`NoteService`]) and response decoder
//!   ([`decode_reply`])

pub mod client;
pub mod messages;

pub use client::{decode_reply, ApiFailure, ApiReply, HttpMethod, HttpRequest, NoteService};
pub use messages::{RequestContext, RequestId, RequestKind, TraceContext};
