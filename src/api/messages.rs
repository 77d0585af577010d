//! Request context carried through Zellij's `web_request` round trip.
//!
//! Zellij hands back the `context` map untouched alongside every
//! `WebRequestResult`, which is the only way to tell which request a response
//! answers. [`RequestContext`] is encoded into that map when a request is
//! issued and decoded again when the result event arrives. It also carries a
//! [`TraceContext`] so the response span joins the trace of the request span.

use std::collections::BTreeMap;

const KEY_KIND: &str = "kind";
const KEY_REQUEST_ID: &str = "request_id";
const KEY_PAGE: &str = "page";
const KEY_SEARCH: &str = "search";
const KEY_TRACE_ID: &str = "trace_id";
const KEY_PARENT_SPAN_ID: &str = "parent_span_id";

/// Monotonic identifier assigned to every outgoing API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Distributed tracing context for linking response handling to the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when no valid OpenTelemetry context is active (tracing
    /// disabled, or the span was filtered out).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the parent of spans created while the guard lives.
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// What an outgoing request was for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    /// A page of notes for a query key.
    ListNotes {
        /// Requested page (1-based).
        page: u32,
        /// Committed search term the page was requested for.
        search: String,
    },

    /// Creation of a single note.
    CreateNote,
}

/// Everything needed to route a `WebRequestResult` back to its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub kind: RequestKind,
    pub trace_context: Option<TraceContext>,
}

impl RequestContext {
    /// Builds a context for `kind`, capturing the current trace context.
    #[must_use]
    pub fn new(request_id: RequestId, kind: RequestKind) -> Self {
        Self {
            request_id,
            kind,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the context into the string map Zellij echoes back.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_REQUEST_ID.to_string(), self.request_id.0.to_string());

        match &self.kind {
            RequestKind::ListNotes { page, search } => {
                map.insert(KEY_KIND.to_string(), "list".to_string());
                map.insert(KEY_PAGE.to_string(), page.to_string());
                map.insert(KEY_SEARCH.to_string(), search.clone());
            }
            RequestKind::CreateNote => {
                map.insert(KEY_KIND.to_string(), "create".to_string());
            }
        }

        if let Some(trace) = &self.trace_context {
            map.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            map.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }

        map
    }

    /// Decodes a context previously produced by [`RequestContext::to_map`].
    ///
    /// Returns `None` for maps that did not originate from this plugin.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let request_id = RequestId(map.get(KEY_REQUEST_ID)?.parse().ok()?);

        let kind = match map.get(KEY_KIND)?.as_str() {
            "list" => RequestKind::ListNotes {
                page: map.get(KEY_PAGE)?.parse().ok()?,
                search: map.get(KEY_SEARCH).cloned().unwrap_or_default(),
            },
            "create" => RequestKind::CreateNote,
            _ => return None,
        };

        let trace_context = match (map.get(KEY_TRACE_ID), map.get(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Some(Self {
            request_id,
            kind,
            trace_context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_context_survives_the_map_round_trip() {
        let ctx = RequestContext {
            request_id: RequestId(42),
            kind: RequestKind::ListNotes {
                page: 3,
                search: "cat food".to_string(),
            },
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };

        assert_eq!(RequestContext::from_map(&ctx.to_map()), Some(ctx));
    }

    #[test]
    fn foreign_maps_are_rejected() {
        let mut map = BTreeMap::new();
        assert_eq!(RequestContext::from_map(&map), None);

        map.insert("request_id".to_string(), "1".to_string());
        map.insert("kind".to_string(), "delete".to_string());
        assert_eq!(RequestContext::from_map(&map), None);
    }

    #[test]
    fn context_without_trace_is_valid() {
        let ctx = RequestContext {
            request_id: RequestId(7),
            kind: RequestKind::CreateNote,
            trace_context: None,
        };
        let map = ctx.to_map();
        assert!(!map.contains_key("trace_id"));
        assert_eq!(RequestContext::from_map(&map), Some(ctx));
    }
}
