//! Notes API request builder and response decoder.
//!
//! Zellij plugins cannot open sockets themselves; they describe a request and
//! the host performs it, delivering a `WebRequestResult` event later. This
//! module therefore splits the fetch service in two halves:
//!
//! - [`NoteService`] builds [`HttpRequest`] descriptions for the shim to hand
//!   to `web_request`
//! - [`decode_reply`] turns the raw `(status, body, context)` triple back into
//!   a typed [`ApiReply`]
//!
//! Both halves are plain functions over data, so they are tested without a
//! running Zellij.

use crate::api::messages::{RequestContext, RequestId, RequestKind};
use crate::domain::error::{NotesError, Result};
use crate::domain::{NewNote, Note, NotesPage};
use crate::Config;
use std::collections::BTreeMap;
use url::Url;

/// HTTP methods the plugin issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully described HTTP request, ready to be passed to the Zellij host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: BTreeMap<String, String>,
}

/// Why an API call did not produce a usable value.
///
/// This is the flattened, cloneable form of [`NotesError`] that travels inside
/// events. The UI never looks past the fact that it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    /// Description for logs and inline form errors.
    pub message: String,
}

impl From<NotesError> for ApiFailure {
    fn from(error: NotesError) -> Self {
        let status = match &error {
            NotesError::Http { status } => Some(*status),
            _ => None,
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl ApiFailure {
    /// Failure for a request that never reached the API.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        NotesError::Transport(reason.into()).into()
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// A decoded answer to one of our requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    /// Answer to a list request.
    NotesListed {
        request_id: RequestId,
        page: u32,
        search: String,
        outcome: std::result::Result<NotesPage, ApiFailure>,
    },

    /// Answer to a create request.
    NoteCreated {
        request_id: RequestId,
        outcome: std::result::Result<Note, ApiFailure>,
    },
}

/// Builder for notes API requests.
#[derive(Debug, Clone)]
pub struct NoteService {
    base_url: Url,
    token: Option<String>,
    per_page: u32,
}

impl NoteService {
    /// Creates a service for the API collection at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NotesError::Url`] if `api_url` is not an absolute URL.
    pub fn new(api_url: &str, token: Option<String>, per_page: u32) -> Result<Self> {
        let base_url = Url::parse(api_url)?;
        Ok(Self {
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
            per_page,
        })
    }

    /// Creates a service from plugin configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured API URL is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.api_token.clone(), config.per_page)
    }

    fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(token) = &self.token {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }
        headers
    }

    /// Describes `GET {api}?page=..&perPage=..[&search=..]`.
    ///
    /// An empty search term is left out of the query string.
    #[must_use]
    pub fn list_request(&self, request_id: RequestId, page: u32, search: &str) -> HttpRequest {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("perPage", &self.per_page.to_string());
            if !search.is_empty() {
                pairs.append_pair("search", search);
            }
        }

        let context = RequestContext::new(
            request_id,
            RequestKind::ListNotes {
                page,
                search: search.to_string(),
            },
        );

        tracing::debug!(request_id = %request_id, url = %url, "built list request");

        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: self.headers(),
            body: Vec::new(),
            context: context.to_map(),
        }
    }

    /// Describes `POST {api}` with the draft as JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`NotesError::Decode`] if the draft cannot be serialized.
    pub fn create_request(&self, request_id: RequestId, note: &NewNote) -> Result<HttpRequest> {
        let body = serde_json::to_vec(note)?;
        let mut headers = self.headers();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let context = RequestContext::new(request_id, RequestKind::CreateNote);

        tracing::debug!(request_id = %request_id, body_len = body.len(), "built create request");

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.base_url.to_string(),
            headers,
            body,
            context: context.to_map(),
        })
    }
}

fn decode_body<T: serde::de::DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    if !(200..300).contains(&status) {
        return Err(NotesError::Http { status });
    }
    Ok(serde_json::from_slice(body)?)
}

/// Decodes a `WebRequestResult` into a reply for one of our requests.
///
/// Returns `None` when the context map was not produced by this plugin.
#[must_use]
pub fn decode_reply(
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> Option<ApiReply> {
    let ctx = RequestContext::from_map(context)?;
    let _trace_guard = ctx.trace_context.as_ref().and_then(|t| t.attach());
    let _span = tracing::debug_span!(
        "decode_reply",
        request_id = %ctx.request_id,
        status = status,
        body_len = body.len()
    )
    .entered();

    let reply = match ctx.kind {
        RequestKind::ListNotes { page, search } => ApiReply::NotesListed {
            request_id: ctx.request_id,
            page,
            search,
            outcome: decode_body::<NotesPage>(status, body).map_err(ApiFailure::from),
        },
        RequestKind::CreateNote => ApiReply::NoteCreated {
            request_id: ctx.request_id,
            outcome: decode_body::<Note>(status, body).map_err(ApiFailure::from),
        },
    };

    if let ApiReply::NotesListed { outcome: Err(e), .. } | ApiReply::NoteCreated { outcome: Err(e), .. } = &reply {
        tracing::debug!(error = %e, "api request failed");
    }

    Some(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteTag;

    fn service() -> NoteService {
        NoteService::new("https://api.example.com/notes", Some("secret".into()), 12).unwrap()
    }

    #[test]
    fn transport_failure_has_no_status() {
        let failure = ApiFailure::transport("notes API is not configured");
        assert_eq!(failure.status, None);
        assert_eq!(failure.message, "Transport error: notes API is not configured");
    }

    #[test]
    fn list_request_carries_paging_and_search() {
        let req = service().list_request(RequestId(1), 2, "cat food");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "https://api.example.com/notes?page=2&perPage=12&search=cat+food"
        );
        assert_eq!(req.headers.get("Authorization").map(String::as_str), Some("Bearer secret"));
        assert_eq!(req.context.get("page").map(String::as_str), Some("2"));
    }

    #[test]
    fn empty_search_is_omitted() {
        let req = service().list_request(RequestId(1), 1, "");
        assert_eq!(req.url, "https://api.example.com/notes?page=1&perPage=12");
    }

    #[test]
    fn blank_token_sends_no_authorization() {
        let svc = NoteService::new("https://api.example.com/notes", Some("  ".into()), 12).unwrap();
        let req = svc.list_request(RequestId(1), 1, "");
        assert!(!req.headers.contains_key("Authorization"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            NoteService::new("not a url", None, 12),
            Err(NotesError::Url(_))
        ));
    }

    #[test]
    fn create_request_serializes_draft() {
        let draft = NewNote {
            title: "Milk".into(),
            content: "2 liters".into(),
            tag: NoteTag::Shopping,
        };
        let req = service().create_request(RequestId(9), &draft).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        let sent: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
        assert_eq!(sent["tag"], "Shopping");
        assert_eq!(req.context.get("kind").map(String::as_str), Some("create"));
    }

    #[test]
    fn successful_list_reply_decodes() {
        let req = service().list_request(RequestId(5), 1, "x");
        let body = br#"{"notes":[],"totalPages":0}"#;
        let reply = decode_reply(200, body, &req.context).unwrap();
        assert_eq!(
            reply,
            ApiReply::NotesListed {
                request_id: RequestId(5),
                page: 1,
                search: "x".into(),
                outcome: Ok(NotesPage::default()),
            }
        );
    }

    #[test]
    fn error_status_and_garbage_both_fail() {
        let req = service().list_request(RequestId(5), 1, "");

        let Some(ApiReply::NotesListed { outcome, .. }) = decode_reply(500, b"{}", &req.context) else {
            panic!("expected list reply");
        };
        assert_eq!(outcome.unwrap_err().status, Some(500));

        let Some(ApiReply::NotesListed { outcome, .. }) = decode_reply(200, b"<html>", &req.context) else {
            panic!("expected list reply");
        };
        assert_eq!(outcome.unwrap_err().status, None);
    }

    #[test]
    fn unknown_context_is_ignored() {
        assert_eq!(decode_reply(200, b"{}", &BTreeMap::new()), None);
    }
}
