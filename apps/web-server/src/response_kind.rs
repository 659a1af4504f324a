//! Representation negotiation, decided once per request.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use giosa_shared::stream::STREAM_CONTENT_TYPE;
use serde::Deserialize;

/// Header naming the frame a partial-page request targets.
pub const TURBO_FRAME_HEADER: &str = "Turbo-Frame";

/// What the client asked to get back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKind {
    /// Full HTML document.
    Page,
    /// Only the named region.
    Frame(String),
    /// Stream fragments.
    Stream,
    Json,
}

impl ResponseKind {
    /// `Accept` wins over the frame header, which wins over the
    /// `turbo_frame` query parameter.
    pub fn from_request(req: &HttpRequest) -> Self {
        let accept = req
            .headers()
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if accept.contains(STREAM_CONTENT_TYPE) {
            return ResponseKind::Stream;
        }
        if accept.contains("application/json") && !accept.contains("text/html") {
            return ResponseKind::Json;
        }

        let frame = req
            .headers()
            .get(TURBO_FRAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| frame_from_query(req.query_string()));

        match frame {
            Some(name) if !name.is_empty() => ResponseKind::Frame(name),
            _ => ResponseKind::Page,
        }
    }

    /// True when the request names `frame`.
    pub fn is_frame(&self, frame: &str) -> bool {
        matches!(self, ResponseKind::Frame(name) if name == frame)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FrameQuery {
    turbo_frame: Option<String>,
}

fn frame_from_query(query: &str) -> Option<String> {
    web::Query::<FrameQuery>::from_query(query)
        .ok()
        .and_then(|q| q.into_inner().turbo_frame)
}

impl FromRequest for ResponseKind {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(ResponseKind::from_request(req)))
    }
}
