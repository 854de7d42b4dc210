//! HTTP request handlers for the mock server.
//!
//! Shared helpers live here: the ticket check every business route performs,
//! the `pageIndex`/`pageSize` pagination applied to list responses, and the
//! plain-text error bodies the real platform answers with.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::state::MockState;

mod assets;
mod auth;
mod locations;
mod lookups;
mod objects;
mod users;

pub use assets::*;
pub use auth::*;
pub use locations::*;
pub use lookups::*;
pub use objects::*;
pub use users::*;

pub(crate) type SharedState = Arc<RwLock<MockState>>;

/// Server-enforced page size ceiling.
pub(crate) const SERVER_MAX_PAGE_SIZE: usize = 200;

/// `pageIndex`/`pageSize` query parameters on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageParams {
    #[serde(rename = "pageIndex")]
    pub page_index: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i32>,
}

/// Slice one page out of `items`.
///
/// A missing or non-positive `pageSize` (the wire's `-1`) selects the server
/// default; anything above the ceiling is silently clamped to it.
pub(crate) fn paginate<T>(items: Vec<T>, params: &PageParams) -> Vec<T> {
    let page_size = match params.page_size {
        Some(size) if size > 0 => (size as usize).min(SERVER_MAX_PAGE_SIZE),
        _ => SERVER_MAX_PAGE_SIZE,
    };
    let start = params.page_index.unwrap_or(0) as usize * page_size;

    items.into_iter().skip(start).take(page_size).collect()
}

/// Validate the `Authorization` ticket and `Timestamp` header.
///
/// Returns the 401 response to send when the request is not authorized.
pub(crate) async fn authorize(state: &SharedState, headers: &HeaderMap) -> Result<(), Response> {
    let ticket = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let authorized =
        !ticket.is_empty() && headers.contains_key("Timestamp") && state.read().await.ticket_is_valid(ticket);

    if authorized {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            "Authorization ticket is missing or expired.".to_string(),
        )
            .into_response())
    }
}

/// 400 response for a missing required field.
pub(crate) fn not_provided(field: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        format!("{field} was not provided."),
    )
        .into_response()
}

/// 400 response for a duplicate record ID.
pub(crate) fn already_exists(entity: &str, id: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        format!("{entity} '{id}' already exists."),
    )
        .into_response()
}

/// 404 response for a missing record.
pub(crate) fn not_found(entity: &str, id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        format!("{entity} '{id}' not found."),
    )
        .into_response()
}

/// URL-decode a path segment, falling back to the raw value.
pub(crate) fn decode_id(id: String) -> String {
    urlencoding::decode(&id).map(|s| s.into_owned()).unwrap_or(id)
}

/// Whether an optional string field is present and non-empty.
pub(crate) fn provided(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_defaults_and_clamps() {
        let items: Vec<u32> = (0..450).collect();

        // Server default page size when pageSize is absent or -1.
        let page = paginate(
            items.clone(),
            &PageParams {
                page_index: None,
                page_size: Some(-1),
            },
        );
        assert_eq!(page.len(), 200);

        // Requests above the ceiling are clamped to 200.
        let page = paginate(
            items.clone(),
            &PageParams {
                page_index: Some(0),
                page_size: Some(10_000),
            },
        );
        assert_eq!(page.len(), 200);

        // Zero-based page indexing; the last page is short.
        let page = paginate(
            items,
            &PageParams {
                page_index: Some(2),
                page_size: Some(200),
            },
        );
        assert_eq!(page.len(), 50);
        assert_eq!(page[0], 400);
    }
}
