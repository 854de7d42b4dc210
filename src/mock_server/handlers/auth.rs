//! Authenticate endpoint handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::auth::to_rfc1123;

use super::SharedState;

#[derive(Debug, Deserialize)]
pub struct AuthenticateParams {
    #[serde(rename = "UserName", default)]
    pub user_name: String,
    #[serde(rename = "Password", default)]
    pub password: String,
}

/// POST /api/Authenticate
///
/// Issues a fresh ticket when the credentials match. The `TicketExpires`
/// field carries the issuance time, as the real platform does.
pub async fn authenticate(
    State(state): State<SharedState>,
    Json(params): Json<AuthenticateParams>,
) -> Response {
    let mut state = state.write().await;

    if !state.credentials_match(&params.user_name, &params.password) {
        return (
            StatusCode::UNAUTHORIZED,
            "Invalid user name or password.".to_string(),
        )
            .into_response();
    }

    let ticket = state.issue_ticket();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "Ticket": ticket,
            "TicketExpires": to_rfc1123(Utc::now()),
        })),
    )
        .into_response()
}
