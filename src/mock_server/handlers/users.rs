//! User endpoint handlers.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::{User, UserSummary};

use super::{
    already_exists, authorize, decode_id, not_found, not_provided, paginate, provided,
    PageParams, SharedState,
};

/// Flatten a full user record into the row shape the list endpoint serves.
fn summarize(user: &User) -> UserSummary {
    let address = user.physical_address.clone().unwrap_or_default();
    UserSummary {
        user_name: user.user_name.clone().unwrap_or_default(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        profile_ids: user.profiles.as_ref().map(|p| p.join(",")),
        address1: address.address1,
        address2: address.address2,
        city: address.city,
        state_province: address.state_province_code,
        zip_code: address.zip_code,
        country: address.country_code,
        primary_phone_number: user.primary_phone_number.clone(),
        mobile_phone_number: user.mobile_phone_number.clone(),
    }
}

/// Required-field validation shared by create and update.
fn validate(user: &User) -> Result<(), Response> {
    if !provided(&user.user_name) {
        return Err(not_provided("UserName"));
    }
    if !provided(&user.email) {
        return Err(not_provided("Email"));
    }
    if !provided(&user.first_name) {
        return Err(not_provided("FirstName"));
    }
    if !provided(&user.last_name) {
        return Err(not_provided("LastName"));
    }
    Ok(())
}

/// GET /api/biz/Users
pub async fn list_users(
    State(state): State<SharedState>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }

    let mut state = state.write().await;
    state.record_list_request("Users");

    let rows: Vec<UserSummary> = state.users.values().map(summarize).collect();
    Json(paginate(rows, &params)).into_response()
}

/// GET /api/biz/Users/{id}
pub async fn get_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    let id = decode_id(id);

    let state = state.read().await;
    match state.users.get(&id) {
        Some(user) => Json(user.clone()).into_response(),
        None => not_found("User", &id),
    }
}

/// POST /api/biz/Users
pub async fn create_user(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(user): Json<User>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    if let Err(response) = validate(&user) {
        return response;
    }

    let id = user.user_name.clone().unwrap_or_default();
    let mut state = state.write().await;
    if state.users.contains_key(&id) {
        return already_exists("User", &id);
    }

    state.users.insert(id, user.clone());
    Json(user).into_response()
}

/// PUT /api/biz/Users/{id}
pub async fn update_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(user): Json<User>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    if let Err(response) = validate(&user) {
        return response;
    }
    let id = decode_id(id);

    let mut state = state.write().await;
    if !state.users.contains_key(&id) {
        return not_found("User", &id);
    }

    state.users.insert(id, user.clone());
    Json(user).into_response()
}

/// DELETE /api/biz/Users/{id}
pub async fn delete_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    let id = decode_id(id);

    let mut state = state.write().await;
    match state.users.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("User", &id),
    }
}
