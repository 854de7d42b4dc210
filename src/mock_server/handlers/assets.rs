//! Asset endpoint handlers.
//!
//! The asset list endpoint serves full records rather than flattened rows.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::Asset;

use super::{
    already_exists, authorize, decode_id, not_found, not_provided, paginate, provided,
    PageParams, SharedState,
};

fn validate(asset: &Asset) -> Result<(), Response> {
    if !provided(&asset.id) {
        return Err(not_provided("Id"));
    }
    if !provided(&asset.asset_type) {
        return Err(not_provided("Type"));
    }
    Ok(())
}

/// GET /api/biz/Assets
pub async fn list_assets(
    State(state): State<SharedState>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }

    let mut state = state.write().await;
    state.record_list_request("Assets");

    let rows: Vec<Asset> = state.assets.values().cloned().collect();
    Json(paginate(rows, &params)).into_response()
}

/// GET /api/biz/Assets/{id}
pub async fn get_asset(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    let id = decode_id(id);

    let state = state.read().await;
    match state.assets.get(&id) {
        Some(asset) => Json(asset.clone()).into_response(),
        None => not_found("Asset", &id),
    }
}

/// POST /api/biz/Assets
pub async fn create_asset(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(asset): Json<Asset>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    if let Err(response) = validate(&asset) {
        return response;
    }

    let id = asset.id.clone().unwrap_or_default();
    let mut state = state.write().await;
    if state.assets.contains_key(&id) {
        return already_exists("Asset", &id);
    }

    state.assets.insert(id, asset.clone());
    Json(asset).into_response()
}

/// PUT /api/biz/Assets/{id}
pub async fn update_asset(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(asset): Json<Asset>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    if let Err(response) = validate(&asset) {
        return response;
    }
    let id = decode_id(id);

    let mut state = state.write().await;
    if !state.assets.contains_key(&id) {
        return not_found("Asset", &id);
    }

    state.assets.insert(id, asset.clone());
    Json(asset).into_response()
}

/// DELETE /api/biz/Assets/{id}
pub async fn delete_asset(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    let id = decode_id(id);

    let mut state = state.write().await;
    match state.assets.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("Asset", &id),
    }
}
