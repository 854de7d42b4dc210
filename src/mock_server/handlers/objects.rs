//! Object query endpoint handlers (`CountObjects`/`ListObjects`).

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use super::{authorize, SharedState};

#[derive(Debug, Deserialize)]
pub struct CountObjectsParams {
    #[serde(rename = "AppName", default)]
    pub app_name: String,
    #[serde(rename = "Filter", default)]
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListObjectsParams {
    #[serde(rename = "AppName", default)]
    pub app_name: String,
    #[serde(rename = "Filter", default)]
    pub filter: Option<String>,
    #[serde(rename = "PageIndex", default)]
    pub page_index: u64,
    #[serde(rename = "PageSize", default)]
    pub page_size: u64,
}

/// POST /api/biz/CountObjects
pub async fn count_objects(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(params): Json<CountObjectsParams>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }

    let state = state.read().await;
    let count = state
        .query_objects(&params.app_name, params.filter.as_deref())
        .len();

    Json(serde_json::json!({ "Count": count })).into_response()
}

/// POST /api/biz/ListObjects
pub async fn list_objects(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(params): Json<ListObjectsParams>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }

    let state = state.read().await;
    let matching = state.query_objects(&params.app_name, params.filter.as_deref());

    // Every property name present on any matching row, store ID first.
    let mut properties: Vec<String> = Vec::new();
    for row in &matching {
        for key in row.keys() {
            if !properties.contains(key) {
                properties.push(key.clone());
            }
        }
    }

    let page_size = params.page_size.max(1) as usize;
    let start = params.page_index as usize * page_size;
    let items: Vec<_> = matching
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Json(serde_json::json!({
        "Properties": properties,
        "Items": items,
    }))
    .into_response()
}
