//! Retail location and restaurant endpoint handlers.
//!
//! The two resources share a shape but are distinct record types; their list
//! endpoints serve flattened rows with the addresses spread into prefixed
//! columns.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::{Address, Restaurant, RestaurantSummary, RetailLocation, RetailLocationSummary};

use super::{
    already_exists, authorize, decode_id, not_found, not_provided, paginate, provided,
    PageParams, SharedState,
};

fn validate_location_fields(
    id: &Option<String>,
    name: &Option<String>,
    address: &Option<Address>,
) -> Result<(), Response> {
    if !provided(id) {
        return Err(not_provided("Id"));
    }
    if !provided(name) {
        return Err(not_provided("LocationName"));
    }
    if address.as_ref().map_or(true, Address::is_empty) {
        return Err(not_provided("PhysicalAddress"));
    }
    Ok(())
}

fn summarize_retail_location(location: &RetailLocation) -> RetailLocationSummary {
    let physical = location.physical_address.clone().unwrap_or_default();
    let mailing = location.mailing_address.clone().unwrap_or_default();
    RetailLocationSummary {
        id: location.id.clone().unwrap_or_default(),
        location_name: location.location_name.clone(),
        concept_ids: location.concepts.as_ref().map(|c| c.join(",")),
        primary_phone_number: location.primary_phone_number.clone(),
        fax_number: location.fax_number.clone(),
        physical_address1: physical.address1,
        physical_address2: physical.address2,
        physical_city: physical.city,
        physical_state: physical.state_province_code,
        physical_zip_code: physical.zip_code,
        physical_country: physical.country_code,
        mailing_address1: mailing.address1,
        mailing_address2: mailing.address2,
        mailing_city: mailing.city,
        mailing_state: mailing.state_province_code,
        mailing_zip_code: mailing.zip_code,
        mailing_country: mailing.country_code,
        extra_information: location.extra_information.clone(),
    }
}

fn summarize_restaurant(restaurant: &Restaurant) -> RestaurantSummary {
    let physical = restaurant.physical_address.clone().unwrap_or_default();
    let mailing = restaurant.mailing_address.clone().unwrap_or_default();
    RestaurantSummary {
        id: restaurant.id.clone().unwrap_or_default(),
        location_name: restaurant.location_name.clone(),
        concept_ids: restaurant.concepts.as_ref().map(|c| c.join(",")),
        primary_phone_number: restaurant.primary_phone_number.clone(),
        fax_number: restaurant.fax_number.clone(),
        physical_address1: physical.address1,
        physical_address2: physical.address2,
        physical_city: physical.city,
        physical_state: physical.state_province_code,
        physical_zip_code: physical.zip_code,
        physical_country: physical.country_code,
        mailing_address1: mailing.address1,
        mailing_address2: mailing.address2,
        mailing_city: mailing.city,
        mailing_state: mailing.state_province_code,
        mailing_zip_code: mailing.zip_code,
        mailing_country: mailing.country_code,
        extra_information: restaurant.extra_information.clone(),
    }
}

// =============================================================================
// Retail locations
// =============================================================================

/// GET /api/biz/RetailLocations
pub async fn list_retail_locations(
    State(state): State<SharedState>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }

    let mut state = state.write().await;
    state.record_list_request("RetailLocations");

    let rows: Vec<RetailLocationSummary> = state
        .retail_locations
        .values()
        .map(summarize_retail_location)
        .collect();
    Json(paginate(rows, &params)).into_response()
}

/// GET /api/biz/RetailLocations/{id}
pub async fn get_retail_location(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    let id = decode_id(id);

    let state = state.read().await;
    match state.retail_locations.get(&id) {
        Some(location) => Json(location.clone()).into_response(),
        None => not_found("RetailLocation", &id),
    }
}

/// POST /api/biz/RetailLocations
pub async fn create_retail_location(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(location): Json<RetailLocation>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    if let Err(response) = validate_location_fields(
        &location.id,
        &location.location_name,
        &location.physical_address,
    ) {
        return response;
    }

    let id = location.id.clone().unwrap_or_default();
    let mut state = state.write().await;
    if state.retail_locations.contains_key(&id) {
        return already_exists("RetailLocation", &id);
    }

    state.retail_locations.insert(id, location.clone());
    Json(location).into_response()
}

/// PUT /api/biz/RetailLocations/{id}
pub async fn update_retail_location(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(location): Json<RetailLocation>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    if let Err(response) = validate_location_fields(
        &location.id,
        &location.location_name,
        &location.physical_address,
    ) {
        return response;
    }
    let id = decode_id(id);

    let mut state = state.write().await;
    if !state.retail_locations.contains_key(&id) {
        return not_found("RetailLocation", &id);
    }

    state.retail_locations.insert(id, location.clone());
    Json(location).into_response()
}

/// DELETE /api/biz/RetailLocations/{id}
pub async fn delete_retail_location(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    let id = decode_id(id);

    let mut state = state.write().await;
    match state.retail_locations.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("RetailLocation", &id),
    }
}

// =============================================================================
// Restaurants
// =============================================================================

/// GET /api/biz/Restaurants
pub async fn list_restaurants(
    State(state): State<SharedState>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }

    let mut state = state.write().await;
    state.record_list_request("Restaurants");

    let rows: Vec<RestaurantSummary> =
        state.restaurants.values().map(summarize_restaurant).collect();
    Json(paginate(rows, &params)).into_response()
}

/// GET /api/biz/Restaurants/{id}
pub async fn get_restaurant(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    let id = decode_id(id);

    let state = state.read().await;
    match state.restaurants.get(&id) {
        Some(restaurant) => Json(restaurant.clone()).into_response(),
        None => not_found("Restaurant", &id),
    }
}

/// POST /api/biz/Restaurants
pub async fn create_restaurant(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(restaurant): Json<Restaurant>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    if let Err(response) = validate_location_fields(
        &restaurant.id,
        &restaurant.location_name,
        &restaurant.physical_address,
    ) {
        return response;
    }

    let id = restaurant.id.clone().unwrap_or_default();
    let mut state = state.write().await;
    if state.restaurants.contains_key(&id) {
        return already_exists("Restaurant", &id);
    }

    state.restaurants.insert(id, restaurant.clone());
    Json(restaurant).into_response()
}

/// PUT /api/biz/Restaurants/{id}
pub async fn update_restaurant(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(restaurant): Json<Restaurant>,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    if let Err(response) = validate_location_fields(
        &restaurant.id,
        &restaurant.location_name,
        &restaurant.physical_address,
    ) {
        return response;
    }
    let id = decode_id(id);

    let mut state = state.write().await;
    if !state.restaurants.contains_key(&id) {
        return not_found("Restaurant", &id);
    }

    state.restaurants.insert(id, restaurant.clone());
    Json(restaurant).into_response()
}

/// DELETE /api/biz/Restaurants/{id}
pub async fn delete_restaurant(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = authorize(&state, &headers).await {
        return response;
    }
    let id = decode_id(id);

    let mut state = state.write().await;
    match state.restaurants.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("Restaurant", &id),
    }
}
