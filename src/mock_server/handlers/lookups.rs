//! Lookup table endpoint handlers.
//!
//! All six lookup resources are read-only lists with the same paging rules
//! as the record lists.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::{authorize, paginate, PageParams, SharedState};

macro_rules! lookup_handler {
    ($name:ident, $field:ident, $resource:literal) => {
        #[doc = concat!("GET /api/biz/", $resource)]
        pub async fn $name(
            State(state): State<SharedState>,
            Query(params): Query<PageParams>,
            headers: HeaderMap,
        ) -> Response {
            if let Err(response) = authorize(&state, &headers).await {
                return response;
            }

            let mut state = state.write().await;
            state.record_list_request($resource);

            let rows = state.$field.clone();
            Json(paginate(rows, &params)).into_response()
        }
    };
}

lookup_handler!(list_countries, countries, "Countries");
lookup_handler!(list_states, states, "States");
lookup_handler!(list_profiles, profiles, "Profiles");
lookup_handler!(list_entity_types, entity_types, "EntityTypes");
lookup_handler!(list_concepts, concepts, "Concepts");
lookup_handler!(list_contact_types, contact_types, "ContactTypes");
