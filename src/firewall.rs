//! Filtered object iteration.
//!
//! The platform's data firewall decides which records a user can see; this
//! module only consumes the generic object query endpoints that sit behind
//! it. `CountObjects` reports how many records match a SQL-style filter, and
//! `ListObjects` pages through the matching rows, exposing each record's
//! internal store ID (the `_StoreId` pseudo-property). The store ID can then
//! be used to fetch and mutate the detail record.
//!
//! [`iterate_by_filter`] drives both endpoints for long-running maintenance
//! jobs: it re-checks ticket freshness before every page and processes each
//! page's store IDs with a small, fixed concurrency cap so a batch cannot
//! overload the remote service.

use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::thread;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::BizClient;
use crate::error::Result;

/// Page size cap for object iteration. The object query endpoints are
/// heavier than plain lists, so pages stay smaller than the usual 200.
pub const MAX_OBJECT_PAGE_SIZE: u64 = 100;

/// Pseudo-property carrying a row's internal store ID.
///
/// Property names starting with an underscore are special and cannot be used
/// in filters.
pub const STORE_ID_PROPERTY: &str = "_StoreId";

/// Request body for the `CountObjects` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountObjects {
    /// The app whose objects are queried.
    pub app_name: String,
    /// Optional SQL-style filter limiting the rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Response body from the `CountObjects` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountObjectsResponse {
    pub count: u64,
}

/// Request body for the `ListObjects` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListObjects {
    pub app_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub page_index: u64,
    pub page_size: u64,
}

/// Response body from the `ListObjects` endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListObjectsResponse {
    /// The entity property names present on each row.
    #[serde(default)]
    pub properties: Vec<String>,
    /// The rows, keyed by property name.
    #[serde(default)]
    pub items: Vec<HashMap<String, Value>>,
}

impl ListObjectsResponse {
    /// The store IDs of the returned rows, in row order.
    pub fn store_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|row| row.get(STORE_ID_PROPERTY))
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    }
}

/// Count the objects of `app_name` matching `filter`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn count_objects(
    client: &BizClient,
    app_name: &str,
    filter: Option<&str>,
) -> Result<u64> {
    let request = CountObjects {
        app_name: app_name.to_string(),
        filter: filter.map(str::to_string),
    };
    let response: CountObjectsResponse = client.post_json("CountObjects", &request).await?;
    Ok(response.count)
}

/// Fetch one page of objects of `app_name` matching `filter`.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list_objects(
    client: &BizClient,
    request: &ListObjects,
) -> Result<ListObjectsResponse> {
    client.post_json("ListObjects", request).await
}

/// Concurrency cap for per-item callbacks: `min(available cores, 2)`.
///
/// The cap is static; the remote service offers no backpressure signal.
fn concurrency_cap() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .min(2)
}

/// Page through the objects of `app_name` matching `filter`, invoking
/// `per_item` with each row's store ID.
///
/// The matching rows are counted up front so the loop can stop as soon as
/// the running total reaches the count (or a page comes back short). Ticket
/// freshness is re-checked before every page, so arbitrarily long iterations
/// never fail on a mid-batch ticket expiry. Within a page the callback runs
/// at [`concurrency_cap`]-bounded concurrency.
///
/// Returns the number of matching objects reported by the count endpoint.
///
/// # Errors
///
/// Returns an error if counting, re-authentication or any page request
/// fails. Callback failures are the callback's own concern; it returns `()`.
///
/// # Example
///
/// ```ignore
/// let touched = firewall::iterate_by_filter(
///     &client,
///     "Users",
///     Some("Country = 'US'"),
///     |store_id| async move {
///         tracing::info!(%store_id, "processing");
///     },
/// )
/// .await?;
/// ```
pub async fn iterate_by_filter<F, Fut>(
    client: &BizClient,
    app_name: &str,
    filter: Option<&str>,
    per_item: F,
) -> Result<u64>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = ()>,
{
    let number_of_objects = count_objects(client, app_name, filter).await?;
    if number_of_objects == 0 {
        return Ok(0);
    }

    let page_size = MAX_OBJECT_PAGE_SIZE.min(number_of_objects);
    let concurrency = concurrency_cap();

    let mut page_index = 0;
    let mut total_processed = 0u64;

    loop {
        // Reauthenticate periodically on long tasks.
        client.reauthenticate_if_nearing_expiration().await?;

        let page = list_objects(
            client,
            &ListObjects {
                app_name: app_name.to_string(),
                filter: filter.map(str::to_string),
                page_index,
                page_size,
            },
        )
        .await?;

        let store_ids = page.store_ids();
        let page_len = store_ids.len() as u64;

        stream::iter(store_ids)
            .for_each_concurrent(concurrency, &per_item)
            .await;

        total_processed += page_len;

        let more_to_process = page_len == page_size && total_processed < number_of_objects;
        if !more_to_process {
            break;
        }
        page_index += 1;
    }

    Ok(number_of_objects)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_cap_bounds() {
        let cap = concurrency_cap();
        assert!(cap >= 1);
        assert!(cap <= 2);
    }

    #[test]
    fn test_request_wire_names() {
        let request = ListObjects {
            app_name: "Users".to_string(),
            filter: Some("Country = 'US'".to_string()),
            page_index: 2,
            page_size: 100,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "AppName": "Users",
                "Filter": "Country = 'US'",
                "PageIndex": 2,
                "PageSize": 100,
            })
        );

        let without_filter = CountObjects {
            app_name: "Users".to_string(),
            filter: None,
        };
        let json = serde_json::to_value(&without_filter).unwrap();
        assert_eq!(json, serde_json::json!({"AppName": "Users"}));
    }

    #[test]
    fn test_store_id_extraction() {
        let response: ListObjectsResponse = serde_json::from_str(
            r#"{
                "Properties": ["_StoreId", "UserName"],
                "Items": [
                    {"_StoreId": "101", "UserName": "jane.doe"},
                    {"_StoreId": "102", "UserName": "john.roe"},
                    {"UserName": "no.store.id"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(response.store_ids(), vec!["101", "102"]);
    }
}
