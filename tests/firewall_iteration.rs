//! Integration tests for the filtered object iteration helper.

#![cfg(feature = "test-server")]

use std::sync::Arc;

use bizapi::firewall;
use bizapi::mock_server::{Fixtures, MockServer, MockState};
use bizapi::BizClient;
use tokio::sync::Mutex;

async fn server_with_object_rows(count: usize) -> MockServer {
    let state = MockState::new().with_objects("Users", Fixtures::object_rows(count));
    MockServer::with_state(state).await
}

#[tokio::test]
async fn test_iterates_every_matching_row() {
    let server = server_with_object_rows(250).await;
    let client = BizClient::new(&server.client_config()).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let total = firewall::iterate_by_filter(&client, "Users", None, |store_id| {
        let seen = seen.clone();
        async move {
            seen.lock().await.push(store_id);
        }
    })
    .await
    .unwrap();

    assert_eq!(total, 250);

    let mut seen = seen.lock().await.clone();
    assert_eq!(seen.len(), 250);

    // Every store ID was delivered exactly once.
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 250);

    server.shutdown().await;
}

#[tokio::test]
async fn test_filter_limits_the_rows_processed() {
    // 250 rows cycling US/CA/GB: 83 of them are US.
    let server = server_with_object_rows(250).await;
    let client = BizClient::new(&server.client_config()).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let total = firewall::iterate_by_filter(&client, "Users", Some("Country = 'US'"), |store_id| {
        let seen = seen.clone();
        async move {
            seen.lock().await.push(store_id);
        }
    })
    .await
    .unwrap();

    assert_eq!(total, 83);
    assert_eq!(seen.lock().await.len(), 83);

    server.shutdown().await;
}

#[tokio::test]
async fn test_zero_matches_short_circuits() {
    let server = server_with_object_rows(10).await;
    let client = BizClient::new(&server.client_config()).unwrap();

    let total = firewall::iterate_by_filter(&client, "Users", Some("Country = 'XX'"), |_| async {
        panic!("callback must not run when nothing matches");
    })
    .await
    .unwrap();

    assert_eq!(total, 0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_app_yields_zero() {
    let server = server_with_object_rows(10).await;
    let client = BizClient::new(&server.client_config()).unwrap();

    let total = firewall::iterate_by_filter(&client, "NoSuchApp", None, |_| async {})
        .await
        .unwrap();
    assert_eq!(total, 0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_count_and_list_endpoints_directly() {
    let server = server_with_object_rows(7).await;
    let client = BizClient::new(&server.client_config()).unwrap();

    let count = firewall::count_objects(&client, "Users", None).await.unwrap();
    assert_eq!(count, 7);

    let page = firewall::list_objects(
        &client,
        &firewall::ListObjects {
            app_name: "Users".to_string(),
            filter: None,
            page_index: 0,
            page_size: 5,
        },
    )
    .await
    .unwrap();

    assert_eq!(page.items.len(), 5);
    assert!(page
        .properties
        .iter()
        .any(|p| p == firewall::STORE_ID_PROPERTY));
    assert_eq!(page.store_ids().len(), 5);

    server.shutdown().await;
}
