//! Pagination utilities for business API list endpoints.
//!
//! List endpoints take zero-based `pageIndex`/`pageSize` query parameters and
//! return bare JSON arrays with no total count, so the only termination
//! signal is a short page: every page is full except the last one.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{BizError, Result};

/// Default page size for list-all operations.
///
/// Also the server-enforced ceiling: requesting more still returns at most
/// 200 rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// `pageSize` value that asks the server to apply its own default.
pub const SERVER_DEFAULT_PAGE_SIZE: i32 = -1;

/// Maximum pages a list-all loop will fetch (safety limit).
const MAX_PAGES: u32 = 10_000;

/// Query parameters for paginated list requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    /// Zero-based page index.
    #[serde(rename = "pageIndex")]
    pub page_index: u32,
    /// Requested page size. `-1` requests the server default; the server
    /// caps pages at 200 rows regardless.
    #[serde(rename = "pageSize")]
    pub page_size: i32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: SERVER_DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    /// Page query for a specific page index and size.
    #[must_use]
    pub fn new(page_index: u32, page_size: i32) -> Self {
        Self {
            page_index,
            page_size,
        }
    }
}

/// Fetch every item from a paged source, keeping those the filter accepts.
///
/// Invokes `fetch_page` with increasing zero-based page indices until a page
/// comes back with fewer items than `page_size`. The filter only trims the
/// returned collection; it never affects paging, so a data source holding an
/// exact multiple of `page_size` costs one final empty page request.
///
/// # Errors
///
/// Returns an error if `page_size` is zero or any page request fails.
///
/// # Example
///
/// ```no_run
/// # use bizapi::{BizClient, pagination};
/// # use bizapi::models::UserSummary;
/// # async fn example(client: &BizClient) -> bizapi::Result<()> {
/// let admins = pagination::list_all(200, |page_index| {
///     let client = client.clone();
///     async move {
///         client
///             .get_json_with_query::<Vec<UserSummary>, _>(
///                 "Users",
///                 &pagination::PageQuery::new(page_index, 200),
///             )
///             .await
///     }
/// }, |user: &UserSummary| user.user_name.starts_with("admin."))
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn list_all<T, F, Fut, P>(page_size: u32, mut fetch_page: F, filter: P) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
    P: Fn(&T) -> bool,
{
    if page_size == 0 {
        return Err(BizError::InvalidConfig(
            "page size must be greater than zero".to_string(),
        ));
    }

    let mut items = Vec::new();
    let mut page_index = 0;

    loop {
        let page = fetch_page(page_index).await?;
        let page_len = page.len();

        items.extend(page.into_iter().filter(|item| filter(item)));

        if page_len < page_size as usize {
            break;
        }

        page_index += 1;
        if page_index >= MAX_PAGES {
            tracing::warn!("reached pagination limit of {MAX_PAGES} pages, stopping");
            break;
        }
    }

    Ok(items)
}

/// A filter that accepts every item.
///
/// Useful as the `filter` argument of [`list_all`] when all records are
/// wanted.
pub fn accept_all<T>(_: &T) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// A paged source over `0..total` that records how many pages were read.
    fn source(total: u32, page_size: u32, requests: &AtomicU32) -> impl Fn(u32) -> Vec<u32> + '_ {
        move |page_index| {
            requests.fetch_add(1, Ordering::SeqCst);
            let start = page_index * page_size;
            let end = (start + page_size).min(total);
            (start..end.max(start)).collect()
        }
    }

    #[tokio::test]
    async fn test_terminates_on_short_page() {
        // 250 items at 100 per page: pages of 100, 100, 50.
        let requests = AtomicU32::new(0);
        let fetch = source(250, 100, &requests);

        let items = list_all(100, |i| std::future::ready(Ok(fetch(i))), accept_all)
            .await
            .unwrap();

        assert_eq!(items.len(), 250);
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exact_multiple_costs_one_empty_page() {
        // 200 items at 100 per page: two full pages, then one empty page.
        let requests = AtomicU32::new(0);
        let fetch = source(200, 100, &requests);

        let items = list_all(100, |i| std::future::ready(Ok(fetch(i))), accept_all)
            .await
            .unwrap();

        assert_eq!(items.len(), 200);
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_single_short_page() {
        let requests = AtomicU32::new(0);
        let fetch = source(7, 100, &requests);

        let items = list_all(100, |i| std::future::ready(Ok(fetch(i))), accept_all)
            .await
            .unwrap();

        assert_eq!(items.len(), 7);
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_filter_trims_results_but_not_paging() {
        let requests = AtomicU32::new(0);
        let fetch = source(250, 100, &requests);

        let evens = list_all(100, |i| std::future::ready(Ok(fetch(i))), |n: &u32| n % 2 == 0)
            .await
            .unwrap();

        // The filter halves the results without changing the page count.
        assert_eq!(evens.len(), 125);
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected() {
        let result = list_all(0, |_| std::future::ready(Ok(Vec::<u32>::new())), accept_all).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_page_error_propagates() {
        let result: Result<Vec<u32>> = list_all(
            100,
            |_| {
                std::future::ready(Err(BizError::ApiError {
                    message: "boom".to_string(),
                    status_code: 500,
                }))
            },
            accept_all,
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_page_query_wire_names() {
        let query = PageQuery::new(3, 200);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"pageIndex": 3, "pageSize": 200}));

        let default = PageQuery::default();
        assert_eq!(default.page_index, 0);
        assert_eq!(default.page_size, SERVER_DEFAULT_PAGE_SIZE);
    }
}
