//! Sequential page accumulation
//!
//! Pages are requested one after another because the decision to request
//! page `n + 1` depends on the caption of page `n`.

use std::future::Future;

use tracing::debug;

use crate::error::{LernzielError, Result};
use crate::types::{PageResult, RawRow};

/// Request pages starting at index 0 until the caption reports `end >= total`.
///
/// `request_page` receives the 0-based page index and must return that
/// page's extracted rows. The page size is whatever the caller requested;
/// it is not assumed here. Rows are returned in page order.
///
/// # Errors
/// * Any error returned by `request_page`, unchanged
/// * `LernzielError::ExtractionError` if a page reports more items but its
///   `end` did not move past the previous page's `end`
///
/// # Example
/// ```
/// use lernziel_core::pagination::fetch_all;
/// use lernziel_core::{LernzielError, PageResult};
///
/// # async fn example() -> lernziel_core::Result<()> {
/// let rows = fetch_all(|_page| async {
///     Ok::<_, LernzielError>(PageResult::new(Vec::new(), 0, 0))
/// })
/// .await?;
/// assert!(rows.is_empty());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_all<F, Fut>(mut request_page: F) -> Result<Vec<RawRow>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<PageResult>>,
{
    let mut rows = Vec::new();
    let mut page = 0;
    let mut previous_end = None;

    loop {
        let result = request_page(page).await?;
        let (end, total) = (result.end, result.total);
        debug!(page, rows = result.rows.len(), end, total, "Fetched page");

        let has_next_page = result.has_next_page();
        rows.extend(result.rows);

        if !has_next_page {
            break;
        }

        if previous_end.is_some_and(|previous| end <= previous) {
            return Err(LernzielError::ExtractionError(format!(
                "Pagination stalled at page {}: {} of {} items",
                page, end, total
            )));
        }

        previous_end = Some(end);
        page += 1;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;

    fn rows_with_ids(ids: std::ops::Range<u32>) -> Vec<RawRow> {
        ids.map(|id| {
            let mut row = RawRow::default();
            row.insert_link("Id", id.to_string());
            row
        })
        .collect()
    }

    #[tokio::test]
    async fn test_fetch_all_three_pages() {
        let pages = vec![
            PageResult::new(rows_with_ids(0..1000), 1000, 2500),
            PageResult::new(rows_with_ids(1000..2000), 2000, 2500),
            PageResult::new(rows_with_ids(2000..2500), 2500, 2500),
        ];
        let mut requested = Vec::new();

        let rows = fetch_all(|page| {
            requested.push(page);
            ready(Ok(pages[page as usize].clone()))
        })
        .await
        .unwrap();

        assert_eq!(requested, vec![0, 1, 2]);
        assert_eq!(rows.len(), 2500);
        assert_eq!(rows[0].link("Id"), Some("0"));
        assert_eq!(rows[1000].link("Id"), Some("1000"));
        assert_eq!(rows[2499].link("Id"), Some("2499"));
    }

    #[tokio::test]
    async fn test_fetch_all_zero_total_single_request() {
        let mut requests = 0;

        let rows = fetch_all(|_page| {
            requests += 1;
            ready(Ok(PageResult::new(Vec::new(), 0, 0)))
        })
        .await
        .unwrap();

        assert_eq!(requests, 1);
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_small_pages() {
        // Ten items, three per page: pages end at 3, 6, 9, 10
        let mut requested = Vec::new();

        let rows = fetch_all(|page| {
            requested.push(page);
            let start = page * 3;
            let end = (start + 3).min(10);
            ready(Ok(PageResult::new(rows_with_ids(start..end), end, 10)))
        })
        .await
        .unwrap();

        assert_eq!(requested, vec![0, 1, 2, 3]);
        assert_eq!(rows.len(), 10);
    }

    #[tokio::test]
    async fn test_fetch_all_propagates_error() {
        let mut requests = 0;

        let result = fetch_all(|page| {
            requests += 1;
            ready(if page == 0 {
                Ok(PageResult::new(rows_with_ids(0..2), 2, 4))
            } else {
                Err(LernzielError::ElementNotFound("div.paginationControl".to_string()))
            })
        })
        .await;

        assert_eq!(requests, 2);
        assert!(matches!(result, Err(LernzielError::ElementNotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_all_stalled_pagination() {
        let mut requests = 0;

        let result = fetch_all(|_page| {
            requests += 1;
            ready(Ok(PageResult::new(rows_with_ids(0..2), 2, 4)))
        })
        .await;

        assert_eq!(requests, 2);
        match result {
            Err(LernzielError::ExtractionError(msg)) => assert!(msg.contains("stalled")),
            other => panic!("Expected ExtractionError, got {:?}", other),
        }
    }
}
