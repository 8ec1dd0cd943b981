//! Draining a paginated source into a single list.
//!
//! The traversal is count-driven: the first response's `total` and the
//! requester's page size decide how many follow-up pages are fetched,
//! regardless of how many items each page actually carries. Fetches are
//! strictly sequential and every offset is requested at most once.

use std::future::Future;

use auxkit_api::types::{PageRequest, PageResponse};

/// Traversal settings shared by [`loop_page_all`] and [`loop_page_all_sync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLoop {
    /// Upper bound on fetches, the first page included. `None` means the
    /// loop is bounded only by `ceil(total / page_size)`.
    max_pages: Option<u64>,
}

impl PageLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the traversal after `max_pages` fetches. Values below 1 are
    /// treated as 1.
    pub fn with_max_pages(mut self, max_pages: u64) -> Self {
        self.max_pages = Some(max_pages.max(1));
        self
    }

    pub fn max_pages(&self) -> Option<u64> {
        self.max_pages
    }

    /// Drains an async source. `initial` defaults to offset 0 with the
    /// default page size.
    ///
    /// The first error returned by `fetch_page` aborts the traversal and is
    /// returned unchanged; items gathered so far are dropped.
    pub async fn run<T, E, F, Fut>(
        &self,
        mut fetch_page: F,
        initial: Option<PageRequest>,
    ) -> Result<Vec<T>, E>
    where
        F: FnMut(PageRequest) -> Fut,
        Fut: Future<Output = Result<Option<PageResponse<T>>, E>>,
    {
        let request = initial.unwrap_or_default();
        let first = fetch_page(request).await?;
        let mut traversal = Traversal::begin(request, first, self.max_pages);
        while let Some(request) = traversal.next_request() {
            let page = fetch_page(request).await?;
            traversal.accept(request, page);
        }
        Ok(traversal.finish())
    }

    /// Blocking counterpart of [`PageLoop::run`].
    pub fn run_sync<T, E, F>(
        &self,
        mut fetch_page: F,
        initial: Option<PageRequest>,
    ) -> Result<Vec<T>, E>
    where
        F: FnMut(PageRequest) -> Result<Option<PageResponse<T>>, E>,
    {
        let request = initial.unwrap_or_default();
        let first = fetch_page(request)?;
        let mut traversal = Traversal::begin(request, first, self.max_pages);
        while let Some(request) = traversal.next_request() {
            let page = fetch_page(request)?;
            traversal.accept(request, page);
        }
        Ok(traversal.finish())
    }
}

/// Fetches every page of an async source and concatenates the items.
pub async fn loop_page_all<T, E, F, Fut>(
    fetch_page: F,
    initial: Option<PageRequest>,
) -> Result<Vec<T>, E>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Option<PageResponse<T>>, E>>,
{
    PageLoop::default().run(fetch_page, initial).await
}

/// Fetches every page of a blocking source and concatenates the items.
pub fn loop_page_all_sync<T, E, F>(
    fetch_page: F,
    initial: Option<PageRequest>,
) -> Result<Vec<T>, E>
where
    F: FnMut(PageRequest) -> Result<Option<PageResponse<T>>, E>,
{
    PageLoop::default().run_sync(fetch_page, initial)
}

/// Accumulator and cursor for one traversal.
struct Traversal<T> {
    items: Vec<T>,
    total: u64,
    /// Requester's page size; the responder's value is never used after
    /// the first page.
    page_size: u64,
    pending: Option<PageRequest>,
    fetched: u64,
    max_pages: Option<u64>,
}

impl<T> Traversal<T> {
    fn begin(
        request: PageRequest,
        first: Option<PageResponse<T>>,
        max_pages: Option<u64>,
    ) -> Self {
        let first = first.unwrap_or_default();
        let reported_size = first.page_size;
        let total = first.total;
        let items = first.into_items();

        let single_page = items.is_empty()
            || reported_size <= 1
            || total == 0
            || request.page_size == 0
            || total <= request.page_size;
        if single_page {
            tracing::debug!(
                "page traversal finished after first page: {} items, total {}, page size {}",
                items.len(),
                total,
                request.page_size
            );
        }

        Self {
            items,
            total,
            page_size: request.page_size,
            pending: (!single_page).then(|| request.next()),
            fetched: 1,
            max_pages,
        }
    }

    fn next_request(&mut self) -> Option<PageRequest> {
        let request = self.pending?;
        if let Some(max) = self.max_pages {
            if self.fetched >= max {
                tracing::warn!(
                    "page traversal stopped at {} pages before offset {} (total {})",
                    self.fetched,
                    request.offset,
                    self.total
                );
                self.pending = None;
                return None;
            }
        }
        Some(request)
    }

    fn accept(&mut self, request: PageRequest, page: Option<PageResponse<T>>) {
        let items = page.map(PageResponse::into_items).unwrap_or_default();
        tracing::debug!("fetched page {} with {} items", request.offset, items.len());
        self.items.extend(items);
        self.fetched += 1;

        let covered = request.offset.saturating_add(1).saturating_mul(self.page_size);
        self.pending = (covered < self.total).then(|| request.next());
    }

    fn finish(self) -> Vec<T> {
        self.items
    }
}
