use std::sync::{Arc, Mutex};

use booktrack_core::{update_catalog, Book, BookId, CatalogMsg, CatalogState, Page, PageError};
use booktrack_logging::{bt_debug, bt_warn};
use scopeguard::ScopeGuard;

use crate::{lock, ApiError, ApiRequest, SessionStore, Transport};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Parameters of a catalog search. An empty `query` means no filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub page: u32,
    pub size: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
}

/// Caches the current search page, the top-rated list and one selected book.
pub struct CatalogStore {
    state: Mutex<CatalogState>,
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
}

impl CatalogStore {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionStore>) -> Self {
        Self {
            state: Mutex::new(CatalogState::new()),
            transport,
            session,
        }
    }

    pub fn state(&self) -> CatalogState {
        lock(&self.state).clone()
    }

    pub fn current_page(&self) -> Page<Book> {
        lock(&self.state).current_page().clone()
    }

    pub fn top10(&self) -> Vec<Book> {
        lock(&self.state).top10().to_vec()
    }

    pub fn selected(&self) -> Option<Book> {
        lock(&self.state).selected().cloned()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading()
    }

    /// Runs a search and replaces the current page with the response.
    ///
    /// `loading` is cleared however the call ends, including when the
    /// future is dropped before completion. Overlapping searches are not
    /// coordinated: whichever response lands last wins.
    pub async fn search(&self, query: SearchQuery) -> Result<(), ApiError> {
        self.dispatch(CatalogMsg::SearchStarted);
        let pending = scopeguard::guard((), |()| self.dispatch(CatalogMsg::SearchFailed));

        let request = ApiRequest::get("/books")
            .query("query", &query.query)
            .query("page", query.page)
            .query("size", query.size);
        let page: Page<Book> = self
            .transport
            .send(request, self.session.snapshot().as_ref())
            .await?
            .json()?;

        match page.validate() {
            Ok(()) => {}
            Err(PageError::Oversized { len, size }) => {
                return Err(ApiError::InvalidPage { len, size });
            }
            Err(err @ PageError::NumberOutOfRange { .. }) => {
                // Servers answer out-of-range page requests with an empty page.
                bt_warn!("Accepting search page for {:?}: {}", query.query, err);
            }
        }

        ScopeGuard::into_inner(pending);
        bt_debug!(
            "Search {:?} page {} returned {} of {} books",
            query.query,
            page.number,
            page.content.len(),
            page.total_elements
        );
        self.dispatch(CatalogMsg::SearchResolved(page));
        Ok(())
    }

    pub async fn fetch_top10(&self) -> Result<(), ApiError> {
        let books: Vec<Book> = self
            .transport
            .send(ApiRequest::get("/books/top10"), self.session.snapshot().as_ref())
            .await?
            .json()?;
        self.dispatch(CatalogMsg::Top10Loaded(books));
        Ok(())
    }

    /// Loads one book into `selected`. On failure the previous selection stays.
    pub async fn fetch_details(&self, id: BookId) -> Result<(), ApiError> {
        let book: Book = self
            .transport
            .send(
                ApiRequest::get(format!("/books/{id}")),
                self.session.snapshot().as_ref(),
            )
            .await?
            .json()?;
        self.dispatch(CatalogMsg::DetailsLoaded(book));
        Ok(())
    }

    fn dispatch(&self, msg: CatalogMsg) {
        let mut guard = lock(&self.state);
        let current = std::mem::take(&mut *guard);
        *guard = update_catalog(current, msg);
    }
}
