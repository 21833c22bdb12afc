use crate::{AuthSession, Book, BookId, Page};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    current: Option<AuthSession>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.username.as_str())
    }

    pub fn credential(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.token.as_str())
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.current.as_ref()
    }

    pub(crate) fn set(&mut self, session: Option<AuthSession>) {
        self.current = session;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogState {
    current_page: Page<Book>,
    top10: Vec<Book>,
    selected: Option<Book>,
    loading: bool,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> &Page<Book> {
        &self.current_page
    }

    pub fn top10(&self) -> &[Book] {
        &self.top10
    }

    pub fn selected(&self) -> Option<&Book> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Total number of matches reported by the last search.
    pub fn total_elements(&self) -> u64 {
        self.current_page.total_elements
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub(crate) fn replace_page(&mut self, page: Page<Book>) {
        self.current_page = page;
    }

    pub(crate) fn replace_top10(&mut self, books: Vec<Book>) {
        self.top10 = books;
    }

    pub(crate) fn replace_selected(&mut self, book: Book) {
        self.selected = Some(book);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FavoritesState {
    items: Vec<Book>,
}

impl FavoritesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Book] {
        &self.items
    }

    pub fn contains(&self, book_id: BookId) -> bool {
        self.items.iter().any(|book| book.id == book_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn replace_items(&mut self, items: Vec<Book>) {
        self.items = items;
    }
}
