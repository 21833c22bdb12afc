use std::collections::HashSet;

use crate::{
    Book, CatalogMsg, CatalogState, Effect, FavoritesMsg, FavoritesState, SessionMsg,
    SessionState, TOP_RATED_LIMIT,
};

/// Pure session update: applies a message and returns the persistence effects.
///
/// Only a login and a logout touch durable storage; restoring from storage
/// never writes back.
pub fn update_session(mut state: SessionState, msg: SessionMsg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        SessionMsg::Restored(session) => {
            state.set(session.filter(|session| session.is_usable()));
            Vec::new()
        }
        SessionMsg::LoggedIn(session) => {
            state.set(Some(session.clone()));
            vec![Effect::PersistSession(session)]
        }
        SessionMsg::LoggedOut => {
            state.set(None);
            vec![Effect::ClearSession]
        }
    };

    (state, effects)
}

/// Pure catalog update. Every fetch result replaces its slice wholesale.
pub fn update_catalog(mut state: CatalogState, msg: CatalogMsg) -> CatalogState {
    match msg {
        CatalogMsg::SearchStarted => state.set_loading(true),
        CatalogMsg::SearchResolved(page) => {
            state.replace_page(page);
            state.set_loading(false);
        }
        CatalogMsg::SearchFailed => state.set_loading(false),
        CatalogMsg::Top10Loaded(mut books) => {
            books.truncate(TOP_RATED_LIMIT);
            state.replace_top10(books);
        }
        CatalogMsg::DetailsLoaded(book) => state.replace_selected(book),
    }
    state
}

/// Pure favorites update. A settled toggle always asks for a refresh.
pub fn update_favorites(
    mut state: FavoritesState,
    msg: FavoritesMsg,
) -> (FavoritesState, Vec<Effect>) {
    let effects = match msg {
        FavoritesMsg::Loaded(books) => {
            state.replace_items(dedupe_by_id(books));
            Vec::new()
        }
        FavoritesMsg::ToggleSettled => vec![Effect::RefreshFavorites],
    };

    (state, effects)
}

fn dedupe_by_id(books: Vec<Book>) -> Vec<Book> {
    let mut seen = HashSet::with_capacity(books.len());
    books
        .into_iter()
        .filter(|book| seen.insert(book.id))
        .collect()
}
