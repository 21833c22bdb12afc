use std::sync::{Arc, Mutex};

use booktrack_core::{update_favorites, Book, BookId, Effect, FavoritesMsg, FavoritesState};
use booktrack_logging::{bt_debug, bt_warn};

use crate::{lock, ApiError, ApiRequest, SessionStore, Transport};

/// Mirrors the signed-in user's favorites. The server is the source of truth;
/// the local list is only ever replaced by a fresh snapshot.
pub struct FavoritesStore {
    state: Mutex<FavoritesState>,
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
}

impl FavoritesStore {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionStore>) -> Self {
        Self {
            state: Mutex::new(FavoritesState::new()),
            transport,
            session,
        }
    }

    pub fn state(&self) -> FavoritesState {
        lock(&self.state).clone()
    }

    pub fn items(&self) -> Vec<Book> {
        lock(&self.state).items().to_vec()
    }

    pub fn contains(&self, book_id: BookId) -> bool {
        lock(&self.state).contains(book_id)
    }

    pub async fn fetch_favorites(&self) -> Result<(), ApiError> {
        let books: Vec<Book> = self
            .transport
            .send(
                ApiRequest::get("/users/favorites"),
                self.session.snapshot().as_ref(),
            )
            .await?
            .json()?;
        bt_debug!("Loaded {} favorites", books.len());
        self.dispatch(FavoritesMsg::Loaded(books));
        Ok(())
    }

    /// Asks the server to flip membership of `book_id`, then resynchronizes.
    ///
    /// The refresh runs even when the toggle fails, since a request that
    /// timed out may still have been applied. A toggle failure takes
    /// precedence over a refresh failure in the returned error.
    pub async fn toggle_favorite(&self, book_id: BookId) -> Result<(), ApiError> {
        let toggled = self
            .transport
            .send(
                ApiRequest::post(format!("/users/favorites/{book_id}")),
                self.session.snapshot().as_ref(),
            )
            .await;
        if let Err(err) = &toggled {
            bt_warn!("Toggling favorite {} failed: {}", book_id, err);
        }

        let mut refreshed = Ok(());
        for effect in self.dispatch(FavoritesMsg::ToggleSettled) {
            if effect == Effect::RefreshFavorites {
                refreshed = self.fetch_favorites().await;
            }
        }

        match (toggled, refreshed) {
            (Err(toggle_err), Err(refresh_err)) => {
                bt_warn!("Favorites refresh after failed toggle also failed: {}", refresh_err);
                Err(toggle_err)
            }
            (Err(toggle_err), Ok(())) => Err(toggle_err),
            (Ok(_), refreshed) => refreshed,
        }
    }

    fn dispatch(&self, msg: FavoritesMsg) -> Vec<Effect> {
        let mut guard = lock(&self.state);
        let (next, effects) = update_favorites(std::mem::take(&mut *guard), msg);
        *guard = next;
        effects
    }
}
