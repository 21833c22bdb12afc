//! BookTrack client: authenticated transport, durable session and the
//! catalog and favorites stores.
mod catalog;
mod client;
mod error;
mod favorites;
mod session;
mod settings;
mod storage;
mod transport;

use std::sync::{Mutex, MutexGuard};

pub use catalog::{CatalogStore, SearchQuery, DEFAULT_PAGE_SIZE};
pub use client::BookTrackClient;
pub use error::{ApiError, AuthError, StorageError};
pub use favorites::FavoritesStore;
pub use session::{SessionStore, SESSION_KEY};
pub use settings::{ClientSettings, DEFAULT_BASE_URL};
pub use storage::{ensure_storage_dir, FileStore, KeyValueStore, MemoryStore};
pub use transport::{authorize, ApiRequest, ApiResponse, ReqwestTransport, Transport};

/// Store state is only mutated through pure reducers, so a poisoned lock
/// still holds a consistent value.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
