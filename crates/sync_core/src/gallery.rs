use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use anyhow::Result;
use shared::{contract::GALLERY_ITEMS_KEY, domain::GalleryItem};
use storage::KeyValueStore;
use tracing::warn;

use crate::reconciler::{self, PollHandle};

/// Read-only projection over the capture pipeline's gallery list. This core
/// never appends to the list; it only consumes the most recent thumbnail.
#[derive(Clone)]
pub struct GalleryFeed {
    store: Arc<dyn KeyValueStore>,
}

impl GalleryFeed {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Thumbnail of the most recent capture, if any. An absent key or a
    /// malformed list reads as "no thumbnail"; only a store I/O failure is
    /// an error, so the reconciler can retain its previous view.
    pub async fn latest_thumbnail(&self) -> Result<Option<String>> {
        let Some(raw) = self.store.get(GALLERY_ITEMS_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<GalleryItem>>(&raw) {
            Ok(items) => Ok(items.first().map(|item| item.thumbnail.clone())),
            Err(err) => {
                warn!(error = %err, "stored gallery list is malformed; treating as empty");
                Ok(None)
            }
        }
    }
}

/// The gallery preview badge: keeps an eventually-consistent copy of the
/// latest thumbnail by polling the store, since the store has no change
/// notifications.
pub struct GalleryBadge {
    latest: Arc<Mutex<Option<String>>>,
    poll: PollHandle,
}

impl GalleryBadge {
    pub fn mount(feed: GalleryFeed, every: Duration) -> Self {
        let latest = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&latest);

        let poll = reconciler::spawn(
            move || {
                let feed = feed.clone();
                async move { feed.latest_thumbnail().await }
            },
            move |thumbnail: &Option<String>| {
                *slot.lock().unwrap_or_else(PoisonError::into_inner) = thumbnail.clone();
            },
            every,
        );

        Self { latest, poll }
    }

    pub fn current(&self) -> Option<String> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stops polling; idempotent. An unmounting surface must call this to
    /// release the timer.
    pub fn unmount(&self) {
        self.poll.stop();
    }
}

#[cfg(test)]
#[path = "tests/gallery_tests.rs"]
mod tests;
