use std::sync::Arc;

use anyhow::{Context, Result};
use shared::{
    contract::PRIVACY_CONSENT_KEY,
    domain::{ConsentPatch, PrivacyConsent},
};
use storage::KeyValueStore;
use tracing::{debug, warn};

/// Codec over the persisted privacy consent record.
///
/// The store is the source of truth across app restarts; in-memory copies
/// are caches. Loading fails closed: a missing or corrupt record reads as
/// all capabilities denied, never as an error. Updates are read-merge-write
/// with last-write-wins and no cross-call isolation; two updates racing on
/// stale reads lose the earlier one, an accepted limitation of the store.
pub struct ConsentStore {
    store: Arc<dyn KeyValueStore>,
}

impl ConsentStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads the current record. Absent, unreadable, or unparseable state
    /// all resolve to the all-denied default.
    pub async fn load(&self) -> PrivacyConsent {
        let raw = match self.store.get(PRIVACY_CONSENT_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return PrivacyConsent::default(),
            Err(err) => {
                warn!(error = %err, "failed to read consent record; treating as all denied");
                return PrivacyConsent::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(consent) => consent,
            Err(err) => {
                warn!(error = %err, "stored consent record is malformed; treating as all denied");
                PrivacyConsent::default()
            }
        }
    }

    /// Merges `patch` onto the current record and persists the full merged
    /// record. Safe with an empty patch (no-op merge, still persisted).
    /// This is the only write path for the consent key.
    pub async fn update(&self, patch: ConsentPatch) -> Result<PrivacyConsent> {
        let merged = patch.apply_to(self.load().await);

        let raw = serde_json::to_string(&merged).context("failed to encode consent record")?;
        self.store
            .set(PRIVACY_CONSENT_KEY, &raw)
            .await
            .context("failed to persist consent record")?;

        debug!(?merged, "persisted consent record");
        Ok(merged)
    }
}

#[cfg(test)]
#[path = "tests/consent_tests.rs"]
mod tests;
