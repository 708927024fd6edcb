use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Confidence assigned to deterministic UI taps, as opposed to recognizer
/// output which carries its own score.
pub const TAP_CONFIDENCE: f64 = 1.0;

/// Gesture metadata attached to every command message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureInfo {
    #[serde(rename = "type")]
    pub kind: String,
    /// Recognizer confidence in `[0, 1]`; `1.0` for taps.
    pub confidence: f64,
    /// Milliseconds since the Unix epoch, captured at dispatch.
    pub timestamp: i64,
}

/// A single broadcast value describing a gesture- or tap-triggered action.
/// Constructed at dispatch, delivered to current listeners, then discarded;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandMessage {
    pub action: String,
    pub gesture: GestureInfo,
}

impl CommandMessage {
    pub fn new(
        action: impl Into<String>,
        gesture_kind: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            action: action.into(),
            gesture: GestureInfo {
                kind: gesture_kind.into(),
                confidence,
                timestamp: Utc::now().timestamp_millis(),
            },
        }
    }

    pub fn tap(action: impl Into<String>) -> Self {
        Self::new(action, "tap", TAP_CONFIDENCE)
    }
}

/// The persisted privacy consent record. All five capability fields are
/// always present in memory; a field absent in the stored JSON loads as
/// `false` (fail closed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConsent {
    pub location: bool,
    pub camera: bool,
    pub microphone: bool,
    pub analytics: bool,
    pub storage: bool,
}

/// A partial consent update. `None` fields are left untouched by the merge,
/// so a partial update can never erase unrelated consent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsentPatch {
    pub location: Option<bool>,
    pub camera: Option<bool>,
    pub microphone: Option<bool>,
    pub analytics: Option<bool>,
    pub storage: Option<bool>,
}

impl ConsentPatch {
    pub fn apply_to(&self, base: PrivacyConsent) -> PrivacyConsent {
        PrivacyConsent {
            location: self.location.unwrap_or(base.location),
            camera: self.camera.unwrap_or(base.camera),
            microphone: self.microphone.unwrap_or(base.microphone),
            analytics: self.analytics.unwrap_or(base.analytics),
            storage: self.storage.unwrap_or(base.storage),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One capture record in the gallery list. The capture pipeline may attach
/// additional fields; only the thumbnail reference matters here, so unknown
/// fields are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub thumbnail: String,
}
