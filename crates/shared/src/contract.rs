//! Names shared with external collaborators: persisted-store keys and the
//! in-process event contract.

/// Store key for the privacy consent record (JSON object with boolean
/// capability fields).
pub const PRIVACY_CONSENT_KEY: &str = "privacy-consent";

/// Store key for the capture pipeline's gallery list (JSON array,
/// most-recent-first). Written exclusively by the capture pipeline;
/// read-only for this core.
pub const GALLERY_ITEMS_KEY: &str = "galleryItems";

/// Logical event name for gesture commands broadcast on the command bus.
pub const GESTURE_COMMAND_EVENT: &str = "gesture-command";
