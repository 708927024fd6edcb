use thiserror::Error;

/// Rejections from the in-memory camera control state. These are caller
/// errors, not recoverable data corruption, so they surface as typed errors
/// instead of defaulting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    #[error("unknown zoom level '{requested}'; available levels: {available:?}")]
    UnknownZoomLevel {
        requested: String,
        available: Vec<String>,
    },
}
