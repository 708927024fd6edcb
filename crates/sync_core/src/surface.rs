use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{anyhow, Result};
use shared::domain::CommandMessage;
use tracing::{trace, warn};

use crate::{
    command_bus::{CommandBus, Subscription},
    controls::CameraControls,
};

/// Boundary to the external capture pipeline. The pipeline owns capture
/// correctness and gallery writes; this core only requests a capture.
pub trait CaptureTrigger: Send + Sync {
    fn request_capture(&self) -> Result<()>;
}

/// Null object for contexts with no capture pipeline wired in.
pub struct MissingCaptureTrigger;

impl CaptureTrigger for MissingCaptureTrigger {
    fn request_capture(&self) -> Result<()> {
        Err(anyhow!("capture pipeline unavailable"))
    }
}

/// The camera control surface: a command-bus consumer that maps gesture
/// commands onto its local control state and the capture trigger.
///
/// The action vocabulary is an open string contract; actions this surface
/// does not recognize are ignored. Recognized actions: `shutter`,
/// `zoom-in`, `zoom-out`, plus the structured prefixes `select-zoom:`,
/// `toggle:`, and `mode:`.
pub struct CameraSurface {
    controls: Arc<Mutex<CameraControls>>,
    subscription: Subscription,
}

impl CameraSurface {
    pub fn mount(bus: &Arc<CommandBus>, capture: Arc<dyn CaptureTrigger>) -> Self {
        let controls = Arc::new(Mutex::new(CameraControls::new()));
        let listener_controls = Arc::clone(&controls);

        let subscription = bus.subscribe(move |message| {
            Self::handle(&listener_controls, capture.as_ref(), message);
        });

        Self {
            controls,
            subscription,
        }
    }

    fn handle(
        controls: &Mutex<CameraControls>,
        capture: &dyn CaptureTrigger,
        message: &CommandMessage,
    ) {
        let mut controls = controls.lock().unwrap_or_else(PoisonError::into_inner);
        match message.action.as_str() {
            "shutter" => {
                if let Err(err) = capture.request_capture() {
                    warn!(error = %err, "shutter command could not reach the capture pipeline");
                }
            }
            "zoom-in" => controls.zoom_in(),
            "zoom-out" => controls.zoom_out(),
            other => {
                if let Some(level) = other.strip_prefix("select-zoom:") {
                    if let Err(err) = controls.select_zoom(level) {
                        warn!(error = %err, "rejected zoom selection");
                    }
                } else if let Some(control) = other.strip_prefix("toggle:") {
                    controls.toggle(control);
                } else if let Some(mode) = other.strip_prefix("mode:") {
                    controls.set_mode(mode);
                } else {
                    trace!(action = other, "ignoring unrecognized gesture action");
                }
            }
        }
    }

    /// Snapshot of the current control state.
    pub fn controls(&self) -> CameraControls {
        self.controls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Deregisters from the bus; idempotent. Must be called when the
    /// surface unmounts so stale handlers stop acting on commands.
    pub fn unmount(&self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod tests;
