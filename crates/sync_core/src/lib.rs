//! Reactive device-state synchronization core for the camera companion app.
//!
//! Three mechanisms live here: a process-wide [`CommandBus`] that fans
//! gesture commands out to whichever surfaces are mounted, a consent codec
//! over the persisted key-value store with read-merge-write updates, and a
//! poll-based reconciler that re-derives store-backed views on a fixed
//! cadence because the store offers no change notifications.

pub mod command_bus;
pub mod consent;
pub mod controls;
pub mod gallery;
pub mod reconciler;
pub mod surface;

pub use command_bus::{CommandBus, Subscription};
pub use consent::ConsentStore;
pub use controls::CameraControls;
pub use gallery::{GalleryBadge, GalleryFeed};
pub use reconciler::PollHandle;
pub use surface::{CameraSurface, CaptureTrigger, MissingCaptureTrigger};
