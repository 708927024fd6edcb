use std::collections::BTreeSet;

use shared::error::ControlError;

pub const DEFAULT_ZOOM_LEVELS: [&str; 4] = ["0.5x", "1x", "2x", "5x"];
pub const DEFAULT_ZOOM: &str = "1x";
pub const DEFAULT_MODE: &str = "photo";

/// In-memory camera surface state: the selected zoom level from a fixed
/// ordered set, the active toggle-style controls, and the capture mode.
/// Component-scoped and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraControls {
    zoom_levels: Vec<String>,
    zoom_index: usize,
    active_toggles: BTreeSet<String>,
    mode: String,
}

impl CameraControls {
    pub fn new() -> Self {
        let zoom_levels: Vec<String> = DEFAULT_ZOOM_LEVELS.iter().map(|s| s.to_string()).collect();
        let zoom_index = zoom_levels
            .iter()
            .position(|level| level == DEFAULT_ZOOM)
            .unwrap_or(0);
        Self {
            zoom_levels,
            zoom_index,
            active_toggles: BTreeSet::new(),
            mode: DEFAULT_MODE.to_string(),
        }
    }

    pub fn zoom(&self) -> &str {
        &self.zoom_levels[self.zoom_index]
    }

    pub fn zoom_levels(&self) -> &[String] {
        &self.zoom_levels
    }

    /// Selects a level from the fixed set. A level outside the set is a
    /// caller error and is rejected; there is no snap-to-nearest.
    pub fn select_zoom(&mut self, level: &str) -> Result<(), ControlError> {
        match self.zoom_levels.iter().position(|known| known == level) {
            Some(index) => {
                self.zoom_index = index;
                Ok(())
            }
            None => Err(ControlError::UnknownZoomLevel {
                requested: level.to_string(),
                available: self.zoom_levels.clone(),
            }),
        }
    }

    /// Steps to the next level, clamped at the top of the set.
    pub fn zoom_in(&mut self) {
        if self.zoom_index + 1 < self.zoom_levels.len() {
            self.zoom_index += 1;
        }
    }

    /// Steps to the previous level, clamped at the bottom of the set.
    pub fn zoom_out(&mut self) {
        self.zoom_index = self.zoom_index.saturating_sub(1);
    }

    /// Flips a toggle-style control; returns the new state.
    pub fn toggle(&mut self, control: &str) -> bool {
        if self.active_toggles.remove(control) {
            false
        } else {
            self.active_toggles.insert(control.to_string());
            true
        }
    }

    pub fn is_active(&self, control: &str) -> bool {
        self.active_toggles.contains(control)
    }

    pub fn active_toggles(&self) -> impl Iterator<Item = &str> {
        self.active_toggles.iter().map(String::as_str)
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn set_mode(&mut self, mode: &str) {
        self.mode = mode.to_string();
    }
}

impl Default for CameraControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/controls_tests.rs"]
mod tests;
