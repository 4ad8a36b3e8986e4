// Settings module
// User-tunable interaction settings, stored as TOML

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::geometry::{
    GeometryError, GridGeometry, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_END_HOUR,
    DEFAULT_START_HOUR,
};

pub const DEFAULT_SNAP_MINUTES: u32 = 15;
pub const DEFAULT_CAPTURE_RADIUS: f32 = 20.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("snap minutes must divide an hour evenly, got {0}")]
    InvalidSnapMinutes(u32),
    #[error("capture radius must be positive, got {0}")]
    InvalidCaptureRadius(f32),
    #[error("invalid grid layout: {0}")]
    Geometry(#[from] GeometryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Day,
    #[default]
    Week,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Granularity of resize gestures, in minutes.
    pub snap_minutes: u32,
    /// Distance in pixels within which a slot becomes magnetic.
    pub capture_radius: f32,
    pub view: ViewKind,
    pub cell_width: f32,
    pub cell_height: f32,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            snap_minutes: DEFAULT_SNAP_MINUTES,
            capture_radius: DEFAULT_CAPTURE_RADIUS,
            view: ViewKind::default(),
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
        }
    }
}

impl InteractionSettings {
    /// Grid layout described by these settings.
    pub fn geometry(&self) -> GridGeometry {
        match self.view {
            ViewKind::Day => GridGeometry::day(self.cell_height, self.start_hour, self.end_hour),
            ViewKind::Week => GridGeometry::week(
                self.cell_width,
                self.cell_height,
                self.start_hour,
                self.end_hour,
            ),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.snap_minutes == 0 || self.snap_minutes > 60 || 60 % self.snap_minutes != 0 {
            return Err(SettingsError::InvalidSnapMinutes(self.snap_minutes));
        }
        if !(self.capture_radius > 0.0) {
            return Err(SettingsError::InvalidCaptureRadius(self.capture_radius));
        }
        self.geometry().validate()?;
        Ok(())
    }
}
