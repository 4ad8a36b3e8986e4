//! Pixel layout of one time-grid view instance.
//!
//! A view is `columns` day-columns wide and covers the hours
//! `start_hour..=end_hour`. Row `r` is the hour `start_hour + r`, so valid
//! rows are `0..=end_hour - start_hour`.

use egui::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CELL_HEIGHT: f32 = 64.0;
pub const DEFAULT_CELL_WIDTH: f32 = 160.0;
pub const DEFAULT_START_HOUR: u32 = 8;
pub const DEFAULT_END_HOUR: u32 = 22;
pub const WEEK_COLUMNS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("end hour {end} must be after start hour {start}")]
    InvertedHours { start: u32, end: u32 },
    #[error("end hour {0} is past the last hour of the day (23)")]
    EndHourOutOfDay(u32),
    #[error("cell height must be positive, got {0}")]
    NonPositiveCellHeight(f32),
    #[error("cell width cannot be negative, got {0}")]
    NegativeCellWidth(f32),
    #[error("a grid needs at least one column")]
    NoColumns,
    #[error("a zero-width grid has exactly one column, got {0}")]
    ZeroWidthMultiColumn(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Width of one day column. Zero means a single-column day view.
    pub cell_width: f32,
    /// Height of one hour.
    pub cell_height: f32,
    pub columns: u32,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::day(DEFAULT_CELL_HEIGHT, DEFAULT_START_HOUR, DEFAULT_END_HOUR)
    }
}

impl GridGeometry {
    /// Single-column day view.
    pub fn day(cell_height: f32, start_hour: u32, end_hour: u32) -> Self {
        Self {
            cell_width: 0.0,
            cell_height,
            columns: 1,
            start_hour,
            end_hour,
        }
    }

    /// Seven-column week view.
    pub fn week(cell_width: f32, cell_height: f32, start_hour: u32, end_hour: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            columns: WEEK_COLUMNS,
            start_hour,
            end_hour,
        }
    }

    /// Geometry to use when the host has not measured its grid yet.
    pub fn resolve(geometry: Option<&GridGeometry>) -> GridGeometry {
        match geometry {
            Some(geometry) if geometry.validate().is_ok() => *geometry,
            Some(geometry) => {
                log::warn!("Ignoring invalid grid geometry {:?}, using default", geometry);
                GridGeometry::default()
            }
            None => GridGeometry::default(),
        }
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.end_hour <= self.start_hour {
            return Err(GeometryError::InvertedHours {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        // The end hour is itself a drop row, so its slot must start on the same day
        if self.end_hour > 23 {
            return Err(GeometryError::EndHourOutOfDay(self.end_hour));
        }
        // Written this way so NaN is rejected too
        if !(self.cell_height > 0.0) {
            return Err(GeometryError::NonPositiveCellHeight(self.cell_height));
        }
        if !(self.cell_width >= 0.0) {
            return Err(GeometryError::NegativeCellWidth(self.cell_width));
        }
        if self.columns == 0 {
            return Err(GeometryError::NoColumns);
        }
        if self.is_day_view() && self.columns != 1 {
            return Err(GeometryError::ZeroWidthMultiColumn(self.columns));
        }
        Ok(())
    }

    pub fn is_day_view(&self) -> bool {
        self.cell_width == 0.0
    }

    /// Highest valid row index.
    pub fn max_row(&self) -> u32 {
        self.end_hour - self.start_hour
    }

    /// Number of hour rows drawn, including the `end_hour` row.
    pub fn row_count(&self) -> u32 {
        self.max_row() + 1
    }

    /// Pixel size of the hour area. A day view reports zero width.
    pub fn grid_size(&self) -> Vec2 {
        Vec2::new(
            self.cell_width * self.columns as f32,
            self.cell_height * self.row_count() as f32,
        )
    }
}
