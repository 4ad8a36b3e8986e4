//! Conversion between wall-clock time and grid pixels.
//!
//! All functions are pure. Pixel coordinates are relative to the top-left
//! corner of the hour area (time labels excluded). Rows and columns are
//! clamped into the grid instead of failing; callers that need to know
//! whether a position was inside the grid use [`raw_row`] and [`raw_column`].

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use egui::{Pos2, Rect, Vec2};

use crate::models::event::CalendarEvent;
use crate::models::geometry::GridGeometry;

/// A pixel offset resolved to a whole-hour slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridTime {
    pub row: u32,
    pub hour: u32,
    /// `base_date` at `hour:00`.
    pub date_time: NaiveDateTime,
}

/// Vertical offset of `time` within its day column.
pub fn time_to_offset(time: NaiveDateTime, geometry: &GridGeometry) -> f32 {
    let hours = time.hour() as f32 - geometry.start_hour as f32;
    hours * geometry.cell_height + time.minute() as f32 / 60.0 * geometry.cell_height
}

/// Row under `pixel_y` before clamping. Negative above the grid.
pub fn raw_row(pixel_y: f32, geometry: &GridGeometry) -> i64 {
    (pixel_y / geometry.cell_height).floor() as i64
}

/// Resolve a vertical offset to a whole-hour slot on `base_date`.
///
/// Minutes are always `:00`; drops land on hour boundaries only.
pub fn offset_to_time(pixel_y: f32, geometry: &GridGeometry, base_date: NaiveDate) -> GridTime {
    let row = raw_row(pixel_y, geometry).clamp(0, geometry.max_row() as i64) as u32;
    let hour = geometry.start_hour + row;
    GridTime {
        row,
        hour,
        date_time: slot_start(base_date, 0, hour),
    }
}

/// Column under `pixel_x` before clamping. Always 0 in a day view.
pub fn raw_column(pixel_x: f32, geometry: &GridGeometry) -> i64 {
    if geometry.is_day_view() {
        return 0;
    }
    (pixel_x / geometry.cell_width).floor() as i64
}

pub fn pixel_to_column(pixel_x: f32, geometry: &GridGeometry) -> u32 {
    raw_column(pixel_x, geometry)
        .min(geometry.columns as i64 - 1)
        .max(0) as u32
}

pub fn duration_hours(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}

/// Date shown in `column`, counting from `base_date`.
pub fn column_date(base_date: NaiveDate, column: u32) -> NaiveDate {
    base_date + Duration::days(column as i64)
}

/// Start of the `hour` slot in `column`. Hour 24 rolls over to the next midnight.
pub fn slot_start(base_date: NaiveDate, column: u32, hour: u32) -> NaiveDateTime {
    column_date(base_date, column).and_time(NaiveTime::MIN) + Duration::hours(hour as i64)
}

/// Visual center of a cell. Day views report `x = 0`.
pub fn cell_center(row: u32, column: u32, geometry: &GridGeometry) -> Pos2 {
    let x = if geometry.is_day_view() {
        0.0
    } else {
        (column as f32 + 0.5) * geometry.cell_width
    };
    Pos2::new(x, (row as f32 + 0.5) * geometry.cell_height)
}

/// Where an existing event is drawn, in grid space.
///
/// `column_width` is the drawn width of one day column; day views have no
/// `cell_width` of their own so the host passes its measured width. Returns
/// `None` when the event's start date is not one of the visible columns.
pub fn block_rect(
    event: &CalendarEvent,
    geometry: &GridGeometry,
    base_date: NaiveDate,
    column_width: f32,
) -> Option<Rect> {
    let column = (event.start.date() - base_date).num_days();
    if column < 0 || column >= geometry.columns as i64 {
        return None;
    }
    let top = time_to_offset(event.start, geometry);
    let height = duration_hours(event.start, event.end) as f32 * geometry.cell_height;
    Some(Rect::from_min_size(
        Pos2::new(column as f32 * column_width, top),
        Vec2::new(column_width, height),
    ))
}

/// Short duration label for a block, e.g. `45m`, `2h`, `1h 30m`.
pub fn format_duration_label(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let minutes = (end - start).num_minutes().max(0);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
