// Test fixtures - reusable test data
// Provides consistent dates, layouts and events across all test files

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use calendar_grid::models::event::CalendarEvent;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday Mar 10, 2025, first column of the fixture week
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    /// `hour:minute` on the given day of March 2025
    pub fn march(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    /// `hour:minute` on the fixture Monday
    pub fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
        march(10, hour, minute)
    }
}

/// Sample layouts for testing
pub mod layouts {
    use calendar_grid::models::geometry::GridGeometry;

    /// Day view, 64px rows from 08:00
    pub fn day() -> GridGeometry {
        GridGeometry::day(64.0, 8, 22)
    }

    /// Week view, 160x64 cells from 08:00
    pub fn week() -> GridGeometry {
        GridGeometry::week(160.0, 64.0, 8, 22)
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// One-hour meeting on the fixture Monday, 10:00-11:00
    pub fn meeting() -> CalendarEvent {
        CalendarEvent::builder()
            .id("meeting")
            .title("Team Meeting")
            .start(dates::monday_at(10, 0))
            .end(dates::monday_at(11, 0))
            .color("#4A90D9")
            .build()
            .unwrap()
    }

    /// 09:00-10:00 block used by resize scenarios
    pub fn morning_block() -> CalendarEvent {
        CalendarEvent::new(
            "morning",
            "Morning Block",
            dates::monday_at(9, 0),
            dates::monday_at(10, 0),
        )
        .unwrap()
    }

    /// 90-minute workshop on Wednesday afternoon
    pub fn workshop() -> CalendarEvent {
        CalendarEvent::new(
            "workshop",
            "Workshop",
            dates::march(12, 14, 30),
            dates::march(12, 16, 0),
        )
        .unwrap()
    }
}
