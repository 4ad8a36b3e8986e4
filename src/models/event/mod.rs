// Event module
// Read-only calendar event as handed to the time grid by the host

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for calendar events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event id cannot be empty")]
    EmptyId,
    #[error("event title cannot be empty")]
    EmptyTitle,
    #[error("event end time must be after start time")]
    EndBeforeStart,
    #[error("color must be in hex format (#RRGGBB or #RGB), got {0:?}")]
    InvalidColor(String),
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Calendar event placed on the time grid.
///
/// Timestamps are wall-clock values: the grid maps hours of the day to pixels
/// and never needs a time zone. The grid only proposes new times for an
/// event; persisting them is up to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CalendarEvent {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use calendar_grid::models::event::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 3, 10)
    ///     .unwrap()
    ///     .and_hms_opt(10, 0, 0)
    ///     .unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = CalendarEvent::new("evt-1", "Team Meeting", start, end).unwrap();
    /// assert_eq!(event.duration(), chrono::Duration::hours(1));
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventError> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            description: None,
            location: None,
            start,
            end,
            color: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> CalendarEventBuilder {
        CalendarEventBuilder::default()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventError> {
        if self.id.trim().is_empty() {
            return Err(EventError::EmptyId);
        }

        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }

        if self.end <= self.start {
            return Err(EventError::EndBeforeStart);
        }

        if let Some(ref color) = self.color {
            if !is_hex_color(color) {
                return Err(EventError::InvalidColor(color.clone()));
            }
        }

        Ok(())
    }

    /// Get the duration of the event
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Copy of this event with new boundaries. The original is left untouched.
    pub fn with_times(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }
}

fn is_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse a `#RRGGBB` or `#RGB` color into an egui color.
pub fn parse_color(color: &str) -> Option<egui::Color32> {
    if !is_hex_color(color) {
        return None;
    }
    let digits = &color[1..];
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    if digits.len() == 6 {
        Some(egui::Color32::from_rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ))
    } else {
        // #RGB expands each nibble
        let expand = |s: &str| channel(s).map(|v| v * 17);
        Some(egui::Color32::from_rgb(
            expand(&digits[0..1])?,
            expand(&digits[1..2])?,
            expand(&digits[2..3])?,
        ))
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct CalendarEventBuilder {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    color: Option<String>,
}

impl CalendarEventBuilder {
    /// Set the event id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the event title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the event description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the event location
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the start time
    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the end time
    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Build the event
    pub fn build(self) -> Result<CalendarEvent, EventError> {
        let event = CalendarEvent {
            id: self.id.ok_or(EventError::MissingField("event id"))?,
            title: self.title.ok_or(EventError::MissingField("event title"))?,
            description: self.description,
            location: self.location,
            start: self.start.ok_or(EventError::MissingField("event start time"))?,
            end: self.end.ok_or(EventError::MissingField("event end time"))?,
            color: self.color,
        };
        event.validate()?;
        Ok(event)
    }
}
