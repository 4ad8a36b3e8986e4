//! Moving an event block to another hour or day.
//!
//! `start` opens a session, `move_to` replaces the live candidate on every
//! pointer move and `stop` commits it to a [`DropHandler`]. Dropping outside
//! the grid is not a cancel: it commits with `is_valid: false` and the host
//! leaves the event where it was.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use egui::{Pos2, Vec2};
use serde::Serialize;

use super::error::InteractionError;
use super::grid;
use super::signal::{ActiveGesture, DragSignal};
use super::snap::SnapZone;
use crate::models::event::CalendarEvent;
use crate::models::geometry::GridGeometry;

/// Where a drag would land if released now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragCandidate {
    /// Pointer in grid space, unaffected by magnetic snapping.
    pub pointer: Pos2,
    pub column: u32,
    pub row: u32,
    pub result: NaiveDateTime,
    pub is_valid: bool,
    /// Set when a magnetic slot chose `result` and `column`.
    pub magnetic: bool,
}

impl DragCandidate {
    pub fn from_pointer(pointer: Pos2, geometry: &GridGeometry, base_date: NaiveDate) -> Self {
        let target = grid::offset_to_time(pointer.y, geometry, base_date);
        let column = grid::pixel_to_column(pointer.x, geometry);

        // Validity looks at the unclamped position
        let raw_row = grid::raw_row(pointer.y, geometry);
        let raw_column = grid::raw_column(pointer.x, geometry);
        let is_valid = raw_row >= 0
            && raw_row <= geometry.max_row() as i64
            && raw_column >= 0
            && raw_column < geometry.columns as i64;

        Self {
            pointer,
            column,
            row: target.row,
            result: grid::slot_start(base_date, column, target.hour),
            is_valid,
            magnetic: false,
        }
    }

    /// Retarget onto a magnetic slot. The pointer is kept as is.
    pub fn snapped_to(self, zone: &SnapZone) -> Self {
        Self {
            column: zone.column,
            row: zone.row,
            result: zone.start,
            is_valid: true,
            magnetic: true,
            ..self
        }
    }
}

/// Outcome of a finished drag, handed to [`DropHandler::on_drag_stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DropZone {
    /// New start of the event.
    pub date: NaiveDateTime,
    /// New end, keeping the original duration.
    pub end: NaiveDateTime,
    pub column: u32,
    pub is_valid: bool,
}

impl DropZone {
    pub fn time(&self) -> NaiveTime {
        self.date.time()
    }

    /// The moved event, or `None` for an invalid drop.
    pub fn apply(&self, event: &CalendarEvent) -> Option<CalendarEvent> {
        self.is_valid.then(|| event.with_times(self.date, self.end))
    }
}

/// Receives the result of every finished drag.
pub trait DropHandler {
    fn on_drag_stop(&mut self, event: &CalendarEvent, zone: DropZone);
}

impl<F> DropHandler for F
where
    F: FnMut(&CalendarEvent, DropZone),
{
    fn on_drag_stop(&mut self, event: &CalendarEvent, zone: DropZone) {
        self(event, zone)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

#[derive(Debug)]
struct DragSession {
    event: CalendarEvent,
    grab_offset: Vec2,
    candidate: DragCandidate,
    _gesture: ActiveGesture,
}

#[derive(Debug)]
pub struct DragController {
    geometry: GridGeometry,
    base_date: NaiveDate,
    signal: DragSignal,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(geometry: GridGeometry, base_date: NaiveDate, signal: DragSignal) -> Self {
        Self {
            geometry,
            base_date,
            signal,
            session: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged_event(&self) -> Option<&CalendarEvent> {
        self.session.as_ref().map(|s| &s.event)
    }

    pub fn candidate(&self) -> Option<&DragCandidate> {
        self.session.as_ref().map(|s| &s.candidate)
    }

    /// Top-left of the block as it follows the pointer.
    pub fn block_origin(&self) -> Option<Pos2> {
        self.session
            .as_ref()
            .map(|s| s.candidate.pointer - s.grab_offset)
    }

    /// Replace the layout. Only possible while idle.
    pub fn set_layout(
        &mut self,
        geometry: GridGeometry,
        base_date: NaiveDate,
    ) -> Result<(), InteractionError> {
        if self.session.is_some() {
            return Err(InteractionError::LayoutLocked);
        }
        self.geometry = geometry;
        self.base_date = base_date;
        Ok(())
    }

    /// Begin dragging `event`, grabbed at `pointer` (grid space).
    pub fn start(&mut self, event: &CalendarEvent, pointer: Pos2) -> Result<(), InteractionError> {
        let gesture = self.signal.acquire()?;

        let column = (event.start.date() - self.base_date)
            .num_days()
            .min(self.geometry.columns as i64 - 1)
            .max(0) as f32;
        let block_origin = Pos2::new(
            column * self.geometry.cell_width,
            grid::time_to_offset(event.start, &self.geometry),
        );

        let candidate = DragCandidate::from_pointer(pointer, &self.geometry, self.base_date);
        log::debug!(
            "Drag start for event {} at {} (candidate {})",
            event.id,
            event.start,
            candidate.result
        );
        self.session = Some(DragSession {
            event: event.clone(),
            grab_offset: pointer - block_origin,
            candidate,
            _gesture: gesture,
        });
        Ok(())
    }

    /// Recompute the candidate for a new pointer position.
    ///
    /// A magnetic slot overrides the target time and column. Does nothing
    /// while idle.
    pub fn move_to(&mut self, pointer: Pos2, magnetic: Option<&SnapZone>) -> Option<&DragCandidate> {
        let session = self.session.as_mut()?;
        let candidate = DragCandidate::from_pointer(pointer, &self.geometry, self.base_date);
        session.candidate = match magnetic {
            Some(zone) => candidate.snapped_to(zone),
            None => candidate,
        };
        log::trace!(
            "Drag candidate {} col {} valid={}",
            session.candidate.result,
            session.candidate.column,
            session.candidate.is_valid
        );
        Some(&session.candidate)
    }

    /// Finish the drag at `pointer` and report the drop to `handler`.
    ///
    /// Valid drops keep the event's duration. Invalid drops are reported
    /// too, with `is_valid: false`. Does nothing while idle.
    pub fn stop<H>(
        &mut self,
        pointer: Pos2,
        magnetic: Option<&SnapZone>,
        handler: &mut H,
    ) -> Option<DropZone>
    where
        H: DropHandler + ?Sized,
    {
        self.move_to(pointer, magnetic)?;
        let session = self.session.take()?;
        let candidate = session.candidate;
        let zone = DropZone {
            date: candidate.result,
            end: candidate.result + session.event.duration(),
            column: candidate.column,
            is_valid: candidate.is_valid,
        };
        if zone.is_valid {
            log::debug!("Drop event {} at {}", session.event.id, zone.date);
        } else {
            log::debug!("Invalid drop for event {}, leaving it in place", session.event.id);
        }
        // Lower the shared flag before the host reacts to the drop
        drop(session._gesture);
        handler.on_drag_stop(&session.event, zone);
        Some(zone)
    }

    /// Discard the session without reporting anything.
    ///
    /// Used when the view goes away mid-gesture. Returns whether a session
    /// was active.
    pub fn teardown(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!("Drag of event {} discarded", session.event.id);
                true
            }
            None => false,
        }
    }
}
