//! Magnetic snapping of a dragged block onto nearby hour slots.
//!
//! While a gesture is active the detector measures the pointer's distance to
//! the center of every visible slot. The nearest slot within the capture
//! radius becomes magnetic and overrides the drag target. Ties go to the
//! first slot in row-major order.

use chrono::{NaiveDate, NaiveDateTime};
use egui::Pos2;

use super::grid;
use super::signal::DragSignal;
use crate::models::geometry::GridGeometry;

/// One candidate slot: an hour row in a day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapZone {
    pub row: u32,
    pub column: u32,
    pub hour: u32,
    /// Start of the slot.
    pub start: NaiveDateTime,
    /// Visual center of the cell, in grid space.
    pub center: Pos2,
}

/// Change in the magnetic slot reported by [`MagneticSnapDetector::probe`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapTransition {
    Entered(SnapZone),
    Exited,
}

impl SnapTransition {
    /// The newly magnetic zone, or `None` when magnetism was lost.
    pub fn zone(&self) -> Option<SnapZone> {
        match self {
            SnapTransition::Entered(zone) => Some(*zone),
            SnapTransition::Exited => None,
        }
    }
}

/// Observer for magnetic state changes, usually the view drawing the indicator.
pub trait SnapObserver {
    fn on_magnetic_hover(&mut self, zone: Option<SnapZone>);
}

impl<F> SnapObserver for F
where
    F: FnMut(Option<SnapZone>),
{
    fn on_magnetic_hover(&mut self, zone: Option<SnapZone>) {
        self(zone)
    }
}

#[derive(Debug)]
pub struct MagneticSnapDetector {
    slots: Vec<SnapZone>,
    capture_radius: f32,
    /// Day views have no column width, so only vertical distance counts.
    vertical_only: bool,
    signal: DragSignal,
    magnetic: Option<usize>,
}

impl MagneticSnapDetector {
    pub fn new(
        geometry: &GridGeometry,
        base_date: NaiveDate,
        capture_radius: f32,
        signal: DragSignal,
    ) -> Self {
        Self {
            slots: enumerate_slots(geometry, base_date),
            capture_radius,
            vertical_only: geometry.is_day_view(),
            signal,
            magnetic: None,
        }
    }

    pub fn slots(&self) -> &[SnapZone] {
        &self.slots
    }

    pub fn capture_radius(&self) -> f32 {
        self.capture_radius
    }

    /// The slot currently pulling the drag target, if any.
    pub fn magnetic(&self) -> Option<&SnapZone> {
        self.magnetic.map(|idx| &self.slots[idx])
    }

    /// Nearest slot within the capture radius. Does not touch magnetic state.
    pub fn nearest(&self, pointer: Pos2) -> Option<&SnapZone> {
        self.nearest_index(pointer).map(|idx| &self.slots[idx])
    }

    fn nearest_index(&self, pointer: Pos2) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, slot) in self.slots.iter().enumerate() {
            let distance = self.distance(pointer, slot.center);
            // Strict comparison keeps the first slot on ties
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((idx, distance));
            }
        }
        best.filter(|(_, distance)| *distance <= self.capture_radius)
            .map(|(idx, _)| idx)
    }

    fn distance(&self, pointer: Pos2, center: Pos2) -> f32 {
        if self.vertical_only {
            (pointer.y - center.y).abs()
        } else {
            pointer.distance(center)
        }
    }

    /// Re-test the pointer against all slots.
    ///
    /// Returns a transition only when the magnetic slot changes. Without an
    /// active gesture no proximity test runs and any stale magnetic slot is
    /// released.
    pub fn probe(&mut self, pointer: Pos2) -> Option<SnapTransition> {
        if !self.signal.is_active() {
            return self.release();
        }

        let nearest = self.nearest_index(pointer);
        if nearest == self.magnetic {
            return None;
        }
        self.magnetic = nearest;
        match nearest {
            Some(idx) => {
                let zone = self.slots[idx];
                log::trace!("Magnetic slot {:02}:00 col {}", zone.hour, zone.column);
                Some(SnapTransition::Entered(zone))
            }
            None => Some(SnapTransition::Exited),
        }
    }

    /// Drop the magnetic slot, reporting `Exited` if there was one.
    pub fn release(&mut self) -> Option<SnapTransition> {
        self.magnetic.take().map(|_| SnapTransition::Exited)
    }
}

fn enumerate_slots(geometry: &GridGeometry, base_date: NaiveDate) -> Vec<SnapZone> {
    let mut slots = Vec::with_capacity((geometry.row_count() * geometry.columns) as usize);
    for row in 0..geometry.row_count() {
        for column in 0..geometry.columns {
            let hour = geometry.start_hour + row;
            slots.push(SnapZone {
                row,
                column,
                hour,
                start: grid::slot_start(base_date, column, hour),
                center: grid::cell_center(row, column, geometry),
            });
        }
    }
    slots
}
