//! Pointer-driven gestures on one time-grid view.
//!
//! [`TimeGridInteraction`] is what a view owns: it holds the shared
//! [`DragSignal`] and hands clones of it to the drag controller, the resize
//! controller and the snap detector. The host feeds it pointer events in grid
//! space and receives intents through an [`InteractionHandler`].

use chrono::NaiveDate;
use egui::Pos2;

use super::drag::{DragController, DropHandler, DropZone};
use super::error::InteractionError;
use super::resize::{BlockUpdate, ResizeController, ResizeEdge, ResizeHandler};
use super::signal::DragSignal;
use super::snap::{MagneticSnapDetector, SnapObserver};
use crate::models::event::CalendarEvent;
use crate::models::geometry::GridGeometry;
use crate::models::settings::InteractionSettings;

/// Everything a host has to react to.
pub trait InteractionHandler: DropHandler + ResizeHandler + SnapObserver {}

impl<T> InteractionHandler for T where T: DropHandler + ResizeHandler + SnapObserver {}

/// What a released gesture produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Moved(DropZone),
    Resized(BlockUpdate),
}

#[derive(Debug)]
pub struct TimeGridInteraction {
    geometry: GridGeometry,
    base_date: NaiveDate,
    capture_radius: f32,
    signal: DragSignal,
    drag: DragController,
    resize: ResizeController,
    snap: MagneticSnapDetector,
}

impl TimeGridInteraction {
    pub fn new(
        geometry: GridGeometry,
        base_date: NaiveDate,
        snap_minutes: u32,
        capture_radius: f32,
    ) -> Result<Self, InteractionError> {
        geometry.validate()?;
        let signal = DragSignal::new();
        Ok(Self {
            drag: DragController::new(geometry, base_date, signal.clone()),
            resize: ResizeController::new(&geometry, snap_minutes, signal.clone())?,
            snap: MagneticSnapDetector::new(&geometry, base_date, capture_radius, signal.clone()),
            geometry,
            base_date,
            capture_radius,
            signal,
        })
    }

    pub fn from_settings(
        settings: &InteractionSettings,
        base_date: NaiveDate,
    ) -> Result<Self, InteractionError> {
        Self::new(
            settings.geometry(),
            base_date,
            settings.snap_minutes,
            settings.capture_radius,
        )
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn base_date(&self) -> NaiveDate {
        self.base_date
    }

    /// Handle on the shared flag for sibling widgets that only need to know
    /// whether something is being dragged.
    pub fn signal(&self) -> DragSignal {
        self.signal.clone()
    }

    pub fn is_gesture_active(&self) -> bool {
        self.signal.is_active()
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn resize(&self) -> &ResizeController {
        &self.resize
    }

    pub fn snap(&self) -> &MagneticSnapDetector {
        &self.snap
    }

    /// Swap in a new layout, e.g. after the view is resized or paged.
    pub fn set_layout(
        &mut self,
        geometry: GridGeometry,
        base_date: NaiveDate,
    ) -> Result<(), InteractionError> {
        if self.signal.is_active() {
            return Err(InteractionError::LayoutLocked);
        }
        geometry.validate()?;
        if geometry == self.geometry && base_date == self.base_date {
            return Ok(());
        }
        self.drag.set_layout(geometry, base_date)?;
        self.resize.set_geometry(&geometry)?;
        self.snap =
            MagneticSnapDetector::new(&geometry, base_date, self.capture_radius, self.signal.clone());
        self.geometry = geometry;
        self.base_date = base_date;
        log::debug!("Time grid layout now {:?} from {}", geometry, base_date);
        Ok(())
    }

    pub fn begin_drag(&mut self, event: &CalendarEvent, pointer: Pos2) -> Result<(), InteractionError> {
        self.drag.start(event, pointer).map_err(|err| {
            log::warn!("Refusing to drag event {}: {}", event.id, err);
            err
        })
    }

    pub fn begin_resize(
        &mut self,
        event: &CalendarEvent,
        edge: ResizeEdge,
        pointer: Pos2,
    ) -> Result<(), InteractionError> {
        self.resize
            .start(event.id.clone(), edge, pointer.y, event.start, event.end)
            .map_err(|err| {
                log::warn!("Refusing to resize event {}: {}", event.id, err);
                err
            })
    }

    /// Feed a pointer move. Magnetic entry and exit go to the host.
    pub fn pointer_moved<H>(&mut self, pointer: Pos2, host: &mut H)
    where
        H: InteractionHandler + ?Sized,
    {
        if self.drag.is_dragging() {
            if let Some(transition) = self.snap.probe(pointer) {
                host.on_magnetic_hover(transition.zone());
            }
            self.drag.move_to(pointer, self.snap.magnetic());
        } else if self.resize.is_resizing() {
            self.resize.move_to(pointer.y);
        }
    }

    /// Feed the pointer release and commit whichever gesture was active.
    pub fn pointer_released<H>(&mut self, pointer: Pos2, host: &mut H) -> Option<GestureOutcome>
    where
        H: InteractionHandler + ?Sized,
    {
        if self.drag.is_dragging() {
            if let Some(transition) = self.snap.probe(pointer) {
                host.on_magnetic_hover(transition.zone());
            }
            let zone = self.drag.stop(pointer, self.snap.magnetic(), host);
            self.release_magnet(host);
            zone.map(GestureOutcome::Moved)
        } else if self.resize.is_resizing() {
            self.resize.move_to(pointer.y);
            self.resize.stop(host).map(GestureOutcome::Resized)
        } else {
            None
        }
    }

    /// Abandon any gesture without committing, as when the view is closed.
    pub fn teardown<H>(&mut self, host: &mut H)
    where
        H: InteractionHandler + ?Sized,
    {
        let discarded = self.drag.teardown() | self.resize.teardown();
        if discarded {
            log::debug!("Time grid gesture abandoned");
        }
        self.release_magnet(host);
    }

    fn release_magnet<H>(&mut self, host: &mut H)
    where
        H: SnapObserver + ?Sized,
    {
        if self.snap.release().is_some() {
            host.on_magnetic_hover(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::snap::SnapZone;
    use chrono::NaiveDateTime;
    use mockall::predicate::eq;
    use mockall::{mock, Sequence};

    mock! {
        Host {}
        impl DropHandler for Host {
            fn on_drag_stop(&mut self, event: &CalendarEvent, zone: DropZone);
        }
        impl ResizeHandler for Host {
            fn on_update_block(&mut self, block_id: &str, update: BlockUpdate);
        }
        impl SnapObserver for Host {
            fn on_magnetic_hover(&mut self, zone: Option<SnapZone>);
        }
    }

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn week() -> TimeGridInteraction {
        TimeGridInteraction::new(GridGeometry::week(160.0, 64.0, 8, 22), base(), 15, 20.0).unwrap()
    }

    fn meeting() -> CalendarEvent {
        CalendarEvent::new("m1", "Meeting", at(10, 10), at(10, 11)).unwrap()
    }

    #[test]
    fn test_magnetic_drag_commits_snapped_slot() {
        let mut interaction = week();
        let mut host = MockHost::new();
        let mut seq = Sequence::new();

        host.expect_on_magnetic_hover()
            .withf(|zone| zone.map(|z| (z.hour, z.column)) == Some((13, 2)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        host.expect_on_drag_stop()
            .withf(|event, zone| {
                event.id == "m1" && zone.is_valid && zone.date == at(12, 13) && zone.end == at(12, 14)
            })
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        host.expect_on_magnetic_hover()
            .with(eq(None))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        host.expect_on_update_block().never();

        interaction.begin_drag(&meeting(), Pos2::new(10.0, 140.0)).unwrap();
        assert!(interaction.is_gesture_active());

        // Column 2 spans 320..480, 13:00 is row 5 centred at y = 352
        interaction.pointer_moved(Pos2::new(405.0, 360.0), &mut host);
        interaction.pointer_moved(Pos2::new(398.0, 355.0), &mut host);
        let outcome = interaction.pointer_released(Pos2::new(398.0, 355.0), &mut host);

        assert!(matches!(outcome, Some(GestureOutcome::Moved(zone)) if zone.date == at(12, 13)));
        assert!(!interaction.is_gesture_active());
        assert!(interaction.snap().magnetic().is_none());
    }

    #[test]
    fn test_plain_drag_without_magnet() {
        let mut interaction = week();
        let mut host = MockHost::new();
        host.expect_on_magnetic_hover().never();
        host.expect_on_drag_stop()
            .withf(|_, zone| zone.is_valid && zone.date == at(11, 15))
            .times(1)
            .return_const(());

        interaction.begin_drag(&meeting(), Pos2::new(10.0, 140.0)).unwrap();
        // Cell corner, far from every center
        interaction.pointer_moved(Pos2::new(161.0, 449.0), &mut host);
        interaction.pointer_released(Pos2::new(161.0, 449.0), &mut host);
    }

    #[test]
    fn test_resize_gesture_commits_update() {
        let mut interaction = week();
        let mut host = MockHost::new();
        host.expect_on_drag_stop().never();
        host.expect_on_magnetic_hover().never();
        host.expect_on_update_block()
            .withf(|id, update| id == "m1" && update.end_time == at(10, 12) && update.start_time == at(10, 10))
            .times(1)
            .return_const(());

        let event = meeting();
        interaction.begin_resize(&event, ResizeEdge::Bottom, Pos2::new(40.0, 192.0)).unwrap();
        interaction.pointer_moved(Pos2::new(40.0, 230.0), &mut host);
        let outcome = interaction.pointer_released(Pos2::new(40.0, 256.0), &mut host);
        assert_eq!(
            outcome,
            Some(GestureOutcome::Resized(BlockUpdate {
                start_time: at(10, 10),
                end_time: at(10, 12),
            }))
        );
    }

    #[test]
    fn test_second_gesture_refused() {
        let mut interaction = week();
        let event = meeting();
        interaction.begin_drag(&event, Pos2::new(10.0, 140.0)).unwrap();
        assert_eq!(
            interaction.begin_resize(&event, ResizeEdge::Top, Pos2::new(10.0, 130.0)),
            Err(InteractionError::GestureInProgress)
        );
        assert!(interaction.drag().is_dragging());
        assert!(!interaction.resize().is_resizing());
    }

    #[test]
    fn test_teardown_discards_and_clears_magnet() {
        let mut interaction = week();
        let mut host = MockHost::new();
        host.expect_on_magnetic_hover()
            .withf(|zone| zone.is_some())
            .times(1)
            .return_const(());
        host.expect_on_magnetic_hover()
            .with(eq(None))
            .times(1)
            .return_const(());
        host.expect_on_drag_stop().never();

        interaction.begin_drag(&meeting(), Pos2::new(10.0, 140.0)).unwrap();
        interaction.pointer_moved(Pos2::new(80.0, 160.0), &mut host);
        interaction.teardown(&mut host);

        assert!(!interaction.is_gesture_active());
        assert!(interaction.drag().candidate().is_none());
    }

    #[test]
    fn test_idle_events_are_ignored() {
        let mut interaction = week();
        let mut host = MockHost::new();
        host.expect_on_drag_stop().never();
        host.expect_on_update_block().never();
        host.expect_on_magnetic_hover().never();

        interaction.pointer_moved(Pos2::new(50.0, 50.0), &mut host);
        assert_eq!(interaction.pointer_released(Pos2::new(50.0, 50.0), &mut host), None);
        interaction.teardown(&mut host);
    }

    #[test]
    fn test_layout_change_rebuilds_slots() {
        let mut interaction = week();
        interaction
            .set_layout(GridGeometry::day(48.0, 6, 20), base())
            .unwrap();
        assert_eq!(interaction.snap().slots().len(), 15);
        assert_eq!(interaction.geometry().columns, 1);

        interaction.begin_drag(&meeting(), Pos2::new(10.0, 200.0)).unwrap();
        assert_eq!(
            interaction.set_layout(GridGeometry::default(), base()),
            Err(InteractionError::LayoutLocked)
        );
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let result = TimeGridInteraction::new(GridGeometry::day(64.0, 22, 8), base(), 15, 20.0);
        assert!(matches!(result, Err(InteractionError::Geometry(_))));
    }
}
