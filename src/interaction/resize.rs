// Block resize
//
// Dragging the top or bottom edge of a block moves its start or end in
// snap-minute steps while the other boundary stays put.
// - Top edge: adjusts start, never later than one snap unit before the end
// - Bottom edge: adjusts end, never earlier than one snap unit after the start
// Blocks already shorter than one snap unit keep their own length as the floor.
// Both are kept inside the visible hour window. Out-of-range gestures are
// clamped, never rejected.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::error::InteractionError;
use super::signal::{ActiveGesture, DragSignal};
use crate::models::geometry::GridGeometry;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Which edge of the block is being dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeEdge {
    /// Top edge - adjusts start time
    Top,
    /// Bottom edge - adjusts end time
    Bottom,
}

impl ResizeEdge {
    /// Returns the cursor icon for this edge
    pub fn cursor_icon(&self) -> egui::CursorIcon {
        match self {
            ResizeEdge::Top => egui::CursorIcon::ResizeNorth,
            ResizeEdge::Bottom => egui::CursorIcon::ResizeSouth,
        }
    }
}

/// New boundaries proposed for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockUpdate {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// Receives the result of every finished resize
pub trait ResizeHandler {
    fn on_update_block(&mut self, block_id: &str, update: BlockUpdate);
}

impl<F> ResizeHandler for F
where
    F: FnMut(&str, BlockUpdate),
{
    fn on_update_block(&mut self, block_id: &str, update: BlockUpdate) {
        self(block_id, update)
    }
}

/// State of an active resize
#[derive(Debug)]
struct ResizeSession {
    block_id: String,
    edge: ResizeEdge,
    /// Pointer Y when the gesture started
    start_pointer_y: f32,
    original_start: NaiveDateTime,
    original_end: NaiveDateTime,
    /// Last computed boundaries
    current: BlockUpdate,
    _gesture: ActiveGesture,
}

/// Controller for edge-drag gestures (similar to DragController)
#[derive(Debug)]
pub struct ResizeController {
    cell_height: f32,
    snap_minutes: u32,
    min_hour: u32,
    max_hour: u32,
    signal: DragSignal,
    session: Option<ResizeSession>,
}

impl ResizeController {
    /// Create a controller bounded by the geometry's visible hours
    pub fn new(
        geometry: &GridGeometry,
        snap_minutes: u32,
        signal: DragSignal,
    ) -> Result<Self, InteractionError> {
        if snap_minutes == 0 {
            return Err(InteractionError::ZeroSnapMinutes);
        }
        Ok(Self {
            cell_height: geometry.cell_height,
            snap_minutes,
            min_hour: geometry.start_hour,
            max_hour: geometry.end_hour,
            signal,
            session: None,
        })
    }

    pub fn snap_minutes(&self) -> u32 {
        self.snap_minutes
    }

    /// Override the hour window blocks are kept inside
    pub fn set_window(&mut self, min_hour: u32, max_hour: u32) -> Result<(), InteractionError> {
        if self.session.is_some() {
            return Err(InteractionError::LayoutLocked);
        }
        self.min_hour = min_hour.min(max_hour);
        self.max_hour = max_hour.max(min_hour);
        Ok(())
    }

    /// Adopt a new geometry's cell height and hour window
    pub fn set_geometry(&mut self, geometry: &GridGeometry) -> Result<(), InteractionError> {
        self.set_window(geometry.start_hour, geometry.end_hour)?;
        self.cell_height = geometry.cell_height;
        Ok(())
    }

    pub fn is_resizing(&self) -> bool {
        self.session.is_some()
    }

    /// Check if resizing a specific block
    pub fn is_resizing_block(&self, block_id: &str) -> bool {
        self.session.as_ref().map_or(false, |s| s.block_id == block_id)
    }

    pub fn edge(&self) -> Option<ResizeEdge> {
        self.session.as_ref().map(|s| s.edge)
    }

    /// Boundaries the block would get if released now
    pub fn current(&self) -> Option<BlockUpdate> {
        self.session.as_ref().map(|s| s.current)
    }

    /// Begin a resize of `block_id` from `edge`
    pub fn start(
        &mut self,
        block_id: impl Into<String>,
        edge: ResizeEdge,
        pointer_y: f32,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<(), InteractionError> {
        let gesture = self.signal.acquire()?;
        let block_id = block_id.into();
        log::debug!("Resize start for block {} ({:?} edge)", block_id, edge);
        self.session = Some(ResizeSession {
            block_id,
            edge,
            start_pointer_y: pointer_y,
            original_start: start_time,
            original_end: end_time,
            current: BlockUpdate {
                start_time,
                end_time,
            },
            _gesture: gesture,
        });
        Ok(())
    }

    /// Snapped minute delta for a vertical pointer travel of `delta_y` pixels
    ///
    /// Travel is capped at one day either way; no boundary inside the window
    /// can move further than that.
    pub fn delta_minutes(&self, delta_y: f32) -> i64 {
        let snap = self.snap_minutes as f64;
        let max_steps = (MINUTES_PER_DAY as f64 / snap).ceil();
        let steps = (delta_y as f64 / self.cell_height as f64 * 60.0 / snap)
            .round()
            .clamp(-max_steps, max_steps);
        // NaN travel casts to zero steps
        steps as i64 * self.snap_minutes as i64
    }

    /// Recompute the moving boundary for the pointer's new Y. No-op while idle.
    pub fn move_to(&mut self, pointer_y: f32) -> Option<BlockUpdate> {
        let start_y = self.session.as_ref()?.start_pointer_y;
        let delta = Duration::minutes(self.delta_minutes(pointer_y - start_y));
        let snap = Duration::minutes(self.snap_minutes as i64);
        let session = self.session.as_mut()?;

        let day = session.original_start.date().and_time(NaiveTime::MIN);
        // A block already outside the window keeps its original boundary
        let window_min = (day + Duration::hours(self.min_hour as i64)).min(session.original_start);
        let window_max = (day + Duration::hours(self.max_hour as i64)).max(session.original_end);
        let min_duration = snap
            .min(session.original_end - session.original_start)
            .max(Duration::zero());

        session.current = match session.edge {
            ResizeEdge::Top => BlockUpdate {
                start_time: session
                    .original_start
                    .checked_add_signed(delta)
                    .unwrap_or(window_min)
                    .max(window_min)
                    .min(session.original_end - min_duration),
                end_time: session.original_end,
            },
            ResizeEdge::Bottom => BlockUpdate {
                start_time: session.original_start,
                end_time: session
                    .original_end
                    .checked_add_signed(delta)
                    .unwrap_or(window_max)
                    .min(window_max)
                    .max(session.original_start + min_duration),
            },
        };
        log::trace!(
            "Resize candidate {} - {}",
            session.current.start_time,
            session.current.end_time
        );
        Some(session.current)
    }

    /// Finish the resize and commit the last boundaries to `handler`.
    ///
    /// The commit happens even when nothing changed. No-op while idle.
    pub fn stop<H>(&mut self, handler: &mut H) -> Option<BlockUpdate>
    where
        H: ResizeHandler + ?Sized,
    {
        let session = self.session.take()?;
        let update = session.current;
        log::debug!(
            "Resize block {} to {} - {}",
            session.block_id,
            update.start_time,
            update.end_time
        );
        drop(session._gesture);
        handler.on_update_block(&session.block_id, update);
        Some(update)
    }

    /// Discard the session without committing. Returns whether one was active.
    pub fn teardown(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!("Resize of block {} discarded", session.block_id);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn controller(signal: &DragSignal) -> ResizeController {
        ResizeController::new(&GridGeometry::week(160.0, 64.0, 8, 22), 15, signal.clone()).unwrap()
    }

    #[test_case(0.0, 0 ; "no travel")]
    #[test_case(100.0, 90 ; "six and a quarter steps")]
    #[test_case(7.9, 0 ; "under half a step")]
    #[test_case(8.0, 15 ; "half a step rounds away from zero")]
    #[test_case(-8.0, -15 ; "half a step upwards")]
    #[test_case(-100.0, -90 ; "upwards")]
    #[test_case(64.0, 60 ; "one hour")]
    #[test_case(1.0e12, 1440 ; "huge travel capped at a day")]
    #[test_case(f32::INFINITY, 1440 ; "infinite travel down")]
    #[test_case(f32::NEG_INFINITY, -1440 ; "infinite travel up")]
    #[test_case(f32::NAN, 0 ; "nan travel")]
    fn test_delta_minutes(delta_y: f32, expected: i64) {
        let controller = controller(&DragSignal::new());
        assert_eq!(controller.delta_minutes(delta_y), expected);
    }

    #[test]
    fn test_rejects_zero_snap() {
        let result = ResizeController::new(&GridGeometry::default(), 0, DragSignal::new());
        assert_eq!(result.unwrap_err(), InteractionError::ZeroSnapMinutes);
    }

    #[test]
    fn test_bottom_edge_moves_end_only() {
        let mut controller = controller(&DragSignal::new());
        controller.start("b1", ResizeEdge::Bottom, 200.0, at(9, 0), at(10, 0)).unwrap();
        let update = controller.move_to(300.0).unwrap();
        assert_eq!(update.start_time, at(9, 0));
        assert_eq!(update.end_time, at(11, 30));
    }

    #[test]
    fn test_top_edge_moves_start_only() {
        let mut controller = controller(&DragSignal::new());
        controller.start("b1", ResizeEdge::Top, 200.0, at(10, 0), at(12, 0)).unwrap();
        let update = controller.move_to(168.0).unwrap();
        assert_eq!(update.start_time, at(9, 30));
        assert_eq!(update.end_time, at(12, 0));
    }

    #[test]
    fn test_top_edge_cannot_pass_end() {
        let mut controller = controller(&DragSignal::new());
        controller.start("b1", ResizeEdge::Top, 0.0, at(10, 0), at(11, 0)).unwrap();
        let update = controller.move_to(640.0).unwrap();
        assert_eq!(update.start_time, at(10, 45));
    }

    #[test]
    fn test_bottom_edge_cannot_pass_start() {
        let mut controller = controller(&DragSignal::new());
        controller.start("b1", ResizeEdge::Bottom, 500.0, at(10, 0), at(11, 0)).unwrap();
        let update = controller.move_to(0.0).unwrap();
        assert_eq!(update.end_time, at(10, 15));
    }

    #[test]
    fn test_clamped_to_window() {
        let mut controller = controller(&DragSignal::new());
        controller.start("b1", ResizeEdge::Top, 500.0, at(9, 0), at(10, 0)).unwrap();
        assert_eq!(controller.move_to(-2000.0).unwrap().start_time, at(8, 0));
        controller.teardown();

        controller.start("b1", ResizeEdge::Bottom, 0.0, at(20, 0), at(21, 0)).unwrap();
        assert_eq!(controller.move_to(2000.0).unwrap().end_time, at(22, 0));
    }

    #[test]
    fn test_extreme_travel_is_clamped() {
        let mut controller = controller(&DragSignal::new());
        controller.start("b1", ResizeEdge::Bottom, 100.0, at(9, 0), at(10, 0)).unwrap();
        assert_eq!(controller.move_to(1.0e12).unwrap().end_time, at(22, 0));
        assert_eq!(controller.move_to(f32::INFINITY).unwrap().end_time, at(22, 0));
        assert_eq!(controller.move_to(f32::NEG_INFINITY).unwrap().end_time, at(9, 15));
        controller.teardown();

        controller.start("b1", ResizeEdge::Top, 100.0, at(9, 0), at(10, 0)).unwrap();
        assert_eq!(controller.move_to(-1.0e12).unwrap().start_time, at(8, 0));
        assert_eq!(controller.move_to(f32::INFINITY).unwrap().start_time, at(9, 45));
    }

    #[test_case(ResizeEdge::Top ; "top edge")]
    #[test_case(ResizeEdge::Bottom ; "bottom edge")]
    fn test_short_block_unchanged_without_travel(edge: ResizeEdge) {
        let mut controller = controller(&DragSignal::new());
        controller.start("b1", edge, 100.0, at(9, 0), at(9, 10)).unwrap();

        let update = controller.move_to(100.0).unwrap();
        assert_eq!(update, BlockUpdate { start_time: at(9, 0), end_time: at(9, 10) });
    }

    #[test]
    fn test_short_block_keeps_its_length_as_floor() {
        let mut controller = controller(&DragSignal::new());
        controller.start("b1", ResizeEdge::Top, 100.0, at(8, 0), at(8, 10)).unwrap();
        // Pushing down past the end stops at the original length
        let update = controller.move_to(400.0).unwrap();
        assert_eq!(update.start_time, at(8, 0));
        controller.teardown();

        controller.start("b1", ResizeEdge::Bottom, 100.0, at(9, 0), at(9, 10)).unwrap();
        assert_eq!(controller.move_to(132.0).unwrap().end_time, at(9, 40));
    }

    #[test]
    fn test_custom_window() {
        let mut controller = controller(&DragSignal::new());
        controller.set_window(6, 23).unwrap();
        controller.start("b1", ResizeEdge::Bottom, 0.0, at(20, 0), at(21, 0)).unwrap();
        assert_eq!(controller.move_to(2000.0).unwrap().end_time, at(23, 0));
    }

    #[test]
    fn test_stop_commits_even_without_change() {
        let signal = DragSignal::new();
        let mut controller = controller(&signal);
        controller.start("b1", ResizeEdge::Bottom, 120.0, at(9, 0), at(10, 0)).unwrap();
        controller.move_to(125.0);

        let mut commits = Vec::new();
        let update = controller
            .stop(&mut |id: &str, update: BlockUpdate| commits.push((id.to_string(), update)))
            .unwrap();

        assert_eq!(update, BlockUpdate { start_time: at(9, 0), end_time: at(10, 0) });
        assert_eq!(commits, vec![("b1".to_string(), update)]);
        assert!(!signal.is_active());
        assert!(!controller.is_resizing());
    }

    #[test]
    fn test_idle_controller_is_inert() {
        let mut controller = controller(&DragSignal::new());
        assert!(controller.move_to(50.0).is_none());
        let mut called = false;
        assert!(controller.stop(&mut |_: &str, _: BlockUpdate| called = true).is_none());
        assert!(!called);
    }

    #[test]
    fn test_refuses_second_gesture() {
        let signal = DragSignal::new();
        let _other = signal.acquire().unwrap();
        let mut controller = controller(&signal);
        let result = controller.start("b1", ResizeEdge::Top, 0.0, at(9, 0), at(10, 0));
        assert_eq!(result, Err(InteractionError::GestureInProgress));
        assert!(!controller.is_resizing());
    }

    #[test]
    fn test_teardown_lowers_signal() {
        let signal = DragSignal::new();
        let mut controller = controller(&signal);
        controller.start("b1", ResizeEdge::Top, 0.0, at(9, 0), at(10, 0)).unwrap();
        assert!(controller.is_resizing_block("b1"));
        assert!(controller.teardown());
        assert!(!signal.is_active());
    }
}
