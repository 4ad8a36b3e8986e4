// Resize hit zones
//
// Decides whether a pointer-down on a block grabs an edge (resize) or the
// body (move).

use egui::{Pos2, Rect, Vec2};

use super::resize::ResizeEdge;
use crate::models::event::CalendarEvent;

/// Blocks shorter than this split into a top half and a bottom half
pub const SMALL_BLOCK_HEIGHT: f32 = 50.0;
/// Edge zone height on taller blocks
pub const EDGE_ZONE_HEIGHT: f32 = 20.0;

/// Top and bottom hit zones of a timed block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleRects {
    pub top: Rect,
    pub bottom: Rect,
}

impl HandleRects {
    pub fn for_timed_block(block: Rect) -> Self {
        let zone_height = if block.height() < SMALL_BLOCK_HEIGHT {
            block.height() / 2.0
        } else {
            EDGE_ZONE_HEIGHT
        };

        // Hit zones span the full width of the block
        Self {
            top: Rect::from_min_size(block.min, Vec2::new(block.width(), zone_height)),
            bottom: Rect::from_min_size(
                Pos2::new(block.left(), block.bottom() - zone_height),
                Vec2::new(block.width(), zone_height),
            ),
        }
    }

    /// Check if a point hits either edge. Top wins where they touch.
    pub fn hit_test(&self, pos: Pos2) -> Option<ResizeEdge> {
        if self.top.contains(pos) {
            Some(ResizeEdge::Top)
        } else if self.bottom.contains(pos) {
            Some(ResizeEdge::Bottom)
        } else {
            None
        }
    }

    pub fn get(&self, edge: ResizeEdge) -> Rect {
        match edge {
            ResizeEdge::Top => self.top,
            ResizeEdge::Bottom => self.bottom,
        }
    }
}

/// What a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockHit<'a> {
    Body(&'a CalendarEvent),
    Edge(&'a CalendarEvent, ResizeEdge),
}

impl<'a> BlockHit<'a> {
    pub fn event(&self) -> &'a CalendarEvent {
        match *self {
            BlockHit::Body(event) | BlockHit::Edge(event, _) => event,
        }
    }
}

/// Topmost block under `pos`. Later blocks are drawn over earlier ones.
pub fn hit_test_blocks<'a>(blocks: &[(Rect, &'a CalendarEvent)], pos: Pos2) -> Option<BlockHit<'a>> {
    blocks
        .iter()
        .rev()
        .find(|(rect, _)| rect.contains(pos))
        .map(|&(rect, event)| match HandleRects::for_timed_block(rect).hit_test(pos) {
            Some(edge) => BlockHit::Edge(event, edge),
            None => BlockHit::Body(event),
        })
}
