// Time grid widget
// Paints hour rows, day columns and event blocks, and feeds pointer input
// to a TimeGridInteraction.

use chrono::NaiveDate;
use egui::{Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::palette::TimeGridPalette;
use crate::interaction::grid::{self, block_rect, format_duration_label};
use crate::interaction::{
    hit_test_blocks, BlockHit, HandleRects, InteractionHandler, TimeGridInteraction,
};
use crate::models::event::{parse_color, CalendarEvent};
use crate::models::geometry::GridGeometry;

pub const TIME_LABEL_WIDTH: f32 = 50.0;
pub const HEADER_HEIGHT: f32 = 28.0;
const MIN_DAY_COLUMN_WIDTH: f32 = 200.0;
const BLOCK_INSET: Vec2 = Vec2::new(2.0, 1.0);

/// Maps between screen space and the grid space the interaction works in.
#[derive(Clone, Copy)]
struct GridFrame {
    origin: Pos2,
    column_width: f32,
}

impl GridFrame {
    fn to_grid(self, pos: Pos2) -> Pos2 {
        Pos2::new(pos.x - self.origin.x, pos.y - self.origin.y)
    }

    fn to_screen(self, pos: Pos2) -> Pos2 {
        self.origin + pos.to_vec2()
    }

    fn rect_to_screen(self, rect: Rect) -> Rect {
        rect.translate(self.origin.to_vec2())
    }
}

/// Draw the grid and handle one frame of pointer input.
pub fn show_time_grid<H>(
    ui: &mut egui::Ui,
    interaction: &mut TimeGridInteraction,
    events: &[CalendarEvent],
    palette: &TimeGridPalette,
    host: &mut H,
) -> egui::Response
where
    H: InteractionHandler,
{
    let geometry = *interaction.geometry();
    let base_date = interaction.base_date();

    // Day views stretch to the available width
    let column_width = if geometry.is_day_view() {
        (ui.available_width() - TIME_LABEL_WIDTH).max(MIN_DAY_COLUMN_WIDTH)
    } else {
        geometry.cell_width
    };
    let size = Vec2::new(
        TIME_LABEL_WIDTH + column_width * geometry.columns as f32,
        HEADER_HEIGHT + geometry.cell_height * geometry.row_count() as f32,
    );
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
    let frame = GridFrame {
        origin: rect.min + Vec2::new(TIME_LABEL_WIDTH, HEADER_HEIGHT),
        column_width,
    };

    let blocks: Vec<(Rect, &CalendarEvent)> = events
        .iter()
        .filter_map(|event| {
            block_rect(event, &geometry, base_date, column_width)
                .map(|r| (frame.rect_to_screen(r).shrink2(BLOCK_INSET), event))
        })
        .collect();

    handle_pointer(ui, &response, interaction, &blocks, frame, host);

    let painter = ui.painter_at(rect);
    paint_background(&painter, rect, frame, &geometry, base_date, palette);
    paint_blocks(&painter, interaction, &blocks, palette);
    paint_resize_preview(&painter, interaction, events, frame, palette);
    paint_drag_preview(&painter, interaction, frame, palette);

    if !interaction.is_gesture_active() {
        if let Some(hover) = response.hover_pos() {
            match hit_test_blocks(&blocks, hover) {
                Some(BlockHit::Edge(_, edge)) => {
                    if let Some((block, _)) = blocks.iter().rev().find(|(r, _)| r.contains(hover)) {
                        paint_handle(&painter, HandleRects::for_timed_block(*block).get(edge), palette);
                    }
                    ui.ctx().set_cursor_icon(edge.cursor_icon());
                }
                Some(BlockHit::Body(_)) => ui.ctx().set_cursor_icon(CursorIcon::Grab),
                None => {}
            }
        }
    }

    response
}

fn handle_pointer<H>(
    ui: &egui::Ui,
    response: &egui::Response,
    interaction: &mut TimeGridInteraction,
    blocks: &[(Rect, &CalendarEvent)],
    frame: GridFrame,
    host: &mut H,
) where
    H: InteractionHandler,
{
    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            match hit_test_blocks(blocks, pos) {
                Some(BlockHit::Edge(event, edge)) => {
                    if interaction.begin_resize(event, edge, frame.to_grid(pos)).is_ok() {
                        log::debug!("Resizing {} from {:?} edge", event.id, edge);
                    }
                }
                Some(BlockHit::Body(event)) => {
                    if interaction.begin_drag(event, frame.to_grid(pos)).is_ok() {
                        log::debug!("Dragging {}", event.id);
                    }
                }
                None => {}
            }
        }
    }

    if !interaction.is_gesture_active() {
        return;
    }

    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            interaction.pointer_moved(frame.to_grid(pos), host);
        }
    }

    let released = response.drag_stopped() || ui.input(|i| i.pointer.any_released());
    if released {
        let pos = response
            .interact_pointer_pos()
            .or_else(|| ui.input(|i| i.pointer.latest_pos()));
        match pos {
            Some(pos) => {
                interaction.pointer_released(frame.to_grid(pos), host);
            }
            // Pointer left the window; nothing sensible to commit
            None => interaction.teardown(host),
        }
    }

    if interaction.drag().is_dragging() {
        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
    } else if let Some(edge) = interaction.resize().edge() {
        ui.ctx().set_cursor_icon(edge.cursor_icon());
    }
    if interaction.is_gesture_active() {
        ui.ctx().request_repaint();
    }
}

fn paint_background(
    painter: &egui::Painter,
    rect: Rect,
    frame: GridFrame,
    geometry: &GridGeometry,
    base_date: NaiveDate,
    palette: &TimeGridPalette,
) {
    let grid_rect = Rect::from_min_max(frame.origin, rect.max);
    painter.rect_filled(
        Rect::from_min_max(rect.min, Pos2::new(frame.origin.x, rect.max.y)),
        0.0,
        palette.label_bg,
    );

    for column in 0..geometry.columns {
        let left = frame.origin.x + column as f32 * frame.column_width;
        let column_rect = Rect::from_min_max(
            Pos2::new(left, grid_rect.top()),
            Pos2::new(left + frame.column_width, grid_rect.bottom()),
        );
        let fill = if column % 2 == 0 {
            palette.regular_bg
        } else {
            palette.alternate_bg
        };
        painter.rect_filled(column_rect, 0.0, fill);

        let date = grid::column_date(base_date, column);
        painter.text(
            Pos2::new(left + frame.column_width / 2.0, rect.top() + HEADER_HEIGHT / 2.0),
            Align2::CENTER_CENTER,
            date.format("%a %d").to_string(),
            FontId::proportional(13.0),
            palette.label_text,
        );
        if column > 0 {
            painter.line_segment(
                [Pos2::new(left, rect.top()), Pos2::new(left, rect.bottom())],
                Stroke::new(1.0, palette.divider),
            );
        }
    }

    for row in 0..=geometry.row_count() {
        let y = frame.origin.y + row as f32 * geometry.cell_height;
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, palette.hour_line),
        );
        if row < geometry.row_count() {
            painter.text(
                Pos2::new(rect.left() + 5.0, y + 4.0),
                Align2::LEFT_TOP,
                format!("{:02}:00", geometry.start_hour + row),
                FontId::proportional(12.0),
                palette.label_text,
            );
        }
    }

    painter.line_segment(
        [
            Pos2::new(frame.origin.x, rect.top()),
            Pos2::new(frame.origin.x, rect.bottom()),
        ],
        Stroke::new(1.0, palette.divider),
    );
}

fn paint_event_block(
    painter: &egui::Painter,
    block: Rect,
    event: &CalendarEvent,
    fill: Color32,
    palette: &TimeGridPalette,
) {
    painter.rect_filled(block, 4.0, fill);

    let clipped = painter.with_clip_rect(block.intersect(painter.clip_rect()));
    let text_pos = block.min + Vec2::new(6.0, 4.0);
    clipped.text(
        text_pos,
        Align2::LEFT_TOP,
        &event.title,
        FontId::proportional(13.0),
        palette.block_text,
    );
    if block.height() >= 36.0 {
        clipped.text(
            text_pos + Vec2::new(0.0, 16.0),
            Align2::LEFT_TOP,
            format!(
                "{} · {}",
                event.start.format("%H:%M"),
                format_duration_label(event.start, event.end)
            ),
            FontId::proportional(11.0),
            palette.block_text.gamma_multiply(0.85),
        );
    }
}

/// Thin grab bar centred in a handle zone
fn paint_handle(painter: &egui::Painter, zone: Rect, palette: &TimeGridPalette) {
    let bar = Rect::from_center_size(zone.center(), Vec2::new((zone.width() * 0.4).min(40.0), 3.0));
    painter.rect_filled(bar, 1.5, palette.magnet);
}

fn block_fill(event: &CalendarEvent, palette: &TimeGridPalette) -> Color32 {
    event
        .color
        .as_deref()
        .and_then(parse_color)
        .unwrap_or(palette.block_fallback)
}

fn paint_blocks(
    painter: &egui::Painter,
    interaction: &TimeGridInteraction,
    blocks: &[(Rect, &CalendarEvent)],
    palette: &TimeGridPalette,
) {
    let dragged_id = interaction.drag().dragged_event().map(|event| event.id.as_str());
    for &(block, event) in blocks {
        if interaction.resize().is_resizing_block(&event.id) {
            continue;
        }
        let mut fill = block_fill(event, palette);
        if dragged_id == Some(event.id.as_str()) {
            // Ghost left behind at the original slot
            fill = fill.gamma_multiply(0.35);
        }
        paint_event_block(painter, block, event, fill, palette);
    }
}

fn paint_resize_preview(
    painter: &egui::Painter,
    interaction: &TimeGridInteraction,
    events: &[CalendarEvent],
    frame: GridFrame,
    palette: &TimeGridPalette,
) {
    let Some(update) = interaction.resize().current() else {
        return;
    };
    let Some(event) = events
        .iter()
        .find(|event| interaction.resize().is_resizing_block(&event.id))
    else {
        return;
    };

    let preview = event.with_times(update.start_time, update.end_time);
    let geometry = interaction.geometry();
    if let Some(rect) = block_rect(&preview, geometry, interaction.base_date(), frame.column_width) {
        let block = frame.rect_to_screen(rect).shrink2(BLOCK_INSET);
        paint_event_block(painter, block, &preview, block_fill(event, palette), palette);
        painter.rect_stroke(block, 4.0, Stroke::new(2.0, palette.magnet));

        if let Some(edge) = interaction.resize().edge() {
            paint_handle(painter, HandleRects::for_timed_block(block).get(edge), palette);
        }
    }
}

fn paint_drag_preview(
    painter: &egui::Painter,
    interaction: &TimeGridInteraction,
    frame: GridFrame,
    palette: &TimeGridPalette,
) {
    let drag = interaction.drag();
    let (Some(event), Some(candidate)) = (drag.dragged_event(), drag.candidate()) else {
        return;
    };
    let geometry = interaction.geometry();
    let height = grid::duration_hours(event.start, event.end) as f32 * geometry.cell_height;

    // Target slot
    let target_min = Pos2::new(
        candidate.column as f32 * frame.column_width,
        candidate.row as f32 * geometry.cell_height,
    );
    let target = Rect::from_min_size(frame.to_screen(target_min), Vec2::new(frame.column_width, height))
        .shrink2(BLOCK_INSET);
    let accent = if candidate.is_valid {
        palette.drop_valid
    } else {
        palette.drop_invalid
    };
    painter.rect_filled(target, 4.0, accent.gamma_multiply(0.15));
    painter.rect_stroke(target, 4.0, Stroke::new(1.5, accent));

    let label = if candidate.is_valid {
        let end = candidate.result + event.duration();
        format!("{} – {}", candidate.result.format("%H:%M"), end.format("%H:%M"))
    } else {
        "Outside the grid".to_owned()
    };
    painter.text(
        target.left_bottom() + Vec2::new(6.0, -4.0),
        Align2::LEFT_BOTTOM,
        label,
        FontId::proportional(11.0),
        accent,
    );

    if let Some(zone) = interaction.snap().magnetic() {
        let center_x = if geometry.is_day_view() {
            frame.column_width / 2.0
        } else {
            zone.center.x
        };
        let center = frame.to_screen(Pos2::new(center_x, zone.center.y));
        painter.circle_stroke(center, interaction.snap().capture_radius(), Stroke::new(2.0, palette.magnet));
        painter.circle_filled(center, 3.0, palette.magnet);
    }

    // Floating copy under the pointer
    if let Some(origin) = drag.block_origin() {
        let floating = Rect::from_min_size(frame.to_screen(origin), Vec2::new(frame.column_width, height))
            .shrink2(BLOCK_INSET);
        let fill = block_fill(event, palette).gamma_multiply(0.8);
        paint_event_block(painter, floating, event, fill, palette);
    }
}
