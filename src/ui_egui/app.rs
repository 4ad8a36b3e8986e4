use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDate};

use super::palette::TimeGridPalette;
use super::time_grid::show_time_grid;
use crate::interaction::{
    BlockUpdate, DropHandler, DropZone, ResizeHandler, SnapObserver, SnapZone, TimeGridInteraction,
};
use crate::models::event::CalendarEvent;
use crate::models::settings::{InteractionSettings, ViewKind};
use crate::services::events::{load_events, save_events};
use crate::utils::date::visible_start;

/// Edit intents collected while the grid is drawn, applied after the frame
#[derive(Debug, Clone, PartialEq)]
enum PendingEdit {
    Move(CalendarEvent),
    Resize { id: String, update: BlockUpdate },
}

/// Host side of the grid: records what the gestures asked for
#[derive(Debug, Default)]
struct PendingEdits {
    edits: Vec<PendingEdit>,
    rejected_drop: bool,
    magnetic: Option<SnapZone>,
}

impl DropHandler for PendingEdits {
    fn on_drag_stop(&mut self, event: &CalendarEvent, zone: DropZone) {
        match zone.apply(event) {
            Some(moved) => self.edits.push(PendingEdit::Move(moved)),
            None => self.rejected_drop = true,
        }
    }
}

impl ResizeHandler for PendingEdits {
    fn on_update_block(&mut self, block_id: &str, update: BlockUpdate) {
        self.edits.push(PendingEdit::Resize {
            id: block_id.to_owned(),
            update,
        });
    }
}

impl SnapObserver for PendingEdits {
    fn on_magnetic_hover(&mut self, zone: Option<SnapZone>) {
        self.magnetic = zone;
    }
}

pub struct CalendarGridApp {
    settings: InteractionSettings,
    interaction: TimeGridInteraction,
    events: Vec<CalendarEvent>,
    /// Where edits are written back; `None` keeps them in memory
    events_path: Option<PathBuf>,
    pending: PendingEdits,
    palette: TimeGridPalette,
    status: Option<String>,
}

impl CalendarGridApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: InteractionSettings,
        events_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let geometry = settings.geometry();
        let base_date = visible_start(Local::now().date_naive(), geometry.columns);
        let interaction = TimeGridInteraction::from_settings(&settings, base_date)?;

        let mut events = match events_path.as_deref().map(load_events).transpose() {
            Ok(events) => events.unwrap_or_default(),
            Err(err) => {
                log::warn!("Failed to load events: {:#}", err);
                Vec::new()
            }
        };
        if events.is_empty() {
            events = sample_events(base_date);
        }
        log::info!("Showing {} events from {}", events.len(), base_date);

        Ok(Self {
            settings,
            interaction,
            events,
            events_path,
            pending: PendingEdits::default(),
            palette: TimeGridPalette::from_visuals(&cc.egui_ctx.style().visuals),
            status: None,
        })
    }

    fn apply_pending(&mut self) {
        if std::mem::take(&mut self.pending.rejected_drop) {
            self.status = Some("Drop outside the grid ignored".to_owned());
        }

        let edits = std::mem::take(&mut self.pending.edits);
        if edits.is_empty() {
            return;
        }

        for edit in edits {
            let updated = match edit {
                PendingEdit::Move(moved) => moved,
                PendingEdit::Resize { id, update } => {
                    let Some(event) = self.events.iter().find(|event| event.id == id) else {
                        log::warn!("Resize for unknown event {}", id);
                        continue;
                    };
                    event.with_times(update.start_time, update.end_time)
                }
            };

            if let Err(err) = updated.validate() {
                log::warn!("Discarding edit of {}: {}", updated.id, err);
                continue;
            }
            if let Some(slot) = self.events.iter_mut().find(|event| event.id == updated.id) {
                log::info!(
                    "Event {} now {} - {}",
                    updated.id,
                    updated.start.format("%a %H:%M"),
                    updated.end.format("%H:%M")
                );
                self.status = Some(format!(
                    "{}: {} - {}",
                    updated.title,
                    updated.start.format("%a %H:%M"),
                    updated.end.format("%H:%M")
                ));
                *slot = updated;
            }
        }

        if let Some(path) = &self.events_path {
            if let Err(err) = save_events(path, &self.events) {
                log::error!("Failed to save events: {:#}", err);
                self.status = Some("Could not save changes".to_owned());
            }
        }
    }

    fn page(&mut self, base_date: NaiveDate, view: ViewKind) {
        let mut settings = self.settings.clone();
        settings.view = view;
        let geometry = settings.geometry();
        let base_date = visible_start(base_date, geometry.columns);

        match self.interaction.set_layout(geometry, base_date) {
            Ok(()) => self.settings = settings,
            Err(err) => log::debug!("Layout change skipped: {}", err),
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        let base_date = self.interaction.base_date();
        let step = Duration::days(self.interaction.geometry().columns as i64);
        let view = self.settings.view;
        let locked = self.interaction.is_gesture_active();

        ui.horizontal(|ui| {
            ui.add_enabled_ui(!locked, |ui| {
                if ui.button("◀").clicked() {
                    self.page(base_date - step, view);
                }
                if ui.button("Today").clicked() {
                    self.page(Local::now().date_naive(), view);
                }
                if ui.button("▶").clicked() {
                    self.page(base_date + step, view);
                }
                ui.separator();
                if ui.selectable_label(view == ViewKind::Day, "Day").clicked() {
                    self.page(base_date, ViewKind::Day);
                }
                if ui.selectable_label(view == ViewKind::Week, "Week").clicked() {
                    self.page(base_date, ViewKind::Week);
                }
            });
            ui.separator();
            ui.label(base_date.format("%B %Y").to_string());
        });
    }

    fn render_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(zone) = self.pending.magnetic {
                ui.label(format!("Snap: {}", zone.start.format("%a %H:%M")));
                ui.separator();
            }
            if let Some(status) = &self.status {
                ui.label(status);
            }
        });
    }
}

impl eframe::App for CalendarGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.palette = TimeGridPalette::from_visuals(&ctx.style().visuals);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.render_toolbar(ui));
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| self.render_status_bar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .drag_to_scroll(false)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    show_time_grid(
                        ui,
                        &mut self.interaction,
                        &self.events,
                        &self.palette,
                        &mut self.pending,
                    );
                });
        });

        self.apply_pending();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.interaction.teardown(&mut self.pending);
    }
}

/// A few blocks for a first run with no saved events
fn sample_events(base_date: NaiveDate) -> Vec<CalendarEvent> {
    let samples = [
        ("standup", "Standup", 0, 9, 0, 30, "#4A90D9"),
        ("review", "Design review", 1, 13, 0, 90, "#7B61FF"),
        ("focus", "Focus time", 2, 10, 0, 120, "#2E9E6A"),
        ("lunch", "Team lunch", 3, 12, 0, 60, "#E8A33D"),
        ("retro", "Retro", 4, 15, 30, 45, "#D9534F"),
    ];

    samples
        .iter()
        .filter_map(|&(id, title, day, hour, minute, minutes, color)| {
            let start = (base_date + Duration::days(day)).and_hms_opt(hour, minute, 0)?;
            CalendarEvent::builder()
                .id(id)
                .title(title)
                .start(start)
                .end(start + Duration::minutes(minutes))
                .color(color)
                .build()
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::grid::slot_start;

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_sample_events_are_valid() {
        let events = sample_events(base());
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|event| event.validate().is_ok()));
    }

    #[test]
    fn test_pending_edits_record_intents() {
        let mut pending = PendingEdits::default();
        let event = sample_events(base()).remove(0);

        let zone = DropZone {
            date: slot_start(base(), 1, 14),
            end: slot_start(base(), 1, 14) + event.duration(),
            column: 1,
            is_valid: true,
        };
        pending.on_drag_stop(&event, zone);
        pending.on_drag_stop(&event, DropZone { is_valid: false, ..zone });

        assert_eq!(pending.edits.len(), 1);
        assert!(pending.rejected_drop);
        match &pending.edits[0] {
            PendingEdit::Move(moved) => assert_eq!(moved.start, slot_start(base(), 1, 14)),
            other => panic!("unexpected edit {:?}", other),
        }
    }
}
