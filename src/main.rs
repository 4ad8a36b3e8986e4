// Calendar Grid
// Main entry point

use calendar_grid::models::settings::InteractionSettings;
use calendar_grid::services::settings::SettingsService;
use calendar_grid::ui_egui::CalendarGridApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Calendar Grid");

    let settings = load_settings();
    let events_path = directories::ProjectDirs::from("com", "KenBoyle", "CalendarGrid")
        .map(|dirs| dirs.data_dir().join("events.json"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("Calendar Grid"),
        ..Default::default()
    };

    eframe::run_native(
        "Calendar Grid",
        options,
        Box::new(move |cc| Ok(Box::new(CalendarGridApp::new(cc, settings, events_path)?))),
    )
}

fn load_settings() -> InteractionSettings {
    match SettingsService::from_project_dirs().and_then(|service| service.get()) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("Using default settings: {:#}", err);
            InteractionSettings::default()
        }
    }
}
