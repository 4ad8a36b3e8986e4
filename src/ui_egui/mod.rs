mod app;
mod palette;
pub mod time_grid;

pub use app::CalendarGridApp;
pub use palette::TimeGridPalette;
