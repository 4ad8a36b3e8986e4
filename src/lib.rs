// Calendar Grid Library
// Time-grid interaction engine and its egui host

pub mod interaction;
pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;
