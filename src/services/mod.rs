// Service module exports

pub mod events;
pub mod settings;
