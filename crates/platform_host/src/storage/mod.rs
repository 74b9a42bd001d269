//! Settings persistence contracts and typed folder-browser settings.

pub mod prefs;
pub mod settings;
