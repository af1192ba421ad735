//! Client-side snapshots of the two backend resources.
//!
//! Each store owns its snapshot and only changes it from a successful server
//! reply; failures leave the snapshot exactly as it was.

mod settings;
mod projects;

pub use settings::SettingsStore;
pub use projects::ProjectsStore;
