mod settings;
mod project;

pub use settings::ProfileSettings;
pub use project::{normalize_tags, DeleteConfirmation, Project, ProjectDraft, ProjectPatch};
