use crossterm::event::KeyCode;
use tui::{backend::Backend, layout::Rect, Frame};

use crate::models::{normalize_tags, Project, ProjectDraft, ProjectPatch};
use crate::ui::components::form::{edit_text, render_fields};

const FIELD_NAMES: [&str; 6] = [
    "Title",
    "Description",
    "Tags (comma-separated)",
    "Image URL",
    "Live URL",
    "Repo URL",
];

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum ProjectField {
    Title,
    Description,
    Tags,
    ImageUrl,
    LiveUrl,
    RepoUrl,
}

impl ProjectField {
    fn next(self) -> Self {
        match self {
            ProjectField::Title => ProjectField::Description,
            ProjectField::Description => ProjectField::Tags,
            ProjectField::Tags => ProjectField::ImageUrl,
            ProjectField::ImageUrl => ProjectField::LiveUrl,
            ProjectField::LiveUrl => ProjectField::RepoUrl,
            ProjectField::RepoUrl => ProjectField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            ProjectField::Title => ProjectField::RepoUrl,
            ProjectField::Description => ProjectField::Title,
            ProjectField::Tags => ProjectField::Description,
            ProjectField::ImageUrl => ProjectField::Tags,
            ProjectField::LiveUrl => ProjectField::ImageUrl,
            ProjectField::RepoUrl => ProjectField::LiveUrl,
        }
    }
}

/// Text of every project field as the admin types it; tags stay a single
/// comma-separated string until they are sent.
#[derive(Clone, Default, Debug, PartialEq)]
struct ProjectText {
    title: String,
    description: String,
    tags: String,
    image_url: String,
    live_url: String,
    repo_url: String,
}

impl ProjectText {
    fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            tags: project.tags.join(", "),
            image_url: project.image_url.clone().unwrap_or_default(),
            live_url: project.live_url.clone().unwrap_or_default(),
            repo_url: project.repo_url.clone().unwrap_or_default(),
        }
    }

    fn field_mut(&mut self, field: ProjectField) -> &mut String {
        match field {
            ProjectField::Title => &mut self.title,
            ProjectField::Description => &mut self.description,
            ProjectField::Tags => &mut self.tags,
            ProjectField::ImageUrl => &mut self.image_url,
            ProjectField::LiveUrl => &mut self.live_url,
            ProjectField::RepoUrl => &mut self.repo_url,
        }
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.description.clone(),
            self.tags.clone(),
            self.image_url.clone(),
            self.live_url.clone(),
            self.repo_url.clone(),
        ]
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Form for a project that does not exist on the backend yet.
pub struct ProjectFormState {
    text: ProjectText,
    pub current_field: ProjectField,
    pub editing: bool,
}

impl ProjectFormState {
    pub fn new() -> Self {
        Self {
            text: ProjectText::default(),
            current_field: ProjectField::Title,
            editing: false,
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = self.current_field.next();
    }

    pub fn previous_field(&mut self) {
        self.current_field = self.current_field.previous();
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }
        edit_text(self.text.field_mut(self.current_field), key);
    }

    /// The create body, with tags split out of the comma-separated field.
    pub fn draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.text.title.trim().to_string(),
            description: self.text.description.trim().to_string(),
            tags: normalize_tags(&self.text.tags),
            image_url: optional(&self.text.image_url),
            live_url: optional(&self.text.live_url),
            repo_url: optional(&self.text.repo_url),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.draft().is_valid()
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Form for editing one existing project a field at a time.
pub struct ProjectEditorState {
    id: String,
    text: ProjectText,
    pub current_field: ProjectField,
    pub editing: bool,
}

impl ProjectEditorState {
    pub fn from_existing(id: String, project: &Project) -> Self {
        Self {
            id,
            text: ProjectText::from_project(project),
            current_field: ProjectField::Title,
            editing: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    pub fn next_field(&mut self) {
        self.current_field = self.current_field.next();
    }

    pub fn previous_field(&mut self) {
        self.current_field = self.current_field.previous();
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }
        edit_text(self.text.field_mut(self.current_field), key);
    }

    /// Ends editing and returns a patch carrying only the current field, or
    /// `None` when it still matches `project`.
    pub fn commit_field(&mut self, project: &Project) -> Option<ProjectPatch> {
        self.editing = false;

        let field = self.current_field;
        let value = self.text.field_mut(field).trim().to_string();
        let mut patch = ProjectPatch::default();
        let slot = match field {
            ProjectField::Tags => {
                let tags = normalize_tags(&value);
                if tags == project.tags {
                    return None;
                }
                patch.tags = Some(tags);
                return Some(patch);
            }
            ProjectField::Title => &mut patch.title,
            ProjectField::Description => &mut patch.description,
            ProjectField::ImageUrl => &mut patch.image_url,
            ProjectField::LiveUrl => &mut patch.live_url,
            ProjectField::RepoUrl => &mut patch.repo_url,
        };

        if ProjectText::from_project(project).field_mut(field).trim() == value {
            return None;
        }

        *slot = Some(value);
        Some(patch)
    }

    /// Drops any unsaved text and shows `project` as the backend has it.
    pub fn reset(&mut self, project: &Project) {
        self.text = ProjectText::from_project(project);
        self.editing = false;
    }
}

pub fn render_project_form<B: Backend>(
    f: &mut Frame<B>,
    state: &ProjectFormState,
    area: Rect,
    focused: bool,
) {
    render_fields(
        f,
        area,
        "Add New Project",
        &FIELD_NAMES,
        &state.text.values(),
        state.current_field as usize,
        state.editing,
        focused,
    );
}

pub fn render_project_editor<B: Backend>(
    f: &mut Frame<B>,
    state: &ProjectEditorState,
    area: Rect,
    focused: bool,
) {
    let title = format!("Edit Project {}", state.id);
    render_fields(
        f,
        area,
        &title,
        &FIELD_NAMES,
        &state.text.values(),
        state.current_field as usize,
        state.editing,
        focused,
    );
}
