use crossterm::event::KeyCode;
use tui::{backend::Backend, layout::Rect, Frame};

use crate::models::ProfileSettings;
use crate::ui::components::form::{edit_text, render_fields};

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum SettingsField {
    Name,
    Role,
    Headline,
    Location,
    AvatarUrl,
    Email,
    About,
}

/// The admin's working copy of the profile settings.
pub struct SettingsFormState {
    pub settings: ProfileSettings,
    pub current_field: SettingsField,
    pub editing: bool,
}

impl SettingsFormState {
    pub fn new(settings: ProfileSettings) -> Self {
        Self {
            settings,
            current_field: SettingsField::Name,
            editing: false,
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            SettingsField::Name => SettingsField::Role,
            SettingsField::Role => SettingsField::Headline,
            SettingsField::Headline => SettingsField::Location,
            SettingsField::Location => SettingsField::AvatarUrl,
            SettingsField::AvatarUrl => SettingsField::Email,
            SettingsField::Email => SettingsField::About,
            SettingsField::About => SettingsField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            SettingsField::Name => SettingsField::About,
            SettingsField::Role => SettingsField::Name,
            SettingsField::Headline => SettingsField::Role,
            SettingsField::Location => SettingsField::Headline,
            SettingsField::AvatarUrl => SettingsField::Location,
            SettingsField::Email => SettingsField::AvatarUrl,
            SettingsField::About => SettingsField::Email,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let settings = &mut self.settings;
        let field_value = match self.current_field {
            SettingsField::Name => &mut settings.name,
            SettingsField::Role => &mut settings.role,
            SettingsField::Headline => &mut settings.headline,
            SettingsField::Location => settings.location.get_or_insert_with(String::new),
            SettingsField::AvatarUrl => settings.avatar_url.get_or_insert_with(String::new),
            SettingsField::Email => settings.email.get_or_insert_with(String::new),
            SettingsField::About => &mut settings.about,
        };

        edit_text(field_value, key);
    }

    fn field_values(&self) -> Vec<String> {
        let s = &self.settings;
        vec![
            s.name.clone(),
            s.role.clone(),
            s.headline.clone(),
            s.location.clone().unwrap_or_default(),
            s.avatar_url.clone().unwrap_or_default(),
            s.email.clone().unwrap_or_default(),
            s.about.clone(),
        ]
    }
}

pub fn render_settings_form<B: Backend>(
    f: &mut Frame<B>,
    state: &SettingsFormState,
    area: Rect,
    focused: bool,
) {
    let field_names = [
        "Name",
        "Role",
        "Headline",
        "Location",
        "Avatar URL",
        "Email",
        "About",
    ];

    render_fields(
        f,
        area,
        "Profile & Settings",
        &field_names,
        &state.field_values(),
        state.current_field as usize,
        state.editing,
        focused,
    );
}
