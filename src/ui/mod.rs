pub mod admin;
pub mod components;
pub mod project_form;
pub mod public;
pub mod settings_form;
