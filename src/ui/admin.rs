use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::error;
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::{PortfolioApi, Scope};
use crate::models::{Project, ProjectPatch};
use crate::store::{ProjectsStore, SettingsStore};
use crate::ui::components::popup::{render_confirmation, render_notice, Notice};
use crate::ui::project_form::{
    render_project_editor, render_project_form, ProjectEditorState, ProjectFormState,
};
use crate::ui::settings_form::{render_settings_form, SettingsFormState};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Panel {
    Settings,
    NewProject,
    Projects,
}

impl Panel {
    fn next(self) -> Self {
        match self {
            Panel::Settings => Panel::NewProject,
            Panel::NewProject => Panel::Projects,
            Panel::Projects => Panel::Settings,
        }
    }
}

// Represents the state of the admin screen
pub struct AdminState<A> {
    settings: SettingsStore<A>,
    projects: ProjectsStore<A>,
    loading: bool,
    panel: Panel,
    settings_form: SettingsFormState,
    project_form: ProjectFormState,
    editor: Option<ProjectEditorState>,
    list_state: ListState,
    show_delete_confirmation: bool,
    notice: Option<Notice>,
}

#[derive(Debug, PartialEq)]
pub enum AdminAction {
    Exit,
    OpenPublic,
    SaveSettings,
    CreateProject,
    UpdateProject(String, ProjectPatch),
    DeleteProject(String),
}

impl<A: PortfolioApi> AdminState<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            settings: SettingsStore::new(api.clone()),
            projects: ProjectsStore::new(api, Scope::Admin),
            loading: true,
            panel: Panel::Settings,
            settings_form: SettingsFormState::new(Default::default()),
            project_form: ProjectFormState::new(),
            editor: None,
            list_state: ListState::default(),
            show_delete_confirmation: false,
            notice: None,
        }
    }

    /// Fetches settings and the full project collection together, then seeds
    /// the settings form from whatever the backend had.
    pub async fn load(&mut self) {
        self.loading = true;
        tokio::join!(self.settings.load(), self.projects.list());

        if let Some(settings) = self.settings.settings() {
            self.settings_form = SettingsFormState::new(settings.clone());
        }
        self.editor = None;
        let selected = if self.projects().is_empty() { None } else { Some(0) };
        self.list_state.select(selected);
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.projects()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn save_settings(&mut self) {
        let record = self.settings_form.settings.clone();
        match self.settings.save(&record).await {
            Ok(saved) => {
                self.settings_form.settings = saved.clone();
                self.notice = Some(Notice::info("Settings saved"));
            }
            Err(err) => {
                error!("Failed to save settings: {}", err);
                self.notice = Some(Notice::error(err.user_message("Failed to save settings")));
            }
        }
    }

    pub async fn create_project(&mut self) {
        let draft = self.project_form.draft();
        if !draft.is_valid() {
            self.notice = Some(Notice::error("Title and description are required"));
            return;
        }

        match self.projects.create(&draft).await {
            Ok(_) => {
                self.project_form.clear();
                let selected = self.list_state.selected().map_or(0, |i| i + 1);
                self.list_state.select(Some(selected));
            }
            Err(err) => {
                error!("Failed to create project: {}", err);
                self.notice = Some(Notice::error(err.user_message("Failed to create project")));
            }
        }
    }

    pub async fn update_project(&mut self, id: &str, patch: &ProjectPatch) {
        if let Err(err) = self.projects.update(id, patch).await {
            error!("Failed to update project {}: {}", id, err);
            self.notice = Some(Notice::error(err.user_message("Failed to update project")));
        }

        // Show what the backend holds now, whether or not the update landed.
        if let Some(editor) = self.editor.as_mut().filter(|e| e.id() == id) {
            if let Some(project) = find_project(self.projects.projects(), id) {
                editor.reset(project);
            }
        }
    }

    pub async fn delete_project(&mut self, id: &str) {
        match self.projects.delete(id).await {
            Ok(true) => {
                if self.editor.as_ref().is_some_and(|e| e.id() == id) {
                    self.editor = None;
                }
                self.clamp_selection();
            }
            Ok(false) => {
                self.notice = Some(Notice::error("The backend did not confirm the deletion"));
            }
            Err(err) => {
                error!("Failed to delete project {}: {}", id, err);
                self.notice = Some(Notice::error(err.user_message("Failed to delete project")));
            }
        }
    }

    fn selected_project(&self) -> Option<&Project> {
        self.list_state.selected().and_then(|i| self.projects().get(i))
    }

    fn selected_project_id(&self) -> Option<String> {
        self.selected_project().and_then(|p| p.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.projects().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            Some(i) => Some(i),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    fn next(&mut self) {
        let len = self.projects().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        let len = self.projects().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn open_editor(&mut self) {
        if let Some(project) = self.selected_project() {
            if let Some(id) = project.id.clone() {
                self.editor = Some(ProjectEditorState::from_existing(id, project));
            }
        }
    }

    fn is_editing(&self) -> bool {
        match self.panel {
            Panel::Settings => self.settings_form.editing,
            Panel::NewProject => self.project_form.editing,
            Panel::Projects => self.editor.is_some(),
        }
    }
}

fn find_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    projects.iter().find(|p| p.id.as_deref() == Some(id))
}

pub fn render_admin<B: Backend, A: PortfolioApi>(frame: &mut Frame<B>, state: &mut AdminState<A>) {
    let size = frame.size();

    if state.is_loading() {
        let loading = Paragraph::new("Loading admin...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(loading, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(size);

    let title = Paragraph::new("Admin Portal")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_settings_form(
        frame,
        &state.settings_form,
        columns[0],
        state.panel == Panel::Settings,
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(columns[1]);

    render_project_form(
        frame,
        &state.project_form,
        right[0],
        state.panel == Panel::NewProject,
    );

    let projects_area = if state.editor.is_some() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(8)])
            .split(right[1]);
        if let Some(editor) = &state.editor {
            render_project_editor(frame, editor, split[1], state.panel == Panel::Projects);
        }
        split[0]
    } else {
        right[1]
    };

    render_project_list(frame, state, projects_area);

    let help = Paragraph::new(help_text(state))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);

    if state.show_delete_confirmation {
        render_confirmation(frame, "Delete this project?");
    }

    if let Some(notice) = &state.notice {
        render_notice(frame, notice);
    }
}

fn render_project_list<B: Backend, A: PortfolioApi>(
    frame: &mut Frame<B>,
    state: &mut AdminState<A>,
    area: tui::layout::Rect,
) {
    let focused = state.panel == Panel::Projects && state.editor.is_none();
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title("Projects")
        .borders(Borders::ALL)
        .border_style(border_style);

    if state.projects().is_empty() {
        let empty = Paragraph::new("No projects yet.")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .projects
        .projects()
        .iter()
        .map(|project| {
            let mut spans = vec![Span::raw(project.title.clone())];
            if !project.tags.is_empty() {
                spans.push(Span::styled(
                    format!(" [{}]", project.tags.join(", ")),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Spans::from(spans))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(list, area, &mut state.list_state);
}

fn help_text<A: PortfolioApi>(state: &AdminState<A>) -> &'static str {
    match state.panel {
        _ if state.is_editing() && state.panel != Panel::Projects => {
            "Enter - Save field | Esc - Done"
        }
        Panel::Settings => {
            "Enter - Edit field | Up/Down - Navigate | S - Save settings | Tab - Next panel | P - Public | Q - Quit"
        }
        Panel::NewProject => {
            "Enter - Edit field | Up/Down - Navigate | S - Create project | Tab - Next panel | P - Public | Q - Quit"
        }
        Panel::Projects => match &state.editor {
            Some(editor) if editor.editing => "Enter - Update field | Esc - Discard",
            Some(_) => "Enter - Edit field | Up/Down - Navigate | Esc - Close editor",
            None => {
                "Enter - Edit project | D - Delete | Up/Down - Select | Tab - Next panel | P - Public | Q - Quit"
            }
        },
    }
}

pub fn handle_input<A: PortfolioApi>(state: &mut AdminState<A>) -> Result<Option<AdminAction>> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            return Ok(handle_key(state, key.code));
        }
    }
    Ok(None)
}

pub fn handle_key<A: PortfolioApi>(state: &mut AdminState<A>, key: KeyCode) -> Option<AdminAction> {
    if state.notice.take().is_some() {
        return None;
    }

    if state.show_delete_confirmation {
        match key {
            KeyCode::Char('y') => {
                state.show_delete_confirmation = false;
                return state.selected_project_id().map(AdminAction::DeleteProject);
            }
            KeyCode::Char('n') | KeyCode::Esc => state.show_delete_confirmation = false,
            _ => {}
        }
        return None;
    }

    if state.is_editing() {
        return handle_editing_key(state, key);
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(AdminAction::Exit),
        KeyCode::Char('p') => return Some(AdminAction::OpenPublic),
        KeyCode::Tab => state.panel = state.panel.next(),
        _ => {}
    }

    match state.panel {
        Panel::Settings => match key {
            KeyCode::Up => state.settings_form.previous_field(),
            KeyCode::Down => state.settings_form.next_field(),
            KeyCode::Enter => state.settings_form.toggle_editing(),
            KeyCode::Char('s') => return Some(AdminAction::SaveSettings),
            _ => {}
        },
        Panel::NewProject => match key {
            KeyCode::Up => state.project_form.previous_field(),
            KeyCode::Down => state.project_form.next_field(),
            KeyCode::Enter => state.project_form.toggle_editing(),
            KeyCode::Char('s') => {
                if state.project_form.is_valid() {
                    return Some(AdminAction::CreateProject);
                }
                state.notice = Some(Notice::error("Title and description are required"));
            }
            _ => {}
        },
        Panel::Projects => match key {
            KeyCode::Up => state.previous(),
            KeyCode::Down => state.next(),
            KeyCode::Enter => state.open_editor(),
            KeyCode::Char('d') => {
                if state.selected_project().is_some() {
                    state.show_delete_confirmation = true;
                }
            }
            _ => {}
        },
    }

    None
}

fn handle_editing_key<A: PortfolioApi>(
    state: &mut AdminState<A>,
    key: KeyCode,
) -> Option<AdminAction> {
    match state.panel {
        Panel::Settings => match key {
            KeyCode::Enter | KeyCode::Esc => state.settings_form.toggle_editing(),
            _ => state.settings_form.edit_current_field(key),
        },
        Panel::NewProject => match key {
            KeyCode::Enter | KeyCode::Esc => state.project_form.toggle_editing(),
            _ => state.project_form.edit_current_field(key),
        },
        Panel::Projects => {
            let projects = state.projects.projects();
            let Some(editor) = state.editor.as_mut() else {
                return None;
            };
            let Some(project) = find_project(projects, editor.id()) else {
                state.editor = None;
                return None;
            };

            if editor.editing {
                match key {
                    KeyCode::Enter => {
                        let patch = editor.commit_field(project)?;
                        return Some(AdminAction::UpdateProject(editor.id().to_string(), patch));
                    }
                    KeyCode::Esc => editor.reset(project),
                    _ => editor.edit_current_field(key),
                }
            } else {
                match key {
                    KeyCode::Up => editor.previous_field(),
                    KeyCode::Down => editor.next_field(),
                    KeyCode::Enter => editor.start_editing(),
                    KeyCode::Esc => state.editor = None,
                    _ => {}
                }
            }
        }
    }

    None
}
