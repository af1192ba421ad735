use std::sync::Arc;

use anyhow::Result;
use chrono::Datelike;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::{PortfolioApi, Scope};
use crate::models::{ProfileSettings, Project};
use crate::store::{ProjectsStore, SettingsStore};

pub const PLACEHOLDER_NAME: &str = "Your Name";
pub const PLACEHOLDER_ROLE: &str = "Full-Stack Developer";
pub const PLACEHOLDER_HEADLINE: &str = "I build delightful web experiences.";
pub const NO_PROJECTS: &str = "No projects yet. Add some from the admin portal.";

// Represents the state of the read-only portfolio screen
pub struct PublicState<A> {
    settings: SettingsStore<A>,
    projects: ProjectsStore<A>,
    loading: bool,
    scroll: u16,
}

impl<A: PortfolioApi> PublicState<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            settings: SettingsStore::new(api.clone()),
            projects: ProjectsStore::new(api, Scope::Public),
            loading: true,
            scroll: 0,
        }
    }

    /// Fetches settings and projects together. Both loads swallow their own
    /// failures, so loading always ends.
    pub async fn load(&mut self) {
        self.loading = true;
        tokio::join!(self.settings.load(), self.projects.list());
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn settings(&self) -> Option<&ProfileSettings> {
        self.settings.settings()
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.projects()
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

pub enum PublicAction {
    Exit,
    Reload,
    OpenAdmin,
}

pub fn render_public<B: Backend, A: PortfolioApi>(frame: &mut Frame<B>, state: &PublicState<A>) {
    let size = frame.size();

    if state.is_loading() {
        let loading = Paragraph::new("Loading portfolio...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(loading, size);
        return;
    }

    let settings = state.settings();
    let about = settings.map(|s| s.about.trim()).filter(|about| !about.is_empty());

    let mut constraints = vec![Constraint::Length(8)];
    if about.is_some() {
        constraints.push(Constraint::Length(6));
    }
    constraints.push(Constraint::Min(3));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);
    let mut chunk = chunks.iter().copied();

    if let Some(area) = chunk.next() {
        frame.render_widget(header(settings), area);
    }

    if let Some(about) = about {
        if let Some(area) = chunk.next() {
            let about = Paragraph::new(about)
                .wrap(Wrap { trim: false })
                .block(Block::default().title("About").borders(Borders::ALL));
            frame.render_widget(about, area);
        }
    }

    if let Some(area) = chunk.next() {
        let projects = Paragraph::new(project_lines(state.projects()))
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0))
            .block(Block::default().title("Projects").borders(Borders::ALL));
        frame.render_widget(projects, area);
    }

    if let Some(area) = chunk.next() {
        let name = settings
            .map(|s| s.name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(PLACEHOLDER_NAME);
        let footer = Paragraph::new(format!("© {} {}", chrono::Local::now().year(), name))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, area);
    }

    if let Some(area) = chunk.next() {
        let buttons = Paragraph::new("<A> Admin | <R> Reload | Up/Down - Scroll | <Esc> Exit")
            .block(Block::default().borders(Borders::TOP))
            .style(Style::default().fg(Color::White));
        frame.render_widget(buttons, area);
    }
}

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(placeholder)
}

fn header(settings: Option<&ProfileSettings>) -> Paragraph<'_> {
    let mut lines = vec![
        Spans::from(Span::styled(
            or_placeholder(settings.map(|s| s.name.as_str()), PLACEHOLDER_NAME),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::styled(
            or_placeholder(settings.map(|s| s.role.as_str()), PLACEHOLDER_ROLE),
            Style::default().fg(Color::Cyan),
        )),
        Spans::from(or_placeholder(
            settings.map(|s| s.headline.as_str()),
            PLACEHOLDER_HEADLINE,
        )),
    ];

    if let Some(settings) = settings {
        let mut contact = Vec::new();
        if let Some(location) = settings.location() {
            contact.push(Span::raw(format!("Location: {}  ", location)));
        }
        if let Some(email) = settings.email() {
            contact.push(Span::raw(format!("Email: {}", email)));
        }
        if !contact.is_empty() {
            lines.push(Spans::from(contact));
        }

        if let Some(avatar) = settings.avatar_url() {
            lines.push(Spans::from(Span::styled(
                format!("Avatar: {}", avatar),
                Style::default().fg(Color::DarkGray),
            )));
        }

        if !settings.socials.is_empty() {
            let socials: Vec<String> = settings
                .socials
                .iter()
                .map(|(platform, url)| format!("{}: {}", platform, url))
                .collect();
            lines.push(Spans::from(socials.join("  ")));
        }
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL))
}

fn project_lines(projects: &[Project]) -> Vec<Spans<'_>> {
    if projects.is_empty() {
        return vec![Spans::from(Span::styled(
            NO_PROJECTS,
            Style::default().fg(Color::Gray),
        ))];
    }

    let mut lines = Vec::new();
    for project in projects {
        lines.push(Spans::from(Span::styled(
            project.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Spans::from(project.description.as_str()));

        if !project.tags.is_empty() {
            let tags: Vec<Span> = project
                .tags
                .iter()
                .map(|tag| Span::styled(format!("[{}] ", tag), Style::default().fg(Color::Cyan)))
                .collect();
            lines.push(Spans::from(tags));
        }

        if let Some(image) = project.image_url() {
            lines.push(Spans::from(format!("Image: {}", image)));
        }
        if let Some(live) = project.live_url() {
            lines.push(Spans::from(format!("Live: {}", live)));
        }
        if let Some(repo) = project.repo_url() {
            lines.push(Spans::from(format!("Code: {}", repo)));
        }
        lines.push(Spans::from(""));
    }
    lines
}

pub fn handle_input<A: PortfolioApi>(state: &mut PublicState<A>) -> Result<Option<PublicAction>> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            return Ok(handle_key(state, key.code));
        }
    }
    Ok(None)
}

pub fn handle_key<A: PortfolioApi>(state: &mut PublicState<A>, key: KeyCode) -> Option<PublicAction> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(PublicAction::Exit),
        KeyCode::Char('a') => Some(PublicAction::OpenAdmin),
        KeyCode::Char('r') => Some(PublicAction::Reload),
        KeyCode::Down => {
            state.scroll_down();
            None
        }
        KeyCode::Up => {
            state.scroll_up();
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::ui::test_support::render_to_string;
    use serde_json::json;

    #[tokio::test]
    async fn empty_backend_shows_placeholders() {
        let mut state = PublicState::new(Arc::new(FakeBackend::empty()));

        state.load().await;

        assert!(!state.is_loading());
        let screen = render_to_string(100, 30, |f| render_public(f, &state));
        assert!(screen.contains(PLACEHOLDER_NAME));
        assert!(screen.contains(PLACEHOLDER_ROLE));
        assert!(screen.contains("No projects yet."));
        assert!(!screen.contains("About"));
    }

    #[tokio::test]
    async fn shows_loading_until_loaded() {
        let state = PublicState::new(Arc::new(FakeBackend::empty()));

        let screen = render_to_string(80, 10, |f| render_public(f, &state));

        assert!(state.is_loading());
        assert!(screen.contains("Loading portfolio..."));
    }

    #[tokio::test]
    async fn failing_backend_still_clears_loading() {
        let api = FakeBackend::empty();
        api.fail_with(500, None);
        let mut state = PublicState::new(Arc::new(api));

        state.load().await;

        assert!(!state.is_loading());
        assert!(state.settings().is_none());
        assert!(state.projects().is_empty());
    }

    #[tokio::test]
    async fn renders_profile_and_project_cards() {
        let api = FakeBackend::empty()
            .with_settings(json!({
                "name": "Ada Lovelace",
                "role": "Engineer",
                "headline": "Poetical science",
                "about": "Wrote the first program.",
                "email": "ada@example.com",
                "socials": { "github": "https://github.com/ada" }
            }))
            .with_projects(vec![Project {
                id: Some("1".to_string()),
                title: "Analytical Engine".to_string(),
                description: "Bernoulli numbers".to_string(),
                tags: vec!["math".to_string()],
                repo_url: Some("https://example.com/engine".to_string()),
                ..Default::default()
            }]);
        let mut state = PublicState::new(Arc::new(api));

        state.load().await;
        let screen = render_to_string(100, 40, |f| render_public(f, &state));

        assert!(screen.contains("Ada Lovelace"));
        assert!(screen.contains("Poetical science"));
        assert!(screen.contains("Email: ada@example.com"));
        assert!(screen.contains("github: https://github.com/ada"));
        assert!(screen.contains("Wrote the first program."));
        assert!(screen.contains("Analytical Engine"));
        assert!(screen.contains("[math]"));
        assert!(screen.contains("Code: https://example.com/engine"));
        assert!(!screen.contains(PLACEHOLDER_NAME));
        assert!(!screen.contains("Live:"));
    }

    #[tokio::test]
    async fn keys_map_to_actions() {
        let mut state = PublicState::new(Arc::new(FakeBackend::empty()));

        assert!(matches!(handle_key(&mut state, KeyCode::Char('a')), Some(PublicAction::OpenAdmin)));
        assert!(matches!(handle_key(&mut state, KeyCode::Esc), Some(PublicAction::Exit)));
        assert!(handle_key(&mut state, KeyCode::Up).is_none());
        assert_eq!(state.scroll, 0);
        handle_key(&mut state, KeyCode::Down);
        assert_eq!(state.scroll, 1);
    }
}
