mod api;
mod config;
mod models;
mod store;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::api::HttpClient;
use crate::config::Config;
use crate::ui::{
    admin::{AdminAction, AdminState, render_admin, handle_input as handle_admin_input},
    public::{PublicAction, PublicState, render_public, handle_input as handle_public_input},
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum View {
    Public,
    Admin,
}

/// Terminal client for a personal portfolio backend
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Which view to open first
    #[arg(value_enum, default_value_t = View::Public)]
    view: View,

    /// Backend base URL, overriding BACKEND_URL
    #[arg(long)]
    backend_url: Option<String>,
}

// Represents the current screen in the app
enum AppScreen {
    Public,
    Admin,
}

// Main application state
struct AppState {
    api: Arc<HttpClient>,
    screen: AppScreen,
    public_state: Option<PublicState<HttpClient>>,
    admin_state: Option<AdminState<HttpClient>>,
}

impl AppState {
    fn new(api: HttpClient) -> Self {
        Self {
            api: Arc::new(api),
            screen: AppScreen::Public,
            public_state: None,
            admin_state: None,
        }
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init(cli.backend_url).context("failed to load configuration")?;
    init_logging(&config)?;

    let api = HttpClient::new(&config).context("failed to build HTTP client")?;
    info!("Using backend at {}", api.base_url());

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(api);

    let result = run_app(&mut terminal, &mut app_state, cli.view).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("Exited with error: {:?}", err);
        println!("Error: {}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    view: View,
) -> Result<()> {
    match view {
        View::Public => open_public_screen(terminal, app_state).await?,
        View::Admin => open_admin_screen(terminal, app_state).await?,
    }

    loop {
        draw(terminal, app_state)?;

        let should_quit = match app_state.screen {
            AppScreen::Public => handle_public_screen(terminal, app_state).await?,
            AppScreen::Admin => handle_admin_screen(terminal, app_state).await?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    terminal.draw(|f| match app_state.screen {
        AppScreen::Public => {
            if let Some(state) = &app_state.public_state {
                render_public(f, state);
            }
        }
        AppScreen::Admin => {
            if let Some(state) = &mut app_state.admin_state {
                render_admin(f, state);
            }
        }
    })?;
    Ok(())
}

// A fresh state is mounted on every switch; the loading frame is drawn
// before the initial fetches are awaited.
async fn open_public_screen<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
) -> Result<()> {
    app_state.admin_state = None;
    app_state.public_state = Some(PublicState::new(app_state.api.clone()));
    app_state.screen = AppScreen::Public;
    draw(terminal, app_state)?;

    if let Some(state) = &mut app_state.public_state {
        state.load().await;
    }
    Ok(())
}

async fn open_admin_screen<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
) -> Result<()> {
    app_state.public_state = None;
    app_state.admin_state = Some(AdminState::new(app_state.api.clone()));
    app_state.screen = AppScreen::Admin;
    draw(terminal, app_state)?;

    if let Some(state) = &mut app_state.admin_state {
        state.load().await;
    }
    Ok(())
}

async fn handle_public_screen<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
) -> Result<bool> {
    if let Some(state) = &mut app_state.public_state {
        match handle_public_input(state)? {
            Some(PublicAction::Exit) => return Ok(true),
            Some(PublicAction::Reload) => state.load().await,
            Some(PublicAction::OpenAdmin) => open_admin_screen(terminal, app_state).await?,
            None => {}
        }
    }

    Ok(false)
}

async fn handle_admin_screen<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
) -> Result<bool> {
    if let Some(state) = &mut app_state.admin_state {
        match handle_admin_input(state)? {
            Some(AdminAction::Exit) => return Ok(true),
            Some(AdminAction::OpenPublic) => open_public_screen(terminal, app_state).await?,
            Some(AdminAction::SaveSettings) => state.save_settings().await,
            Some(AdminAction::CreateProject) => state.create_project().await,
            Some(AdminAction::UpdateProject(id, patch)) => state.update_project(&id, &patch).await,
            Some(AdminAction::DeleteProject(id)) => state.delete_project(&id).await,
            None => {}
        }
    }

    Ok(false)
}
