use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use folio_core::{scroll::ScrollConfigExt, AppConfig};
use folio_tui::{
    app::{App, LoadJob},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    loader::{spawn_section_load, LoadResult},
    widgets::{self, body_rows},
    Theme,
};

type Backend = CrosstermBackend<io::Stdout>;

pub async fn run(config: Arc<AppConfig>, hash: Option<String>) -> Result<()> {
    let href = startup_href(&config.general.base_url, hash.as_deref());
    tracing::info!(href = %href, "Starting terminal page");

    let mut app = App::new(config.clone(), &href)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("folio"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn main_loop(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    config: &AppConfig,
) -> Result<()> {
    let theme = Theme::default();
    let event_handler = EventHandler::new(config.ui.tick_rate_ms)
        .with_frame_interval(config.scroll.animation_tick_duration());

    // Channel for async section loads
    let (load_tx, mut load_rx) = mpsc::unbounded_channel::<LoadResult>();

    app.resize(body_rows(terminal.size()?.height));
    let jobs = app.start(Instant::now());
    spawn_loads(&load_tx, jobs);

    loop {
        // Process any completed loads (non-blocking)
        while let Ok(result) = load_rx.try_recv() {
            app.handle_load(result);
        }

        app.tick(Instant::now());

        terminal.draw(|frame| widgets::render(frame, app, &theme))?;

        // Animation frames need the fast poll rate
        if let Some(event) = event_handler.next(app.wants_fast_tick())? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    handle_action(app, action, &load_tx)?;
                }
                AppEvent::Scroll(rows) => app.scroll_rows(rows),
                AppEvent::Resize(_, height) => app.resize(body_rows(height)),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    app.engine.teardown();
    Ok(())
}

fn handle_action(
    app: &mut App,
    action: Action,
    load_tx: &mpsc::UnboundedSender<LoadResult>,
) -> Result<()> {
    let now = Instant::now();

    if action != Action::PendingG {
        app.clear_pending_key();
    }
    if action != Action::None {
        app.clear_status();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::ScrollDown => app.scroll_rows(1),
        Action::ScrollUp => app.scroll_rows(-1),
        Action::ScrollHalfPageDown => app.scroll_half_page_down(),
        Action::ScrollHalfPageUp => app.scroll_half_page_up(),
        Action::NextSection => app.next_section(now),
        Action::PrevSection => app.prev_section(now),
        Action::JumpToSection(idx) => app.jump_to_index(idx, now),
        Action::JumpToTop => app.jump_to_top(now),
        Action::JumpToBottom => app.jump_to_bottom(now),
        Action::PendingG => app.pending_key = Some('g'),
        Action::HistoryBack => {
            let jobs = app.history_back(now)?;
            spawn_loads(load_tx, jobs);
        }
        Action::HistoryForward => {
            let jobs = app.history_forward(now)?;
            spawn_loads(load_tx, jobs);
        }
        Action::OpenArticle => app.open_article("building-this-portfolio"),
        Action::CloseArticle => {
            let jobs = app.close_article(now)?;
            spawn_loads(load_tx, jobs);
        }
        Action::ReloadSection => {
            let section = app.engine.state().current_section().clone();
            match app.begin_reload_section(section) {
                Some(job) => spawn_loads(load_tx, vec![job]),
                None => app.set_status("Nothing to reload here"),
            }
        }
        Action::None => {}
    }

    Ok(())
}

fn spawn_loads(tx: &mpsc::UnboundedSender<LoadResult>, jobs: Vec<LoadJob>) {
    for job in jobs {
        spawn_section_load(tx.clone(), job.section, job.latency);
    }
}

/// Base URL with the requested hash, if any
fn startup_href(base_url: &str, hash: Option<&str>) -> String {
    let base = base_url.split('#').next().unwrap_or(base_url);
    match hash.map(|h| h.trim_start_matches('#')).filter(|h| !h.is_empty()) {
        Some(hash) => format!("{}#{}", base, hash),
        None => base.to_string(),
    }
}
