// Native binary for solx - Terminal UI mode

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::OpenOptions,
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use solx::{
    app::{App, InputMode, Screen},
    config::{load, Config},
    copy_api::CopyTarget,
    feed_client::{BlockFeed, BlockFeedClient},
    feed_source,
    platform::{Clipboard, NoClipboard, SystemClipboard},
    types::{AppEvent, PageRequest},
    ui,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();

    let cfg = load().context("Failed to load configuration")?;
    init_logging(&cfg)?;
    cfg.log_summary();

    let client: Arc<dyn BlockFeed> =
        Arc::new(BlockFeedClient::new(cfg.client()).context("Failed to build HTTP client")?);

    let clipboard: Box<dyn Clipboard> = match SystemClipboard::new() {
        Ok(cb) => Box::new(cb),
        Err(e) => {
            log::warn!("System clipboard unavailable, copy disabled: {e}");
            Box::new(NoClipboard)
        }
    };

    // app + channels
    let (event_tx, event_rx) = unbounded_channel::<AppEvent>();
    let (req_tx, req_rx) = unbounded_channel::<PageRequest>();
    let fetch_task = tokio::spawn(feed_source::run_feed_fetch(client, req_rx, event_tx));

    let mut app = App::new(cfg.limit, cfg.search.clone(), clipboard, Some(req_tx))
        .with_display(cfg.theme, cfg.render_fps);

    // terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    app.mount();
    let result = run_loop(&mut app, &mut terminal, event_rx).await;

    // cleanup
    app.unmount();
    fetch_task.abort();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn init_logging(cfg: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.log_file)
        .with_context(|| format!("Failed to open log file {}", cfg.log_file))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        // frame budget (coalesced renders)
        let frame_ms = 1000u32.saturating_div(app.fps().max(1)) as u64;
        let budget = Duration::from_millis(frame_ms.max(1));
        let refresh_due = if dirty { budget } else { Duration::from_secs(1) };
        let wait = refresh_due.saturating_sub(last_frame.elapsed()).min(budget);

        if event::poll(wait)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                    handle_key(app, k);
                    dirty = true;
                }
            }
        }
        while let Ok(ev) = rx.try_recv() {
            app.on_event(ev);
            dirty = true;
        }

        // Redraw on change, and at least once a second so relative times and toasts age
        if last_frame.elapsed() >= refresh_due {
            let now = chrono::Utc::now().timestamp();
            terminal.draw(|f| ui::draw(f, app, now))?;
            last_frame = Instant::now();
            dirty = false;
        }
        if app.quit_flag() {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, k: KeyEvent) {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (k.code, k.modifiers) {
        app.on_event(AppEvent::Quit);
        return;
    }

    // Search input mode: every keystroke edits the query live
    if app.input_mode() == InputMode::Search {
        match k.code {
            KeyCode::Char(c) => app.search_add_char(c),
            KeyCode::Backspace => app.search_backspace(),
            KeyCode::Enter => app.finish_search(),
            KeyCode::Esc => app.clear_search(),
            KeyCode::Up => app.up(),
            KeyCode::Down => app.down(),
            _ => {}
        }
        return;
    }

    match app.screen() {
        Screen::Feed => match k.code {
            KeyCode::Char('q') => app.on_event(AppEvent::Quit),
            KeyCode::Up | KeyCode::Char('k') => app.up(),
            KeyCode::Down | KeyCode::Char('j') => app.down(),
            KeyCode::PageUp => app.page_up(10),
            KeyCode::PageDown => app.page_down(10),
            KeyCode::Home => app.home(),
            KeyCode::End => app.end(),
            KeyCode::Enter => app.open_detail(),
            KeyCode::Char('/') | KeyCode::Char('f') => app.start_search(),
            KeyCode::Esc => app.clear_search(),
            KeyCode::Char('r') => app.pull_to_refresh(),
            KeyCode::Char('R') => app.reload(),
            KeyCode::Char('+') | KeyCode::Char('=') => app.cycle_limit(true),
            KeyCode::Char('-') => app.cycle_limit(false),
            KeyCode::Char('c') => {
                app.copy(CopyTarget::Selection);
            }
            KeyCode::Char('C') => {
                app.copy(CopyTarget::BlockJson);
            }
            _ => {}
        },
        Screen::Detail => match k.code {
            KeyCode::Char('q') => app.on_event(AppEvent::Quit),
            KeyCode::Up | KeyCode::Char('k') => app.up(),
            KeyCode::Down | KeyCode::Char('j') => app.down(),
            KeyCode::Home => app.home(),
            KeyCode::End => app.end(),
            KeyCode::Char('c') | KeyCode::Enter => {
                app.copy(CopyTarget::Selection);
            }
            KeyCode::Char('C') => {
                app.copy(CopyTarget::BlockJson);
            }
            KeyCode::Esc | KeyCode::Backspace => app.close_detail(),
            _ => {}
        },
    }
}
