//! Main chat event loop
//!
//! The loop owns [`App`]: it reads terminal events, turns them into view
//! changes or [`AppAction`]s, applies queued actions, hands the resulting
//! commands to the executors and redraws at a capped frame rate.

mod executors;
mod keybindings;
mod lifecycle;

use std::{
    error::Error,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use self::executors::ExecutorContext;
use self::keybindings::{default_registry, handle_key_event, handle_paste, KeyRegistry, KeyResult};
use self::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use crate::api::{ChatBackend, HttpBackend};
use crate::core::app::{apply_actions, App, AppAction, AppActionDispatcher};
use crate::ui::renderer::ui;
use crate::ui::theme::ThemeMode;

/// Redraw cadence while a notice is up, so it disappears on time.
const NOTICE_REFRESH: Duration = Duration::from_millis(250);

/// Rows a PageUp/PageDown moves: half the terminal.
fn page_size(app: &App) -> u16 {
    (app.ui.last_term_size.height / 2).max(1)
}

async fn try_draw_frame(
    app: &Arc<Mutex<App>>,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> std::io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    let mut app_guard = app.lock().await;
    let mut terminal_guard = terminal.lock().await;
    terminal_guard.draw(|f| ui(f, &mut app_guard))?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

struct EventProcessingOutcome {
    events_processed: bool,
    request_redraw: bool,
    exit_requested: bool,
}

async fn process_ui_events(
    app: &Arc<Mutex<App>>,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
    registry: &KeyRegistry,
    dispatcher: &AppActionDispatcher,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome {
        events_processed: false,
        request_redraw: false,
        exit_requested: false,
    };

    while let Ok(ev) = event_rx.try_recv() {
        outcome.events_processed = true;
        let mut app_guard = app.lock().await;
        let result = match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let page = page_size(&app_guard);
                handle_key_event(&mut app_guard, registry, dispatcher, &key, page)
            }
            Event::Paste(text) => handle_paste(&mut app_guard, &text),
            Event::Resize(_, _) => KeyResult::Handled,
            _ => KeyResult::NotHandled,
        };
        match result {
            KeyResult::Exit => {
                outcome.exit_requested = true;
                break;
            }
            KeyResult::Handled => outcome.request_redraw = true,
            KeyResult::NotHandled => {}
        }
    }

    outcome
}

/// Applies every queued action and starts the commands they produce.
async fn drain_action_queue(
    app: &Arc<Mutex<App>>,
    executor: &ExecutorContext,
    action_rx: &mut mpsc::UnboundedReceiver<AppAction>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(action) = action_rx.try_recv() {
        pending.push(action);
    }

    if pending.is_empty() {
        return false;
    }

    let mut app_guard = app.lock().await;
    let commands = apply_actions(&mut app_guard, pending);
    drop(app_guard);
    for command in commands {
        debug!(?command, "spawning command");
        // Detached: the task reports back through the dispatcher.
        let _ = executor.spawn(command);
    }
    true
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            // Short timeout so the task never blocks for long
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub async fn run_chat(
    server_url: String,
    theme_mode: ThemeMode,
    timeout: Option<Duration>,
) -> Result<(), Box<dyn Error>> {
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::new(server_url.clone(), timeout)?);
    info!(server_url = %server_url, theme = theme_mode.as_str(), "starting chat session");

    let app = Arc::new(Mutex::new(App::new(theme_mode, server_url)));
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let dispatcher = AppActionDispatcher::new(action_tx);
    let executor = ExecutorContext::new(backend, dispatcher.clone());
    let registry = default_registry();

    // Set up the terminal only once everything that can fail cheaply has
    let terminal = setup_terminal()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let event_reader_handle = spawn_event_reader(event_tx);

    // Drawing cadence control
    const MAX_FPS: u64 = 60;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;

    let result: Result<(), Box<dyn Error>> = 'main_loop: loop {
        if let Err(err) = try_draw_frame(
            &app,
            &terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await
        {
            break 'main_loop Err(err.into());
        }

        let event_outcome = process_ui_events(&app, &mut event_rx, &registry, &dispatcher).await;
        if event_outcome.exit_requested {
            break 'main_loop Ok(());
        }
        if event_outcome.request_redraw {
            request_redraw = true;
        }

        if drain_action_queue(&app, &executor, &mut action_rx).await {
            request_redraw = true;
        }

        let notice_up = app.lock().await.ui.notice.is_some();
        if notice_up && last_draw.elapsed() >= NOTICE_REFRESH {
            request_redraw = true;
        }

        let idle = !event_outcome.events_processed && !request_redraw;
        if idle {
            tokio::time::sleep(Duration::from_millis(16)).await; // ~60 FPS when idle
        }
    };

    event_reader_handle.abort();
    restore_terminal(&terminal).await?;
    info!("chat session ended");

    result
}
