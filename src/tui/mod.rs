// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod network;
pub mod onboarding;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::context::SharedContext;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};
use tokio::sync::mpsc;

/// Loads the credential file, running the interactive setup when no token
/// is configured yet. `None` means the user abandoned the setup.
async fn load_or_onboard(ctx: &SharedContext) -> Result<Option<Config>> {
    // Unreadable is fatal; only a missing file means a fresh install.
    if let Err(e) = Config::load(ctx.as_ref())
        && !Config::is_missing_config_error(&e)
    {
        return Err(e);
    }
    onboarding::run_setup(ctx.as_ref()).await
}

pub async fn run(ctx: SharedContext) -> Result<()> {
    // --- 1. CONFIG ---
    let Some(cfg) = load_or_onboard(&ctx).await? else {
        return Ok(());
    };
    log::info!("Loaded {:?}", cfg);

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 3. STATE INIT ---
    let mut app_state = AppState::new();

    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // --- 4. NETWORK TASK ---
    let network = tokio::spawn(network::run_network_actor(cfg, action_rx, event_tx));

    // --- 5. UI LOOP ---
    let result: Result<()> = async {
        loop {
            terminal.draw(|f| draw(f, &mut app_state))?;

            // A. Network Events
            while let Ok(event) = event_rx.try_recv() {
                handlers::handle_app_event(&mut app_state, event);
            }

            // B. Input Events
            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Mouse(mouse) => match mouse.kind {
                        MouseEventKind::ScrollDown => app_state.next(),
                        MouseEventKind::ScrollUp => app_state.previous(),
                        _ => {}
                    },
                    Event::Key(key) => {
                        // Filter out KeyRelease events to prevent double input on Windows
                        if key.kind == event::KeyEventKind::Release {
                            continue;
                        }
                        if let Some(action) = handlers::handle_key_event(key, &mut app_state) {
                            if matches!(action, Action::Quit) {
                                break;
                            }
                            if action_tx.send(action).await.is_err() {
                                log::warn!("Network actor is gone, refresh dropped");
                                app_state.refresh_unavailable();
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
    .await;

    // --- 6. CLEANUP ---
    // A refresh in flight is abandoned together with its results.
    let _ = action_tx.try_send(Action::Quit);
    network.abort();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}
