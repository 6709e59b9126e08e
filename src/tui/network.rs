// Runs refreshes off the UI loop and reports the results back.
use crate::client::CanvasClient;
use crate::config::Config;
use crate::dashboard;
use crate::tui::action::{Action, AppEvent};
use tokio::sync::mpsc::{Receiver, Sender};

async fn refresh_and_report(client: &CanvasClient, config: &Config, event_tx: &Sender<AppEvent>) {
    let _ = event_tx
        .send(AppEvent::Status("Refreshing...".to_string()))
        .await;
    let board = dashboard::refresh(client, &config.course_ids).await;
    let _ = event_tx.send(AppEvent::DashboardLoaded(board)).await;
}

/// Performs the initial load, then one full refresh per `Action::Refresh`
/// until `Action::Quit` or the channel closes. Requests queue up; a refresh
/// always runs to completion.
pub async fn run_network_actor(
    config: Config,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    let client = match CanvasClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Cannot create Canvas client: {:#}", e);
            let _ = event_tx.send(AppEvent::Error(format!("{:#}", e))).await;
            return;
        }
    };

    refresh_and_report(&client, &config, &event_tx).await;

    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,
            Action::Refresh => refresh_and_report(&client, &config, &event_tx).await,
        }
    }
}
