// Defines actions and events exchanged between the UI loop and the network actor.
use crate::dashboard::Dashboard;

#[derive(Debug)]
pub enum Action {
    Refresh,
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    DashboardLoaded(Dashboard),
    Error(String),
    Status(String),
}
