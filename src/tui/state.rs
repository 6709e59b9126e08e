// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::dashboard::Dashboard;
use crate::model::Category;
use ratatui::widgets::TableState;
use strum::IntoEnumIterator;

/// A line in the course → item tree of the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRow<'a> {
    Course(&'a str),
    Item { title: &'a str, date_label: &'a str },
}

pub struct AppState {
    // Data
    pub dashboard: Option<Dashboard>,

    // UI State
    pub active_tab: Category,
    pub table_state: TableState,
    pub message: String,
    pub loading: bool,
    /// Set once the network actor has stopped; refreshes are no longer possible.
    pub offline: bool,
    pub show_full_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let mut t_state = TableState::default();
        t_state.select(Some(0));
        Self {
            dashboard: None,
            active_tab: Category::Announcements,
            table_state: t_state,
            message: "Loading...".to_string(),
            loading: true,
            offline: false,
            show_full_help: false,
        }
    }

    pub fn tab_index(&self) -> usize {
        Category::iter()
            .position(|c| c == self.active_tab)
            .unwrap_or(0)
    }

    pub fn select_tab(&mut self, category: Category) {
        if self.active_tab != category {
            self.active_tab = category;
            self.table_state.select(Some(0));
        }
    }

    pub fn next_tab(&mut self) {
        let tabs: Vec<Category> = Category::iter().collect();
        let next = tabs[(self.tab_index() + 1) % tabs.len()];
        self.select_tab(next);
    }

    /// Flattened tree of the active tab: each course followed by its items.
    pub fn visible_rows(&self) -> Vec<TreeRow<'_>> {
        let Some(board) = &self.dashboard else {
            return Vec::new();
        };
        let mut rows = Vec::new();
        for group in board.groups(self.active_tab) {
            rows.push(TreeRow::Course(&group.course_name));
            rows.extend(group.rows.iter().map(|r| TreeRow::Item {
                title: &r.title,
                date_label: &r.date_label,
            }));
        }
        rows
    }

    pub fn set_dashboard(&mut self, board: Dashboard) {
        self.message = "Ready.".to_string();
        self.dashboard = Some(board);
        self.loading = false;
        let len = self.visible_rows().len();
        match self.table_state.selected() {
            Some(i) if i < len => {}
            _ => self.table_state.select(Some(0)),
        }
    }

    /// The refresh request could not be delivered.
    pub fn refresh_unavailable(&mut self) {
        self.offline = true;
        self.loading = false;
        self.message = "Error: refresh unavailable, restart canvas-desk".to_string();
    }

    pub fn updated_label(&self) -> String {
        self.dashboard
            .as_ref()
            .map(Dashboard::updated_label)
            .unwrap_or_else(|| "Last updated: Never".to_string())
    }

    pub fn next(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }
}
