// File: ./src/dashboard.rs
//! The fetch-sort-group pipeline behind every refresh.
//!
//! For each configured course the metadata, announcements and assignments
//! are fetched one after another. Failures never stop the refresh: a course
//! whose metadata is unavailable is shown as `Course {id}`, and a category
//! that cannot be fetched simply contributes no group.
use crate::client::CanvasClient;
use crate::config::Config;
use crate::model::item::sort_newest_first;
use crate::model::{Category, Course, Item};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::fmt::Write;

/// One `(title, date)` line under a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub title: String,
    pub date_label: String,
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            date_label: item.date_label(),
        }
    }
}

/// A course node with its rows, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseGroup {
    pub course_id: String,
    pub course_name: String,
    pub rows: Vec<ItemRow>,
}

impl CourseGroup {
    /// Sorts `items` and wraps them under `course`. Returns `None` for an
    /// empty list: courses without items get no node at all.
    pub fn build(course: &Course, mut items: Vec<Item>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        sort_newest_first(&mut items);
        Some(Self {
            course_id: course.id.clone(),
            course_name: course.name.clone(),
            rows: items.iter().map(ItemRow::from).collect(),
        })
    }
}

/// Everything the presenter needs for both tabs.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub announcements: Vec<CourseGroup>,
    pub assignments: Vec<CourseGroup>,
    pub updated_at: DateTime<Local>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            announcements: Vec::new(),
            assignments: Vec::new(),
            updated_at: Local::now(),
        }
    }
}

impl Dashboard {
    pub fn groups(&self, category: Category) -> &[CourseGroup] {
        match category {
            Category::Announcements => &self.announcements,
            Category::Assignments => &self.assignments,
        }
    }

    fn groups_mut(&mut self, category: Category) -> &mut Vec<CourseGroup> {
        match category {
            Category::Announcements => &mut self.announcements,
            Category::Assignments => &mut self.assignments,
        }
    }

    /// Adds the group for `course` if `items` is non-empty.
    pub fn push(&mut self, category: Category, course: &Course, items: Vec<Item>) {
        if let Some(group) = CourseGroup::build(course, items) {
            self.groups_mut(category).push(group);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.announcements.is_empty() && self.assignments.is_empty()
    }

    /// `Last updated: 03:04 PM`
    pub fn updated_label(&self) -> String {
        format!("Last updated: {}", self.updated_at.format("%I:%M %p"))
    }

    /// Plain-text tree of one category, as printed by `canvas-desk print`.
    pub fn render_text(&self, category: Category) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", category);
        let groups = self.groups(category);
        if groups.is_empty() {
            let _ = writeln!(out, "  (nothing to show)");
        }
        for group in groups {
            let _ = writeln!(out, "{}", group.course_name);
            for row in &group.rows {
                let _ = writeln!(out, "  {}  [{}]", row.title, row.date_label);
            }
        }
        out
    }
}

/// Runs one full refresh for `course_ids`, in order.
pub async fn refresh(client: &CanvasClient, course_ids: &[String]) -> Dashboard {
    log::info!("Refreshing {} course(s)", course_ids.len());
    let mut dashboard = Dashboard::default();

    for course_id in course_ids {
        let course = client.get_course(course_id).await.recover(|failure| {
            log::warn!("Course {}: metadata unavailable: {}", course_id, failure);
            Course::fallback(course_id)
        });

        for category in [Category::Announcements, Category::Assignments] {
            let items = client
                .get_items(course_id, category)
                .await
                .recover(|failure| {
                    log::warn!("Course {}: {} unavailable: {}", course_id, category, failure);
                    Vec::new()
                });
            dashboard.push(category, &course, items);
        }
    }

    dashboard.updated_at = Local::now();
    log::info!(
        "Refresh done: {} announcement group(s), {} assignment group(s)",
        dashboard.announcements.len(),
        dashboard.assignments.len()
    );
    dashboard
}

/// Builds a client from `config` and refreshes every configured course.
/// Only an unusable config (bad URL or token) is an error.
pub async fn refresh_from_config(config: &Config) -> Result<Dashboard> {
    let client = CanvasClient::from_config(config)?;
    Ok(refresh(&client, &config.course_ids).await)
}
