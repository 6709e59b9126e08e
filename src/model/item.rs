// File: ./src/model/item.rs
use crate::model::display::format_date;
use crate::model::timestamp::sort_key;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use strum::EnumIter;

/// The two kinds of course content the dashboard tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Category {
    Announcements,
    Assignments,
}

impl Category {
    /// Request path (with query) relative to the API root.
    pub fn endpoint(&self, course_id: &str) -> String {
        match self {
            Category::Announcements => format!(
                "/api/v1/courses/{}/discussion_topics?only_announcements=true",
                course_id
            ),
            Category::Assignments => format!("/api/v1/courses/{}/assignments", course_id),
        }
    }

    pub fn date_field(&self) -> &'static str {
        match self {
            Category::Announcements => "posted_at",
            Category::Assignments => "created_at",
        }
    }

    pub fn title_field(&self) -> &'static str {
        match self {
            Category::Announcements => "title",
            Category::Assignments => "name",
        }
    }

    pub fn missing_title(&self) -> &'static str {
        match self {
            Category::Announcements => "No Title",
            Category::Assignments => "No Name",
        }
    }

    /// Column header for the title column.
    pub fn title_header(&self) -> &'static str {
        match self {
            Category::Announcements => "Title",
            Category::Assignments => "Assignment Name",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Announcements => write!(f, "Announcements"),
            Category::Assignments => write!(f, "Assignments"),
        }
    }
}

/// One announcement or assignment. `raw` keeps the untouched payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub title: String,
    pub timestamp: Option<String>,
    pub raw: Value,
}

impl Item {
    /// Reads the title and date fields for `category` out of an API object.
    /// Non-string or empty values count as absent.
    pub fn from_json(category: Category, raw: Value) -> Self {
        let title = raw
            .get(category.title_field())
            .and_then(Value::as_str)
            .unwrap_or(category.missing_title())
            .to_string();
        let timestamp = raw
            .get(category.date_field())
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            title,
            timestamp,
            raw,
        }
    }

    pub fn sort_key(&self) -> DateTime<Utc> {
        sort_key(self.timestamp.as_deref())
    }

    pub fn date_label(&self) -> String {
        format_date(self.timestamp.as_deref())
    }
}

/// Orders items newest first. The sort is stable, so items sharing a key
/// (including every undated item) keep their API order.
pub fn sort_newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
}
