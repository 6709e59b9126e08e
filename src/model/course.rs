// File: ./src/model/course.rs
use serde_json::Value;

/// A tracked course as shown in the group headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub name: String,
}

impl Course {
    /// Placeholder used whenever the course metadata cannot be fetched.
    pub fn fallback(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Course {}", id),
        }
    }

    /// Builds a course from the `/courses/:id` payload, keeping the
    /// placeholder name when `name` is absent.
    pub fn from_json(id: &str, value: &Value) -> Self {
        match value.get("name").and_then(Value::as_str) {
            Some(name) => Self {
                id: id.to_string(),
                name: name.to_string(),
            },
            None => Self::fallback(id),
        }
    }
}
