use serde::{Deserialize, Serialize};

// A task as the server knows it. An id of 0 means the server has not assigned one yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

impl Task {
    // A new task waiting to be created; the server replaces the id
    pub fn pending(title: impl Into<String>) -> Task {
        Task {
            id: 0,
            title: title.into(),
            completed: false,
        }
    }
}

// Partial update payload. Fields left as None are not sent at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> TaskPatch {
        TaskPatch {
            completed: Some(completed),
            ..TaskPatch::default()
        }
    }
}
