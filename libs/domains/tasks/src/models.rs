use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Rejects titles that are empty or only whitespace.
fn validate_title(title: &str) -> Result<(), validator::ValidationError> {
    if title.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("title must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Human-readable completion state, as printed by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum CompletionStatus {
    Completed,
    Incomplete,
}

/// Task domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn status(&self) -> CompletionStatus {
        if self.is_completed {
            CompletionStatus::Completed
        } else {
            CompletionStatus::Incomplete
        }
    }

    /// Sets `is_completed` and advances `updated_at`.
    ///
    /// Applies again on an already completed task. `updated_at` never moves
    /// backwards, even if the wall clock does.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.is_completed = true;
        self.updated_at = now.max(self.updated_at);
    }
}

/// DTO for creating a new task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl CreateTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}
