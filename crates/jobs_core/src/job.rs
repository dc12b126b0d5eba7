use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A label attached to a job posting, with its GitHub colour (hex, no `#`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub color: String,
}

impl Label {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// One job posting, normalized from a GitHub issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    /// Repository owner login.
    pub company: String,
    /// `owner/name` of the source repository.
    pub repository: String,
    pub url: String,
    pub labels: Vec<Label>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }
}

/// Sorts jobs newest first. Ties keep their relative order.
pub fn sort_newest_first(jobs: &mut [Job]) {
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
