use serde::{Deserialize, Serialize};

/// A GitHub repository scanned for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
    /// Only issues carrying this label are fetched when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

const DEFAULT_SOURCES: &[(&str, &str)] = &[
    ("backend-br", "vagas"),
    ("frontendbr", "vagas"),
    ("react-brasil", "vagas"),
    ("DevOps-Brasil", "Vagas"),
    ("programadores-br", "geral"),
    ("nodejsdevbr", "vagas"),
    ("dotnetdevbr", "vagas"),
    ("qa-brasil", "vagas"),
    ("soujava", "vagas-java"),
    ("datascience-br", "vagas"),
    ("remotejobsbr", "design-ux-vagas"),
    ("brasil-php", "vagas"),
];

/// The built-in list of community job boards, in display order.
pub fn default_repositories() -> Vec<Repository> {
    DEFAULT_SOURCES
        .iter()
        .map(|(owner, name)| Repository::new(*owner, *name))
        .collect()
}
