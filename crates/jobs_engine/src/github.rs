use std::time::Duration;

use chrono::{DateTime, Utc};
use jobs_core::{Job, Label, Repository};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::{FailureKind, FetchError};

pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

const ISSUES_QUERY: &str = r#"
query GetIssues($owner: String!, $name: String!, $labels: [String!], $first: Int!, $labelsFirst: Int!) {
  repository(owner: $owner, name: $name) {
    issues(first: $first, states: OPEN, labels: $labels, orderBy: {field: CREATED_AT, direction: DESC}) {
      nodes {
        id
        title
        url
        createdAt
        repository {
          owner {
            login
          }
          name
        }
        labels(first: $labelsFirst) {
          nodes {
            name
            color
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    /// Bearer token; GitHub's GraphQL API rejects anonymous requests.
    pub token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Open issues fetched per repository, newest first.
    pub issues_per_repo: u32,
    pub labels_per_issue: u32,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: GITHUB_GRAPHQL_ENDPOINT.to_string(),
            token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            issues_per_repo: 20,
            labels_per_issue: 10,
            user_agent: concat!("jobs-board/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchSettings {
    /// Defaults with the token taken from `GITHUB_TOKEN`.
    pub fn from_env() -> Self {
        Self {
            token: std::env::var("GITHUB_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            ..Self::default()
        }
    }
}

/// Source of open job issues for a single repository.
#[async_trait::async_trait]
pub trait IssueSource: Send + Sync {
    async fn fetch_repository(&self, repository: &Repository) -> Result<Vec<Job>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct GithubIssueSource {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl GithubIssueSource {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        reqwest::Url::parse(&settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidEndpoint, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl IssueSource for GithubIssueSource {
    async fn fetch_repository(&self, repository: &Repository) -> Result<Vec<Job>, FetchError> {
        let request = GraphQlRequest {
            query: ISSUES_QUERY,
            variables: IssueVariables {
                owner: &repository.owner,
                name: &repository.name,
                labels: repository.label.as_deref().map(|label| vec![label]),
                first: self.settings.issues_per_repo,
                labels_first: self.settings.labels_per_issue,
            },
        };
        let body = serde_json::to_vec(&request)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

        let mut builder = self
            .client
            .post(&self.settings.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.settings.user_agent)
            .body(body);
        if let Some(token) = &self.settings.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed: GraphQlResponse = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

        if let Some(first) = parsed.errors.first() {
            return Err(FetchError::new(FailureKind::GraphQl, first.message.clone()));
        }

        let nodes = parsed
            .data
            .and_then(|data| data.repository)
            .map(|repo| repo.issues.nodes)
            .unwrap_or_default();
        Ok(nodes.into_iter().map(IssueNode::into_job).collect())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: IssueVariables<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IssueVariables<'a> {
    owner: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<&'a str>>,
    first: u32,
    labels_first: u32,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct ResponseData {
    repository: Option<RepositoryNode>,
}

#[derive(Deserialize)]
struct RepositoryNode {
    issues: Connection<IssueNode>,
}

#[derive(Deserialize)]
struct Connection<T> {
    nodes: Vec<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    id: String,
    title: String,
    url: String,
    created_at: DateTime<Utc>,
    repository: IssueRepository,
    labels: Connection<LabelNode>,
}

#[derive(Deserialize)]
struct IssueRepository {
    owner: Owner,
    name: String,
}

#[derive(Deserialize)]
struct Owner {
    login: String,
}

#[derive(Deserialize)]
struct LabelNode {
    name: String,
    color: String,
}

impl IssueNode {
    fn into_job(self) -> Job {
        let owner = self.repository.owner.login;
        Job {
            id: self.id,
            title: self.title,
            repository: format!("{}/{}", owner, self.repository.name),
            company: owner,
            url: self.url,
            labels: self
                .labels
                .nodes
                .into_iter()
                .map(|label| Label::new(label.name, label.color))
                .collect(),
            created_at: self.created_at,
        }
    }
}
