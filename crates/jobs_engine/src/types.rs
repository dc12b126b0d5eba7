use std::fmt;

use jobs_core::Job;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Network,
    /// The endpoint answered with a GraphQL `errors` array.
    GraphQl,
    /// The body was not the expected JSON shape.
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::GraphQl => write!(f, "graphql error"),
            FailureKind::Decode => write!(f, "unexpected response"),
        }
    }
}

/// A repository whose issues could not be fetched during a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFailure {
    /// `owner/name` as configured.
    pub repository: String,
    pub error: FetchError,
}

/// Result of one refresh over the whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchReport {
    /// Jobs from every repository that answered, newest first.
    pub jobs: Vec<Job>,
    pub failures: Vec<RepositoryFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RepositoryFailed(RepositoryFailure),
    JobsFetched { jobs: Vec<Job> },
    /// The background runtime could not start; no refresh will complete.
    Unavailable { message: String },
}
