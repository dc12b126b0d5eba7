use std::path::PathBuf;

use clap::Parser;
use jobs_core::Msg;

/// Browse job postings aggregated from GitHub issues.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "jobs", version)]
pub struct Cli {
    /// RON configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start from a shared link or its query string, e.g. "labels=remote&search=rust".
    /// Takes precedence over the saved filters.
    #[arg(long, value_name = "LINK")]
    pub query: Option<String>,

    /// Replace the search text.
    #[arg(long)]
    pub search: Option<String>,

    /// Select or deselect a label. Repeatable.
    #[arg(long = "toggle-label", value_name = "LABEL")]
    pub toggle_labels: Vec<String>,

    /// Hide or show a repository. Repeatable.
    #[arg(long = "toggle-repo", value_name = "OWNER/NAME")]
    pub toggle_repos: Vec<String>,

    /// Deselect every label.
    #[arg(long)]
    pub clear_labels: bool,

    /// Reset all filters before applying the other options.
    #[arg(long)]
    pub reset: bool,

    /// Fetch from GitHub even if the saved job list is still fresh.
    #[arg(long, conflicts_with = "offline")]
    pub refresh: bool,

    /// Never fetch; use the saved job list however old it is.
    #[arg(long)]
    pub offline: bool,

    /// Also write logs to this file (default ./jobs.log when no path is given).
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = jobs_logging::DEFAULT_LOG_FILE
    )]
    pub log_file: Option<PathBuf>,

    /// Debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Plain output without ANSI colours.
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Filter edits requested on the command line, in application order.
    pub fn messages(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        if self.reset {
            msgs.push(Msg::ResetFilters);
        }
        if self.clear_labels {
            msgs.push(Msg::ClearLabels);
        }
        if let Some(search) = &self.search {
            msgs.push(Msg::SetSearch(search.clone()));
        }
        msgs.extend(self.toggle_repos.iter().cloned().map(Msg::ToggleRepo));
        msgs.extend(self.toggle_labels.iter().cloned().map(Msg::ToggleLabel));
        msgs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_log_file_uses_the_default_path() {
        let cli = Cli::try_parse_from(["jobs", "--log-file"]).unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from(jobs_logging::DEFAULT_LOG_FILE)));

        let cli = Cli::try_parse_from(["jobs", "--log-file", "/tmp/other.log"]).unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/other.log")));

        let cli = Cli::try_parse_from(["jobs"]).unwrap();
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn edits_apply_reset_first_and_labels_last() {
        let cli = Cli::try_parse_from([
            "jobs",
            "--toggle-label",
            "go",
            "--search",
            "rust",
            "--reset",
        ])
        .unwrap();
        assert_eq!(
            cli.messages(),
            vec![
                Msg::ResetFilters,
                Msg::SetSearch("rust".to_string()),
                Msg::ToggleLabel("go".to_string()),
            ]
        );
    }
}
