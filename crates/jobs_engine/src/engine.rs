use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use jobs_core::Repository;
use jobs_logging::jobs_error;

use crate::aggregate::fetch_jobs;
use crate::{EngineEvent, IssueSource};

enum EngineCommand {
    Refresh { registry: Vec<Repository> },
}

/// Runs fetches on a background thread with its own tokio runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn IssueSource>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    jobs_error!("Failed to start fetch runtime: {}", err);
                    let _ = event_tx.send(EngineEvent::Unavailable {
                        message: err.to_string(),
                    });
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(source.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Requests a refresh; results arrive as [`EngineEvent`]s.
    pub fn refresh(&self, registry: Vec<Repository>) {
        let _ = self.cmd_tx.send(EngineCommand::Refresh { registry });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    source: &dyn IssueSource,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Refresh { registry } => {
            let report = fetch_jobs(source, &registry).await;
            for failure in report.failures {
                let _ = event_tx.send(EngineEvent::RepositoryFailed(failure));
            }
            let _ = event_tx.send(EngineEvent::JobsFetched { jobs: report.jobs });
        }
    }
}
