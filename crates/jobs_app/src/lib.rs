//! Job board command-line shell: configuration, effect execution and text
//! rendering around the pure core.
mod app;
mod cli;
mod config;
mod effects;
mod location;
mod render;
mod session;

pub use app::{run_app, run_with};
pub use cli::Cli;
pub use config::{AppConfig, ConfigError, FetchConfig};
pub use effects::EffectRunner;
pub use location::{query_from_link, PageLocation};
pub use render::{render, ColorMode};
pub use session::{load_jobs, JobsPolicy, Session};
