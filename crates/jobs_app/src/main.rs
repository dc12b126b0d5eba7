use clap::Parser;
use jobs_app::{run_app, AppConfig, Cli};
use jobs_logging::LogDestination;
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    jobs_logging::initialize(destination, level);

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    run_app(&cli, &config, &mut stdout.lock())
}
