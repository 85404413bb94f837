use clap::Parser;
use formfill_app::cli::Cli;
use formfill_app::logging::{self, LogDestination};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let destination = match cli.log_file.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    logging::initialize(destination, logging::level_for_verbosity(cli.verbose));

    formfill_app::app::run(cli).await
}
