// harmonia/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `plan --format json` stays pipeable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { project_dir, limit } => commands::run::execute(project_dir, limit).await,
        Commands::Plan {
            project_dir,
            format,
        } => commands::plan::execute(project_dir, format).await,
    }
}
