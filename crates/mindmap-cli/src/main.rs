//! MindMap CLI - Turn meeting transcripts into participants and linked topics.

use clap::Parser;
use mindmap_cli::commands;
use mindmap_cli::config::OutputFormat;
use mindmap_cli::{Cli, Command, Config, Formatter};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout carries only the analysis
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> mindmap_cli::Result<()> {
    match cli.command {
        Command::InitConfig(args) => {
            let formatter = Formatter::new(OutputFormat::Summary, !cli.no_color);
            commands::execute_init_config(args, cli.config.as_deref(), &formatter)
        }
        Command::Process(args) => {
            let config = Config::load(cli.config.as_deref())?;

            // Determine output format
            let format = args
                .format
                .map(Into::into)
                .unwrap_or(config.settings.format);

            // Determine color setting
            let color_enabled = !cli.no_color && config.settings.color;

            let formatter = Formatter::new(format, color_enabled);
            commands::execute_process(args, &config, &formatter).await
        }
    }
}
