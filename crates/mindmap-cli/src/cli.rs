//! CLI command definitions and argument parsing.

use crate::config::{OutputFormat, ProviderKind};
use clap::{Parser, Subcommand};
use mindmap_pipeline::TopicMode;
use std::path::PathBuf;

/// MindMap CLI - Turn meeting transcripts into participants and linked topics.
#[derive(Debug, Parser)]
#[command(name = "mindmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.mindmap/config.toml)
    #[arg(short, long, global = true, env = "MINDMAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable summary with a topic table
    Summary,
    /// The analysis artifact as JSON
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clean, grade and analyze one transcript file
    Process(ProcessArgs),

    /// Write a default configuration file
    InitConfig(InitConfigArgs),
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Transcript file (.txt, .md, .vtt, .srt, .docx, ...)
    pub file: PathBuf,

    /// Topic extraction mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Maximum number of clean passes before giving up
    #[arg(long)]
    pub max_clean_iterations: Option<u32>,

    /// Also write the analysis as JSON to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the configured provider
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Override the configured model
    #[arg(long)]
    pub model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,
}

/// Arguments for the init-config command.
#[derive(Debug, Parser)]
pub struct InitConfigArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Topic mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// One call per chunk, merged in chunk order
    Chunked,
    /// One call over the whole cleaned transcript
    Whole,
}

/// Provider argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderArg {
    /// Local Ollama server
    Ollama,
    /// OpenAI-compatible API
    Openai,
    /// Offline scripted provider
    Mock,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Summary => OutputFormat::Summary,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

impl From<ModeArg> for TopicMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Chunked => TopicMode::Chunked,
            ModeArg::Whole => TopicMode::WholeDocument,
        }
    }
}

impl From<ProviderArg> for ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Ollama => ProviderKind::Ollama,
            ProviderArg::Openai => ProviderKind::OpenAi,
            ProviderArg::Mock => ProviderKind::Mock,
        }
    }
}
