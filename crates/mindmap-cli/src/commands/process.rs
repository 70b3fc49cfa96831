//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::provider::Provider;
use mindmap_domain::Source;
use mindmap_pipeline::{JsonFileSink, Pipeline, PipelineRun};
use tracing::info;

/// Execute the process command.
pub async fn execute_process(args: ProcessArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let run = run_pipeline(&args, config).await?;
    let analysis = run.analysis()?;

    println!("{}", formatter.format_analysis(&analysis, &run.metadata)?);

    if analysis.topics.is_empty() {
        eprintln!("{}", formatter.warning("No topics were extracted"));
    }
    if let Some(path) = &args.output {
        eprintln!("{}", formatter.success(&format!("Analysis written to {}", path.display())));
    }

    Ok(())
}

/// Build the provider and pipeline from configuration plus flags, then run.
pub async fn run_pipeline(args: &ProcessArgs, config: &Config) -> Result<PipelineRun> {
    if !args.file.is_file() {
        return Err(CliError::InvalidInput(format!(
            "{} is not a readable file",
            args.file.display()
        )));
    }

    let mut provider_config = config.provider.clone();
    if let Some(kind) = args.provider {
        provider_config.kind = kind.into();
    }
    if let Some(model) = &args.model {
        provider_config.model = model.clone();
    }

    let mut pipeline_config = config.pipeline.clone();
    if let Some(mode) = args.mode {
        pipeline_config.topic_mode = mode.into();
    }
    if let Some(max) = args.max_clean_iterations {
        pipeline_config.max_clean_iterations = max;
    }

    let provider = Provider::from_config(&provider_config)?;
    let model_name = provider.model_name();
    let pipeline = Pipeline::new(provider, pipeline_config)?.with_model_name(model_name);

    info!(file = %args.file.display(), "processing transcript");
    let source = Source::from_path(&args.file);

    let run = match &args.output {
        Some(path) => {
            let mut sink = JsonFileSink::new(path);
            pipeline.run_and_persist(source, &mut sink).await?
        }
        None => pipeline.run(source).await?,
    };
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ProviderArg;
    use crate::config::ProviderKind;
    use std::fs;
    use tempfile::TempDir;

    fn args(file: std::path::PathBuf) -> ProcessArgs {
        ProcessArgs {
            file,
            mode: None,
            max_clean_iterations: None,
            output: None,
            provider: Some(ProviderArg::Mock),
            model: None,
            format: None,
        }
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        let dir = TempDir::new().unwrap();
        let result = run_pipeline(&args(dir.path().join("absent.txt")), &Config::default()).await;
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_mock_run_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("meeting.txt");
        fs::write(&input, "alice: um so the budget\nbob: yeah").unwrap();
        let output = dir.path().join("out").join("analysis.json");

        let mut process_args = args(input);
        process_args.output = Some(output.clone());

        let run = run_pipeline(&process_args, &Config::default()).await.unwrap();
        assert_eq!(run.metadata.model_name, "mock");
        assert_eq!(run.metadata.clean_iterations, 1);

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["transcript"], "The meeting transcript.");
        assert_eq!(written["topics"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_flags_override_config() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("meeting.txt");
        fs::write(&input, "carol: hello").unwrap();

        let mut config = Config::default();
        config.provider.kind = ProviderKind::Ollama;
        let mut process_args = args(input);
        process_args.mode = Some(crate::cli::ModeArg::Whole);

        let run = run_pipeline(&process_args, &config).await.unwrap();
        assert_eq!(run.metadata.topic_mode, mindmap_pipeline::TopicMode::WholeDocument);
    }

    #[tokio::test]
    async fn test_zero_iterations_is_config_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("meeting.txt");
        fs::write(&input, "carol: hello").unwrap();

        let mut process_args = args(input);
        process_args.max_clean_iterations = Some(0);

        let result = run_pipeline(&process_args, &Config::default()).await;
        assert!(matches!(result, Err(CliError::Pipeline(_))));
    }
}
