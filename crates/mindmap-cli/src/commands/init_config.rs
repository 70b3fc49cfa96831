//! Init-config command implementation.

use crate::cli::InitConfigArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the init-config command.
pub fn execute_init_config(args: InitConfigArgs, path: Option<&Path>, formatter: &Formatter) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::path()?,
    };
    write_default(&path, args.force)?;
    println!("{}", formatter.success(&format!("Wrote default configuration to {}", path.display())));
    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        write_default(&path, false).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.provider.model, "llama3.1");
        assert_eq!(config.pipeline.chunk_size, 1500);
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "# mine").unwrap();

        assert!(matches!(write_default(&path, false), Err(CliError::InvalidInput(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        write_default(&path, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[provider]"));
    }
}
