//! Init command implementation.

use crate::cli::InitArgs;
use crate::config::SmokeConfig;
use crate::error::{CliError, Result};
use crate::ui;

/// Write an example `weather-smoke.toml`.
///
/// # Errors
///
/// Returns `InvalidArgument` if the file exists and `--force` was not given,
/// or an I/O error if it cannot be written.
pub async fn execute(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        )));
    }

    if let Some(parent) = args.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&args.path, SmokeConfig::example_toml()).await?;

    ui::success(&format!("Wrote {}", args.path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_example_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("weather-smoke.toml");

        execute(InitArgs {
            path: path.clone(),
            force: false,
        })
        .await
        .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("min_forecast_cards = 5"));

        let again = execute(InitArgs {
            path: path.clone(),
            force: false,
        })
        .await;
        assert!(matches!(again, Err(CliError::InvalidArgument(_))));

        execute(InitArgs { path, force: true }).await.unwrap();
    }
}
