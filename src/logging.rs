use color_eyre::Result;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Filter used when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "swagger_shell=info";

/// Default log file; stdout belongs to the terminal UI
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("swagger-shell.log")
}

/// Install the global tracing subscriber, appending to `path`
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("failed to install logger: {e}"))?;

    Ok(())
}
