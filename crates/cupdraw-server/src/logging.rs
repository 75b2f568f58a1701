// Tracing setup: one log file per run under `logs/`.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "cupdraw_server=info,cupdraw_app=info,cupdraw_core=info,warn";

pub const LOG_FILE: &str = "cupdraw.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Create `log_dir` if needed and truncate the log file inside it.
fn open_log_file(log_dir: &Path) -> anyhow::Result<(File, PathBuf)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let path = log_dir.join(LOG_FILE);
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    Ok((file, path))
}

/// Install the global subscriber, writing plain-text events to
/// `log_dir/cupdraw.log`. Returns the log file path.
pub fn init(log_dir: &Path) -> anyhow::Result<PathBuf> {
    let (file, path) = open_log_file(log_dir)?;

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init()
        .context("failed to set tracing subscriber")?;

    Ok(path)
}
