use directories::ProjectDirs;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "readfast").map(|dirs| dirs.data_local_dir().join("readfast.log"))
}

/// Logs go to a file because the terminal UI owns stdout and stderr.
/// If the file cannot be opened, logging stays off.
pub fn init_tracing() {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_filter(env_filter),
        )
        .init();
    info!(path = %path.display(), "Logging initialized; override level with RUST_LOG");
}
