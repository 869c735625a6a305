//! SudoEdit - Minimal terminal text editor.
//!
//! Usage: sudo-edit [FILE]

use anyhow::{Context, Result};
use std::env;
use std::fs::File;
use std::path::PathBuf;
use sudo_edit_ui::{run, EditorApp};

/// Log file name, created in the system temp directory. The terminal is in
/// raw alternate-screen mode while editing, so logs cannot go to stderr.
const LOG_FILE_NAME: &str = "sudo-edit.log";

fn init_logging() -> Result<PathBuf> {
    let path = env::temp_dir().join(LOG_FILE_NAME);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(path)
}

fn main() -> Result<()> {
    let log_path = init_logging()?;

    log::info!("Starting SudoEdit (logging to {})", log_path.display());

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let file_path = args.get(1).cloned();

    let mut app = EditorApp::new();

    if let Some(path) = file_path {
        log::info!("Opening file: {}", path);
        app.open_file(&path)
            .with_context(|| format!("Failed to open file '{}'", path))?;
    }

    run(app).context("Terminal session failed")?;

    log::info!("SudoEdit exited");
    Ok(())
}
