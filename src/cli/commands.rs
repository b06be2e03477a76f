//! Command handler implementations

use crate::cli::Args;
use crate::core::config::Config;
use crate::core::copier::{Copier, CopyStats};
use crate::core::error::PhotoCopyError;
use anyhow::{Context, Result};
use log::{debug, info, LevelFilter};
use std::fs;
use std::path::PathBuf;

/// Apply command-line flags on top of the loaded configuration
pub fn apply_args(args: &Args, config: &mut Config) {
    if args.overwrite {
        config.copy.overwrite = true;
    }
    if let Some(ref target) = args.target {
        config.copy.target_directory = target.clone();
    }
    if args.verbose && log_level(&config.logging.level) < LevelFilter::Info {
        config.logging.level = "info".to_string();
    }
    if let Some(ref log_file) = args.log_file {
        config.logging.log_to_file = true;
        config.logging.log_file = log_file.clone();
    }
}

/// Map a configured level name to a filter; unknown names fall back to error
pub fn log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Error,
    }
}

/// Directory photos are copied to: configured, or the program's own directory
pub fn resolve_target_directory(config: &Config) -> Result<PathBuf> {
    if !config.copy.target_directory.as_os_str().is_empty() {
        return Ok(config.copy.target_directory.clone());
    }

    let exe = std::env::current_exe().context("Failed to locate the running program")?;
    let dir = exe
        .parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| PhotoCopyError::IoError(format!("'{}' has no parent directory", exe.display())))?;
    Ok(dir)
}

/// Copy new photos from every connected phone
pub fn run_command(args: &Args, config: &Config) -> Result<()> {
    let target_directory = resolve_target_directory(config)?;

    fs::create_dir_all(&target_directory).with_context(|| {
        format!(
            "Failed to create target directory '{}'",
            target_directory.display()
        )
    })?;
    debug!("Target directory: {}", target_directory.display());

    let copier = Copier::new(config.copy_options(target_directory)).with_progress(args.progress);
    let stats = copy_from_shell(copier, config)?;

    info!(
        "{} new photos copied",
        stats.files_copied + stats.files_overwritten
    );
    Ok(())
}

#[cfg(windows)]
fn copy_from_shell(mut copier: Copier, config: &Config) -> Result<CopyStats> {
    use crate::shell::{ShellSession, WindowsFolder};

    // Folders must be released before the session is closed
    let _session = ShellSession::open()?;
    let desktop = WindowsFolder::desktop()?;
    let stats = copier.run(&desktop, &config.locator_options())?;
    drop(desktop);

    Ok(stats)
}

#[cfg(not(windows))]
fn copy_from_shell(_copier: Copier, _config: &Config) -> Result<CopyStats> {
    Err(PhotoCopyError::UnsupportedPlatform.into())
}
