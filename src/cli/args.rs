//! Command-line argument definitions
//!
//! This module defines the CLI flags using clap.

use clap::Parser;
use std::path::PathBuf;

/// Copy new photos from a connected iPhone to a local directory
#[derive(Parser, Debug)]
#[command(name = "phone-photo-copier")]
#[command(version)]
#[command(about = "Copy photos that haven't been copied yet from a connected iPhone", long_about = None)]
pub struct Args {
    /// Log what is being copied (info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Replace photos that already exist in the target directory
    #[arg(short, long)]
    pub overwrite: bool,

    /// Directory to copy photos to (defaults to the directory of this program)
    #[arg(short, long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show a progress spinner while copying
    #[arg(long)]
    pub progress: bool,

    /// Also write log lines to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["phone-photo-copier"]).unwrap();
        assert!(!args.verbose);
        assert!(!args.overwrite);
        assert!(args.target.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from(["phone-photo-copier", "-v", "-o"]).unwrap();
        assert!(args.verbose);
        assert!(args.overwrite);
    }

    #[test]
    fn test_target_and_config() {
        let args = Args::try_parse_from([
            "phone-photo-copier",
            "--target",
            "D:/Photos",
            "--config",
            "copier.toml",
            "--progress",
        ])
        .unwrap();
        assert_eq!(args.target, Some(PathBuf::from("D:/Photos")));
        assert_eq!(args.config, Some(PathBuf::from("copier.toml")));
        assert!(args.progress);
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(Args::try_parse_from(["phone-photo-copier", "photos"]).is_err());
    }
}
