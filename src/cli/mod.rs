//! CLI module for the photo copier
//!
//! # Submodules
//!
//! - `args` - Command-line argument definitions using clap
//! - `commands` - Applying arguments to the configuration and running the copy
//! - `progress` - CLI output utilities

pub mod args;
pub mod commands;
pub mod progress;

// Re-export commonly used types for convenience
pub use args::Args;
pub use commands::{apply_args, log_level, run_command};
pub use progress::DualWriter;
