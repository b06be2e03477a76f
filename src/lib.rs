//! Phone Photo Copier Library
//!
//! Copies new photos from a connected iPhone to a local directory. The phone
//! is found through the Windows shell namespace: below the computer folder,
//! a device whose first folder is `Internal Storage` and whose first folder
//! in turn is `DCIM`. Every folder inside `DCIM` is walked and each `.JPG`
//! not yet present in the target directory is copied.
//!
//! # Architecture
//!
//! - [`shell`] - The shell folder abstraction and its Windows implementation
//! - [`core`] - Configuration, error handling, device location and copying
//! - [`cli`] - Command-line interface (only used by the binary)
//! - [`testdb`] - An in-memory shell namespace with ready-made layouts for testing
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use phone_photo_copier::core::config::Config;
//! use phone_photo_copier::core::copier::Copier;
//! use phone_photo_copier::testdb::scenarios;
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let desktop = scenarios::single_iphone();
//!
//!     let mut copier = Copier::new(config.copy_options(PathBuf::from("D:/Photos")));
//!     let stats = copier.run(&desktop, &config.locator_options())?;
//!     println!("{}", stats);
//!     Ok(())
//! }
//! ```
//!
//! # Platform Support
//!
//! Only Windows has a shell namespace to copy from. On other platforms the
//! library builds and its logic can be exercised against [`testdb`], but the
//! binary reports an unsupported platform.

pub mod cli;
pub mod core;
pub mod shell;
pub mod testdb;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
