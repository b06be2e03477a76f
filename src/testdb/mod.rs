//! Test Database Module
//!
//! An in-memory shell namespace for testing the copier without connecting a
//! phone to the PC.
//!
//! - **Mock shell**: folders and files implementing `ShellFolder`, with
//!   inaccessible folders and failing reads
//! - **Scenarios**: desktop layouts with phones and ordinary drives
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use phone_photo_copier::core::copier::{Copier, CopyOptions};
//! use phone_photo_copier::core::locator::LocatorOptions;
//! use phone_photo_copier::testdb::scenarios;
//!
//! let desktop = scenarios::single_iphone();
//! let stats = Copier::new(CopyOptions::new("./copied"))
//!     .run(&desktop, &LocatorOptions::default())
//!     .unwrap();
//! println!("{}", stats);
//! ```

pub mod mock_shell;
pub mod scenarios;

pub use mock_shell::{MockContent, MockEntry, MockFolder, MockNode, MockStream};
