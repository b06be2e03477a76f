//! Core functionality module
//!
//! This module contains the business logic of the photo copier: configuration,
//! error handling, locating phones in the shell namespace, and copying photos.
//!
//! # Submodules
//!
//! - `config` - Configuration loading and defaults
//! - `copier` - DCIM folder walk and the copy filter
//! - `error` - Error types and result aliases
//! - `locator` - Finding the computer folder and a phone's DCIM folder

pub mod config;
pub mod copier;
pub mod error;
pub mod locator;
