//! Shell namespace abstraction for testability
//!
//! The locator, walker and copy filter only ever talk to a [`ShellFolder`].
//! The Windows implementation wraps `IShellFolder`; the mock implementation in
//! `testdb` holds an in-memory tree so the whole pipeline runs without a device.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use phone_photo_copier::shell::{DisplayStyle, EntryKind, ShellFolder};
//!
//! fn print_folders<F: ShellFolder>(folder: &F) -> phone_photo_copier::core::error::Result<()> {
//!     for entry in folder.list_entries(EntryKind::Folder)? {
//!         println!("{}", folder.display_name(&entry, DisplayStyle::Normal)?);
//!     }
//!     Ok(())
//! }
//! ```

use crate::core::error::Result;
use std::fmt::{self, Display};
use std::io::Read;

/// Which children to enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Only folder-type children
    Folder,
    /// Only non-folder children (files)
    NonFolder,
    /// Folders and files alike
    Any,
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Folder => write!(f, "folders"),
            EntryKind::NonFolder => write!(f, "files"),
            EntryKind::Any => write!(f, "entries"),
        }
    }
}

/// How an entry's display name is formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStyle {
    /// Plain name as shown in a folder view (e.g. "DCIM")
    Normal,
    /// Full path as shown in the address bar
    /// (e.g. "This PC\Apple iPhone\Internal Storage\DCIM\100APPLE\IMG_0001.JPG")
    ForAddressBar,
}

/// A folder in the shell namespace
///
/// Entries are opaque and only meaningful together with the folder that
/// listed them.
pub trait ShellFolder: Sized {
    /// Opaque reference to one child of this folder
    type Entry;

    /// Readable stream bound to a file entry; dropping it releases the handle
    type Stream: Read;

    /// Enumerate children of the given kind, in namespace order
    fn list_entries(&self, kind: EntryKind) -> Result<Vec<Self::Entry>>;

    /// First child of the given kind, if any
    fn first_entry(&self, kind: EntryKind) -> Result<Option<Self::Entry>> {
        Ok(self.list_entries(kind)?.into_iter().next())
    }

    /// Resolve an entry to its display name
    fn display_name(&self, entry: &Self::Entry, style: DisplayStyle) -> Result<String>;

    /// Bind an entry as a sub-folder
    fn bind_folder(&self, entry: &Self::Entry) -> Result<Self>;

    /// Bind an entry as a readable stream
    fn bind_stream(&self, entry: &Self::Entry) -> Result<Self::Stream>;
}
