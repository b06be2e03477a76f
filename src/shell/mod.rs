//! Shell namespace access
//!
//! # Submodules
//!
//! - `traits` - The [`ShellFolder`] capability the copier is written against
//! - `stream` - Chunked reading of file content from a bound stream
//! - `windows` - `IShellFolder` implementation and COM session guard (Windows only)

pub mod stream;
pub mod traits;
#[cfg(windows)]
pub mod windows;

pub use stream::{stream_file_content, ChunkReader, DEFAULT_BUFFER_SIZE};
pub use traits::{DisplayStyle, EntryKind, ShellFolder};
#[cfg(windows)]
pub use windows::{ShellSession, WindowsFolder};
