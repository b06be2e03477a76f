//! Mock shell namespace for testing without a real device
//!
//! An in-memory tree of folders and files implementing [`ShellFolder`].
//! Folders can be marked inaccessible and files can be set to fail part way
//! through a read, mirroring what a locked or disconnected phone does.

use crate::core::error::{PhotoCopyError, Result};
use crate::shell::traits::{DisplayStyle, EntryKind, ShellFolder};
use std::cell::Cell;
use std::io::{self, Cursor, Read};
use std::rc::Rc;

/// Content of a node in the mock namespace
#[derive(Debug, Clone)]
pub enum MockContent {
    /// Folder with its children in enumeration order
    Folder(Vec<Rc<MockNode>>),
    /// File with its bytes
    File(Vec<u8>),
}

/// A file or folder in the mock namespace
#[derive(Debug, Clone)]
pub struct MockNode {
    /// Display name (normal style)
    pub name: String,
    /// Folder children or file bytes
    pub content: MockContent,
    /// Binding this node fails with a namespace error
    pub inaccessible: bool,
    /// Reads fail once this many bytes have been served
    pub fail_read_after: Option<usize>,
}

impl MockNode {
    /// Create a folder
    pub fn folder(name: &str, children: Vec<MockNode>) -> Self {
        Self {
            name: name.to_string(),
            content: MockContent::Folder(children.into_iter().map(Rc::new).collect()),
            inaccessible: false,
            fail_read_after: None,
        }
    }

    /// Create a file
    pub fn file(name: &str, content: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            content: MockContent::File(content),
            inaccessible: false,
            fail_read_after: None,
        }
    }

    /// Make binding this node fail
    pub fn inaccessible(mut self) -> Self {
        self.inaccessible = true;
        self
    }

    /// Make reads of this file fail after `bytes` bytes
    pub fn failing_read_after(mut self, bytes: usize) -> Self {
        self.fail_read_after = Some(bytes);
        self
    }

    /// Whether this node is a folder
    pub fn is_folder(&self) -> bool {
        matches!(self.content, MockContent::Folder(_))
    }

    fn children(&self) -> &[Rc<MockNode>] {
        match &self.content {
            MockContent::Folder(children) => children.as_slice(),
            MockContent::File(_) => &[],
        }
    }
}

/// Counters shared by every folder and stream bound from the same root
#[derive(Debug, Default)]
struct MockCounters {
    open_streams: Cell<usize>,
    streams_opened: Cell<usize>,
}

/// Entry reference into a [`MockFolder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockEntry {
    index: usize,
}

/// A bound folder in the mock namespace
#[derive(Debug, Clone)]
pub struct MockFolder {
    node: Rc<MockNode>,
    path: String,
    counters: Rc<MockCounters>,
}

impl MockFolder {
    /// Use `node` as the root of a namespace
    pub fn root(node: MockNode) -> Self {
        Self {
            path: node.name.clone(),
            node: Rc::new(node),
            counters: Rc::new(MockCounters::default()),
        }
    }

    /// Address-bar path of this folder
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Streams currently open anywhere in this namespace
    pub fn open_streams(&self) -> usize {
        self.counters.open_streams.get()
    }

    /// Streams opened so far anywhere in this namespace
    pub fn streams_opened(&self) -> usize {
        self.counters.streams_opened.get()
    }

    fn child(&self, entry: &MockEntry) -> Result<&Rc<MockNode>> {
        self.node.children().get(entry.index).ok_or_else(|| {
            PhotoCopyError::NamespaceError(format!(
                "Entry {} does not belong to '{}'",
                entry.index, self.path
            ))
        })
    }
}

impl ShellFolder for MockFolder {
    type Entry = MockEntry;
    type Stream = MockStream;

    fn list_entries(&self, kind: EntryKind) -> Result<Vec<MockEntry>> {
        Ok(self
            .node
            .children()
            .iter()
            .enumerate()
            .filter(|(_, child)| match kind {
                EntryKind::Folder => child.is_folder(),
                EntryKind::NonFolder => !child.is_folder(),
                EntryKind::Any => true,
            })
            .map(|(index, _)| MockEntry { index })
            .collect())
    }

    fn display_name(&self, entry: &MockEntry, style: DisplayStyle) -> Result<String> {
        let child = self.child(entry)?;
        Ok(match style {
            DisplayStyle::Normal => child.name.clone(),
            DisplayStyle::ForAddressBar => format!("{}\\{}", self.path, child.name),
        })
    }

    fn bind_folder(&self, entry: &MockEntry) -> Result<MockFolder> {
        let child = self.child(entry)?;
        if !child.is_folder() {
            return Err(PhotoCopyError::NamespaceError(format!(
                "'{}' is not a folder",
                child.name
            )));
        }
        if child.inaccessible {
            return Err(PhotoCopyError::NamespaceError(format!(
                "Access denied to '{}'",
                child.name
            )));
        }

        Ok(MockFolder {
            node: Rc::clone(child),
            path: format!("{}\\{}", self.path, child.name),
            counters: Rc::clone(&self.counters),
        })
    }

    fn bind_stream(&self, entry: &MockEntry) -> Result<MockStream> {
        let child = self.child(entry)?;
        let data = match &child.content {
            MockContent::File(data) if !child.inaccessible => data.clone(),
            MockContent::File(_) => {
                return Err(PhotoCopyError::NamespaceError(format!(
                    "Access denied to '{}'",
                    child.name
                )))
            }
            MockContent::Folder(_) => {
                return Err(PhotoCopyError::NamespaceError(format!(
                    "'{}' is a folder, not a stream",
                    child.name
                )))
            }
        };

        self.counters
            .open_streams
            .set(self.counters.open_streams.get() + 1);
        self.counters
            .streams_opened
            .set(self.counters.streams_opened.get() + 1);

        Ok(MockStream {
            cursor: Cursor::new(data),
            fail_after: child.fail_read_after,
            counters: Rc::clone(&self.counters),
        })
    }
}

/// Readable stream over a mock file
pub struct MockStream {
    cursor: Cursor<Vec<u8>>,
    fail_after: Option<usize>,
    counters: Rc<MockCounters>,
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(limit) = self.fail_after else {
            return self.cursor.read(buf);
        };

        let position = self.cursor.position() as usize;
        if position >= limit {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionAborted,
                "Simulated device disconnect",
            ));
        }

        let allowed = buf.len().min(limit - position);
        self.cursor.read(&mut buf[..allowed])
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.counters
            .open_streams
            .set(self.counters.open_streams.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> MockFolder {
        MockFolder::root(MockNode::folder(
            "This PC",
            vec![
                MockNode::folder("Apple iPhone", vec![]),
                MockNode::file("readme.txt", b"hello".to_vec()),
                MockNode::folder("Locked", vec![]).inaccessible(),
            ],
        ))
    }

    #[test]
    fn test_list_entries_by_kind() {
        let root = sample_tree();
        assert_eq!(root.list_entries(EntryKind::Folder).unwrap().len(), 2);
        assert_eq!(root.list_entries(EntryKind::NonFolder).unwrap().len(), 1);
        assert_eq!(root.list_entries(EntryKind::Any).unwrap().len(), 3);
    }

    #[test]
    fn test_display_names() {
        let root = sample_tree();
        let file = root.first_entry(EntryKind::NonFolder).unwrap().unwrap();
        assert_eq!(
            root.display_name(&file, DisplayStyle::Normal).unwrap(),
            "readme.txt"
        );
        assert_eq!(
            root.display_name(&file, DisplayStyle::ForAddressBar).unwrap(),
            "This PC\\readme.txt"
        );
    }

    #[test]
    fn test_bind_errors() {
        let root = sample_tree();
        let folders = root.list_entries(EntryKind::Folder).unwrap();
        let file = root.first_entry(EntryKind::NonFolder).unwrap().unwrap();

        let phone = root.bind_folder(&folders[0]).unwrap();
        assert_eq!(phone.path(), "This PC\\Apple iPhone");
        assert!(root.bind_folder(&folders[1]).is_err());
        assert!(root.bind_folder(&file).is_err());
        assert!(root.bind_stream(&folders[0]).is_err());
    }

    #[test]
    fn test_failing_stream_serves_prefix_then_errors() {
        let root = MockFolder::root(MockNode::folder(
            "100APPLE",
            vec![MockNode::file("IMG_0001.JPG", vec![1u8; 10]).failing_read_after(4)],
        ));
        let entry = root.first_entry(EntryKind::NonFolder).unwrap().unwrap();
        let mut stream = root.bind_stream(&entry).unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(stream.read(&mut buf).unwrap(), 4);
        assert!(stream.read(&mut buf).is_err());
        assert_eq!(root.open_streams(), 1);
        drop(stream);
        assert_eq!(root.open_streams(), 0);
    }
}
