//! Chunked reading of remote file content
//!
//! Files on the device are read through a stream bound from their folder.
//! [`ChunkReader`] turns such a stream into a finite iterator of byte chunks,
//! each at most `buffer_size` long. The underlying stream is owned by the
//! reader, so it is released as soon as the reader is dropped, whether the
//! sequence was fully consumed or abandoned early.

use crate::core::error::{PhotoCopyError, Result};
use crate::shell::traits::ShellFolder;
use log::trace;
use std::io::{ErrorKind, Read};

/// Default read buffer size in bytes
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Iterator over the content of a stream in bounded chunks
pub struct ChunkReader<R> {
    reader: R,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: Read> ChunkReader<R> {
    /// Wrap a reader; a zero buffer size falls back to [`DEFAULT_BUFFER_SIZE`]
    pub fn new(reader: R, buffer_size: usize) -> Self {
        let size = if buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            buffer_size
        };

        Self {
            reader,
            buffer: vec![0u8; size],
            finished: false,
        }
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(n) => {
                    trace!("Read chunk of {} bytes", n);
                    return Some(Ok(self.buffer[..n].to_vec()));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(PhotoCopyError::IoError(format!(
                        "Failed to read from device stream: {}",
                        e
                    ))));
                }
            }
        }
    }
}

/// Open a fresh stream for `entry` and return its content as chunks
pub fn stream_file_content<F: ShellFolder>(
    folder: &F,
    entry: &F::Entry,
    buffer_size: usize,
) -> Result<ChunkReader<F::Stream>> {
    let stream = folder.bind_stream(entry)?;
    Ok(ChunkReader::new(stream, buffer_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdb::mock_shell::{MockFolder, MockNode};
    use std::io::{self, Cursor};

    /// Reader that fails after handing out its first chunk
    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(ErrorKind::BrokenPipe, "device gone"));
            }
            self.served = true;
            buf[0] = 0xFF;
            Ok(1)
        }
    }

    /// Reader that reports an interruption before every successful read
    struct InterruptingReader {
        inner: Cursor<Vec<u8>>,
        interrupt_next: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(io::Error::new(ErrorKind::Interrupted, "try again"));
            }
            self.interrupt_next = true;
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_chunks_are_bounded_and_complete() {
        let content: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let chunks: Vec<Vec<u8>> = ChunkReader::new(Cursor::new(content.clone()), 8192)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= 8192));
        assert_eq!(chunks.concat(), content);
    }

    #[test]
    fn test_empty_stream_yields_nothing() {
        let mut reader = ChunkReader::new(Cursor::new(Vec::new()), 16);
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_zero_buffer_size_uses_default() {
        let mut reader = ChunkReader::new(Cursor::new(vec![5u8; 10_000]), 0);
        assert_eq!(reader.next().unwrap().unwrap().len(), DEFAULT_BUFFER_SIZE);
        assert_eq!(reader.next().unwrap().unwrap().len(), 10_000 - DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_read_error_ends_sequence() {
        let mut reader = ChunkReader::new(FailingReader { served: false }, 4);
        assert_eq!(reader.next().unwrap().unwrap(), vec![0xFF]);
        assert!(matches!(reader.next(), Some(Err(PhotoCopyError::IoError(_)))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let reader = InterruptingReader {
            inner: Cursor::new(b"abcdef".to_vec()),
            interrupt_next: true,
        };
        let data: Vec<u8> = ChunkReader::new(reader, 4)
            .collect::<Result<Vec<_>>>()
            .unwrap()
            .concat();
        assert_eq!(data, b"abcdef");
    }

    #[test]
    fn test_stream_released_after_full_read_and_early_drop() {
        let root = MockFolder::root(MockNode::folder(
            "100APPLE",
            vec![MockNode::file("IMG_0001.JPG", vec![7u8; 100])],
        ));
        let entry = root.first_entry(crate::shell::EntryKind::NonFolder).unwrap().unwrap();

        let data: Vec<u8> = stream_file_content(&root, &entry, 30)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
            .concat();
        assert_eq!(data, vec![7u8; 100]);
        assert_eq!(root.open_streams(), 0);

        let mut partial = stream_file_content(&root, &entry, 30).unwrap();
        assert_eq!(root.open_streams(), 1);
        assert_eq!(partial.next().unwrap().unwrap().len(), 30);
        drop(partial);
        assert_eq!(root.open_streams(), 0);
        assert_eq!(root.streams_opened(), 2);
    }
}
