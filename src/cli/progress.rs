//! CLI output utilities

use std::io::Write;

/// Writer that sends log lines to both stderr and a log file
pub struct DualWriter {
    pub console: std::io::Stderr,
    pub file: std::fs::File,
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        // Console output is best effort; the file decides success
        let _ = self.console.write(buf);
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let _ = self.console.flush();
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dual_writer_writes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("copier.log");
        let mut writer = DualWriter {
            console: std::io::stderr(),
            file: std::fs::File::create(&path).unwrap(),
        };

        writeln!(writer, "copying IMG_0001").unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "copying IMG_0001\n");
    }
}
