//! File appender implementation

use crate::core::{Appender, LogEntry, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one line per entry to a file, creating it if needed
pub struct FileAppender {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::writer(format!("cannot open '{}': {}", path.display(), e))
            })?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, _entry: &LogEntry, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_appender_appends_lines() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.jsonl");

        let mut appender = FileAppender::new(&log_path)?;
        let entry = LogEntry::new(LogLevel::Info, "x");
        appender.append(&entry, "{\"n\":1}")?;
        appender.append(&entry, "{\"n\":2}")?;
        appender.flush()?;

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content, "{\"n\":1}\n{\"n\":2}\n");
        assert_eq!(appender.path(), log_path.as_path());
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("no_such_dir").join("app.log");

        let err = FileAppender::new(&log_path).err().unwrap();
        assert!(matches!(err, LoggerError::WriterError(_)));
        assert!(err.to_string().contains("no_such_dir"));
    }
}
