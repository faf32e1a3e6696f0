//! File sink implementation

use crate::core::{render_line, ContentFormatter, LoggerError, Record, Result, Sink, StreamTarget};
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only file sink
///
/// Every line is written unbuffered under an advisory exclusive lock, so
/// several processes may append to the same file. By default both streams
/// share one file; [`FileSink::with_error_file`] splits error-stream lines
/// into a second file.
pub struct FileSink {
    out: Mutex<File>,
    out_path: PathBuf,
    err: Option<(Mutex<File>, PathBuf)>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let out_path = path.into();
        let out = open_append(&out_path)?;

        Ok(Self {
            out: Mutex::new(out),
            out_path,
            err: None,
        })
    }

    /// Send error-stream lines to a separate file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use scoped_logger::FileSink;
    ///
    /// let sink = FileSink::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_error_file("/var/log/app.err.log")
    ///     .unwrap();
    /// ```
    pub fn with_error_file(mut self, path: impl Into<PathBuf>) -> Result<Self> {
        let err_path = path.into();
        let err = open_append(&err_path)?;
        self.err = Some((Mutex::new(err), err_path));
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.out_path
    }

    pub fn error_path(&self) -> Option<&Path> {
        self.err.as_ref().map(|(_, path)| path.as_path())
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))
}

fn write_locked(file: &Mutex<File>, path: &Path, line: &str) -> Result<()> {
    let mut file = file.lock();
    file.lock_exclusive()
        .map_err(|e| LoggerError::io_operation("locking log file", path.display().to_string(), e))?;
    let written = file.write_all(line.as_bytes());
    let unlocked = FileExt::unlock(&*file);
    written.map_err(|e| LoggerError::io_operation("writing log file", path.display().to_string(), e))?;
    unlocked
        .map_err(|e| LoggerError::io_operation("unlocking log file", path.display().to_string(), e))
}

impl Sink for FileSink {
    fn write_content(&self, record: &Record, formatter: Option<&ContentFormatter>) -> Result<()> {
        let Some((target, line)) = render_line(record, formatter)? else {
            return Ok(());
        };

        match (target, &self.err) {
            (StreamTarget::Stderr, Some((err, err_path))) => write_locked(err, err_path, &line),
            _ => write_locked(&self.out, &self.out_path, &line),
        }
    }

    fn flush(&self) -> Result<()> {
        self.out.lock().flush()?;
        if let Some((err, _)) = &self.err {
            err.lock().flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
