//! Rolling File Logger
//!
//! Installs a `tracing` subscriber that writes to `<dir>/<app>.log`.
//! `log` records are bridged into the same subscriber, so crates that only
//! use the `log` facade end up in the same file.
//!
//! The active file is rotated to `<app>.log.1` (older files shift up to
//! `<app>.log.N`) once it grows past `max_bytes`. The most recent lines
//! are also kept in a small in-memory ring buffer.

use std::collections::VecDeque;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

/// Rotate once the active file grows past this many bytes
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
/// Number of rotated files kept next to the active one
pub const DEFAULT_MAX_FILES: usize = 3;
/// Lines retained in memory
pub const DEFAULT_BUFFER_LINES: usize = 200;

static LOGGER: OnceLock<RollingFileWriter> = OnceLock::new();

#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
    NotInitialized,
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "logger already initialized"),
            LoggerError::NotInitialized => write!(f, "logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(error: io::Error) -> Self {
        LoggerError::Io(error)
    }
}

/// Tuning knobs for the rolling file
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    pub max_bytes: u64,
    pub max_files: usize,
    pub buffer_lines: usize,
    pub level: log::LevelFilter,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_files: DEFAULT_MAX_FILES,
            buffer_lines: DEFAULT_BUFFER_LINES,
            level: log::LevelFilter::Debug,
        }
    }
}

struct Inner {
    dir: PathBuf,
    base_name: String,
    file: File,
    written: u64,
    options: LoggerOptions,
    recent: VecDeque<String>,
    partial: String,
}

impl Inner {
    fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.base_name))
    }

    fn rotated_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("{}.log.{}", self.base_name, n))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let active = self.active_path();

        if self.options.max_files == 0 {
            self.file = File::create(&active)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.rotated_path(self.options.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.options.max_files).rev() {
            let from = self.rotated_path(n);
            if from.exists() {
                fs::rename(&from, self.rotated_path(n + 1))?;
            }
        }
        fs::rename(&active, self.rotated_path(1))?;

        self.file = open_append(&active)?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            self.recent.push_back(line.trim_end().to_string());
            while self.recent.len() > self.options.buffer_lines {
                self.recent.pop_front();
            }
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Shared handle to the rolling file; cheap to clone
#[derive(Clone)]
pub struct RollingFileWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RollingFileWriter {
    /// Open (or create) `<dir>/<app_name>.log` for appending
    pub fn open(dir: impl AsRef<Path>, app_name: &str, options: LoggerOptions) -> Result<Self, LoggerError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.log", app_name));
        let file = open_append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                dir,
                base_name: app_name.to_string(),
                file,
                written,
                options,
                recent: VecDeque::new(),
                partial: String::new(),
            })),
        })
    }

    /// Path of the active log file
    pub fn path(&self) -> PathBuf {
        match self.inner.lock() {
            Ok(inner) => inner.active_path(),
            Err(poisoned) => poisoned.into_inner().active_path(),
        }
    }

    /// Most recent complete lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(inner) => inner.recent.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;

        if inner.written > 0 && inner.written + buf.len() as u64 > inner.options.max_bytes {
            inner.rotate()?;
        }

        inner.file.write_all(buf)?;
        inner.written += buf.len() as u64;
        inner.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        inner.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingFileWriter {
    type Writer = RollingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

fn level_filter(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

/// Initialize the global logger with default options.
///
/// Returns the path of the active log file.
pub fn init_logger(dir: impl AsRef<Path>, app_name: &str) -> Result<PathBuf, LoggerError> {
    init_logger_with(dir, app_name, LoggerOptions::default())
}

/// Initialize the global logger. Can only succeed once per process.
pub fn init_logger_with(
    dir: impl AsRef<Path>,
    app_name: &str,
    options: LoggerOptions,
) -> Result<PathBuf, LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let level = level_filter(options.level);
    let writer = RollingFileWriter::open(dir, app_name, options)?;

    tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_timer(LocalTimer)
        .with_max_level(level)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    let path = writer.path();
    let _ = LOGGER.set(writer);
    Ok(path)
}

fn ensure_initialized() -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        Ok(())
    } else {
        Err(LoggerError::NotInitialized)
    }
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Recent lines from the global logger (empty before init)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|w| w.recent_lines()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_options() -> LoggerOptions {
        LoggerOptions {
            max_bytes: 64,
            max_files: 2,
            buffer_lines: 3,
            level: log::LevelFilter::Debug,
        }
    }

    #[test]
    fn test_writes_to_active_file() {
        let dir = tempdir().unwrap();
        let mut writer = RollingFileWriter::open(dir.path(), "app", LoggerOptions::default()).unwrap();

        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        let content = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert_eq!(content, "hello\n");
    }

    #[test]
    fn test_rotates_when_full() {
        let dir = tempdir().unwrap();
        let mut writer = RollingFileWriter::open(dir.path(), "app", small_options()).unwrap();

        for i in 0..10 {
            let line = format!("line number {:02} padding\n", i);
            writer.write_all(line.as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert!(dir.path().join("app.log").exists());
        assert!(dir.path().join("app.log.1").exists());
        assert!(dir.path().join("app.log.2").exists());
        assert!(!dir.path().join("app.log.3").exists());

        let active = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert!(active.len() as u64 <= 64);
        assert!(active.contains("line number 09"));
    }

    #[test]
    fn test_ring_buffer_keeps_last_lines() {
        let dir = tempdir().unwrap();
        let mut writer = RollingFileWriter::open(dir.path(), "app", small_options()).unwrap();

        writer.write_all(b"one\ntwo\nthree\nfo").unwrap();
        writer.write_all(b"ur\n").unwrap();

        assert_eq!(writer.recent_lines(), vec!["two", "three", "four"]);
    }

    // The global logger is process-wide, so its whole lifecycle lives in
    // one test.
    #[test]
    fn test_global_init_lifecycle() {
        assert!(matches!(info("nope"), Err(LoggerError::NotInitialized)));
        assert!(recent_lines().is_empty());

        let dir = tempdir().unwrap();
        let path = init_logger(dir.path(), "pets").expect("first init should succeed");
        assert_eq!(path, dir.path().join("pets.log"));

        log::info!("bridged from the log facade");
        info("direct helper line").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("bridged from the log facade"));
        assert!(content.contains("direct helper line"));
        assert!(recent_lines().iter().any(|l| l.contains("direct helper line")));

        let again = init_logger(dir.path(), "pets");
        assert!(matches!(again, Err(LoggerError::AlreadyInitialized)));
    }
}
