//! File provider with message-count, size and daily splitting
//!
//! All sinks of one provider append to the same current file. Files are named
//! after their UTC creation time, e.g. `2024-05-01T12-30-00Z.log`, and get a
//! `-N` suffix when that name is already taken in the directory.

use crate::core::{
    LogLevel, LogRecord, LoggerError, OutputFormat, Properties, Provider, Result, Sink, SinkCache,
};
use chrono::{Local, NaiveDate, Utc};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// When the provider closes the current file and starts a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileSplit {
    /// Keep writing to one file
    #[default]
    None,

    /// Start a new file after `max_messages` lines
    Messages { max_messages: usize },

    /// Start a new file on the first message of each local calendar day
    Daily,

    /// Start a new file before a line would push the current one past `max_bytes`
    Size { max_bytes: u64 },
}

/// Configuration for [`FileProvider`]
///
/// # Examples
///
/// ```
/// use rust_log_router::providers::{FileProviderOptions, FileSplit};
/// use rust_log_router::LogLevel;
///
/// let options = FileProviderOptions::new()
///     .with_min_level(LogLevel::Info)
///     .with_split(FileSplit::Messages { max_messages: 10_000 });
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileProviderOptions {
    pub min_level: LogLevel,
    pub split: FileSplit,
    pub format: OutputFormat,
}

impl FileProviderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_split(mut self, split: FileSplit) -> Self {
        self.split = split;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    fn validate(&self) -> Result<()> {
        match self.split {
            FileSplit::Messages { max_messages: 0 } => Err(LoggerError::config(
                FileProvider::NAME,
                "max_messages must be greater than zero when splitting by message count",
            )),
            FileSplit::Size { max_bytes: 0 } => Err(LoggerError::config(
                FileProvider::NAME,
                "max_bytes must be greater than zero when splitting by size",
            )),
            _ => Ok(()),
        }
    }
}

/// Pick a fresh file name in `dir` based on the current UTC time
fn make_file_name(dir: &Path) -> PathBuf {
    let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%SZ").to_string();

    let mut n = 0usize;
    loop {
        let name = if n == 0 {
            format!("{}.log", stamp)
        } else {
            format!("{}-{}.log", stamp, n)
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

fn open_new_file(dir: &Path) -> Result<(PathBuf, BufWriter<File>)> {
    let path = make_file_name(dir);
    let file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&path)
        .map_err(|e| {
            LoggerError::file_sink(path.display().to_string(), format!("Failed to open: {}", e))
        })?;
    Ok((path, BufWriter::new(file)))
}

/// State shared by a provider and all of its sinks
struct FileState {
    dir: PathBuf,
    options: FileProviderOptions,
    path: PathBuf,
    writer: BufWriter<File>,
    messages_in_file: usize,
    bytes_in_file: u64,
    last_day: NaiveDate,
}

impl FileState {
    fn needs_split(&self, line_len: u64) -> bool {
        match self.options.split {
            FileSplit::None => false,
            FileSplit::Messages { max_messages } => self.messages_in_file >= max_messages,
            FileSplit::Daily => Local::now().date_naive() != self.last_day,
            FileSplit::Size { max_bytes } => {
                self.bytes_in_file > 0 && self.bytes_in_file + line_len > max_bytes
            }
        }
    }

    fn split(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| {
            LoggerError::file_split(
                self.path.display().to_string(),
                format!("Failed to flush before split: {}", e),
            )
        })?;

        let (path, writer) = open_new_file(&self.dir).map_err(|e| {
            LoggerError::file_split(self.dir.display().to_string(), e.to_string())
        })?;

        self.path = path;
        self.writer = writer;
        self.messages_in_file = 0;
        self.bytes_in_file = 0;
        self.last_day = Local::now().date_naive();
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let len = line.len() as u64;
        if self.needs_split(len) {
            if let Err(e) = self.split() {
                eprintln!("[LOGGER WARN] {}; continuing with {}", e, self.path.display());
            }
        }

        self.writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::io_operation("writing log line", self.path.display().to_string(), e)
        })?;
        self.writer.flush()?;

        self.messages_in_file += 1;
        self.bytes_in_file += len;
        Ok(())
    }
}

impl Drop for FileState {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Writes all categories into timestamped files inside one directory
///
/// # Examples
///
/// ```no_run
/// use rust_log_router::providers::{FileProvider, FileProviderOptions, FileSplit};
/// use rust_log_router::LoggerFactory;
/// use std::sync::Arc;
///
/// let options = FileProviderOptions::new().with_split(FileSplit::Daily);
/// let provider = FileProvider::new("/var/log/myapp", options).unwrap();
///
/// let factory = LoggerFactory::builder().provider(Arc::new(provider)).build();
/// factory.create_logger("startup").info("ready");
/// ```
pub struct FileProvider {
    state: Arc<Mutex<FileState>>,
    sinks: SinkCache,
}

impl FileProvider {
    pub const NAME: &'static str = "FileProvider";

    /// Create the directory if needed and open the first file
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a zero message count or byte size,
    /// or an IO error if the directory or first file cannot be created
    pub fn new<P: AsRef<Path>>(dir: P, options: FileProviderOptions) -> Result<Self> {
        options.validate()?;

        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", dir.display()),
                e,
            )
        })?;

        let (path, writer) = open_new_file(&dir)?;

        Ok(Self {
            state: Arc::new(Mutex::new(FileState {
                dir,
                options,
                path,
                writer,
                messages_in_file: 0,
                bytes_in_file: 0,
                last_day: Local::now().date_naive(),
            })),
            sinks: SinkCache::new(),
        })
    }

    pub fn directory(&self) -> PathBuf {
        self.state.lock().dir.clone()
    }

    /// Path of the file currently being written
    pub fn current_file(&self) -> PathBuf {
        self.state.lock().path.clone()
    }

    pub fn min_level(&self) -> LogLevel {
        self.state.lock().options.min_level
    }
}

impl Provider for FileProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn get_logger(&self, category: &str) -> Arc<dyn Sink> {
        self.sinks.get_or_create(category, || {
            let state = self.state.lock();
            Arc::new(FileSink {
                category: category.to_string(),
                min_level: state.options.min_level,
                format: state.options.format,
                state: Arc::clone(&self.state),
            })
        })
    }
}

struct FileSink {
    category: String,
    min_level: LogLevel,
    format: OutputFormat,
    state: Arc<Mutex<FileState>>,
}

impl Sink for FileSink {
    fn log(&self, level: LogLevel, message: &str, properties: &Properties) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let record = LogRecord::new(level, &self.category, message).with_properties(properties);
        let line = self.format.format(&record);
        self.state.lock().write_line(&line)
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}
