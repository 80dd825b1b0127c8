//! Console provider implementation

use crate::core::{
    LogLevel, LogRecord, LoggerError, OutputFormat, Properties, Provider, Result, Sink, SinkCache,
};
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Output settings copied into every sink at creation time.
#[derive(Clone, Copy)]
struct ConsoleStyle {
    min_level: LogLevel,
    output_format: OutputFormat,
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
}

/// Writes every message to one output stream (stdout by default).
///
/// All sinks share the provider's target behind one lock, so lines from
/// different categories never interleave.
///
/// # Example
///
/// ```
/// use rust_log_router::providers::ConsoleProvider;
/// use rust_log_router::{LogLevel, OutputFormat, Provider};
///
/// let provider = ConsoleProvider::stderr()
///     .with_min_level(LogLevel::Info)
///     .with_output_format(OutputFormat::Logfmt);
///
/// assert_eq!(provider.name(), "ConsoleProvider");
/// ```
pub struct ConsoleProvider {
    target: Arc<Mutex<Box<dyn Write + Send>>>,
    style: ConsoleStyle,
    sinks: SinkCache,
}

impl ConsoleProvider {
    pub const NAME: &'static str = "ConsoleProvider";

    /// Provider writing to any `Write` target, accepting all levels
    pub fn new(target: Box<dyn Write + Send>) -> Self {
        Self {
            target: Arc::new(Mutex::new(target)),
            style: ConsoleStyle {
                min_level: LogLevel::Trace,
                output_format: OutputFormat::default(),
                use_colors: false,
            },
            sinks: SinkCache::new(),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Set the minimum accepted level
    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.style.min_level = level;
        self
    }

    /// Set the output format for this provider
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_router::providers::ConsoleProvider;
    /// use rust_log_router::OutputFormat;
    ///
    /// let provider = ConsoleProvider::stdout().with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.style.output_format = format;
        self
    }

    /// Colorize the level label in text output
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.style.use_colors = use_colors;
        self
    }

    pub fn min_level(&self) -> LogLevel {
        self.style.min_level
    }
}

impl Default for ConsoleProvider {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Provider for ConsoleProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn get_logger(&self, category: &str) -> Arc<dyn Sink> {
        self.sinks.get_or_create(category, || {
            Arc::new(ConsoleSink {
                category: category.to_string(),
                target: Arc::clone(&self.target),
                style: self.style,
            })
        })
    }
}

struct ConsoleSink {
    category: String,
    target: Arc<Mutex<Box<dyn Write + Send>>>,
    style: ConsoleStyle,
}

impl ConsoleSink {
    #[cfg(feature = "console")]
    fn render(&self, record: &LogRecord) -> String {
        let line = self.style.output_format.format(record);
        if !self.style.use_colors || self.style.output_format != OutputFormat::Text {
            return line;
        }

        let label = format!("[{}]", record.level);
        let colored_label = label.color(record.level.color_code()).to_string();
        line.replacen(&label, &colored_label, 1)
    }

    #[cfg(not(feature = "console"))]
    fn render(&self, record: &LogRecord) -> String {
        self.style.output_format.format(record)
    }
}

impl Sink for ConsoleSink {
    fn log(&self, level: LogLevel, message: &str, properties: &Properties) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let record = LogRecord::new(level, &self.category, message).with_properties(properties);
        let output = self.render(&record);

        let mut target = self.target.lock();
        target.write_all(output.as_bytes()).map_err(|e| {
            LoggerError::io_operation("writing console line", ConsoleProvider::NAME, e)
        })?;
        target.flush()?;
        Ok(())
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.style.min_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory `Write` target observable from the test
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    #[test]
    fn test_get_logger_is_idempotent() {
        let buffer = SharedBuffer::default();
        let provider = ConsoleProvider::new(Box::new(buffer.clone()));

        let l1 = provider.get_logger("MyLog");
        let l2 = provider.get_logger("MyOtherLog");
        let l3 = provider.get_logger("MyLog");

        assert!(!Arc::ptr_eq(&l1, &l2));
        assert!(Arc::ptr_eq(&l1, &l3));

        l1.log(LogLevel::Warning, "MyMessage", &Properties::new()).unwrap();
        assert_eq!(buffer.contents(), "[Warning] MyLog: MyMessage\n");
    }

    #[test]
    fn test_is_enabled_uses_min_level() {
        let provider = ConsoleProvider::new(Box::new(std::io::sink())).with_min_level(LogLevel::Info);
        let l = provider.get_logger("MyLog");

        assert!(!l.is_enabled(LogLevel::Trace));
        assert!(!l.is_enabled(LogLevel::Debug));
        assert!(l.is_enabled(LogLevel::Info));
        assert!(l.is_enabled(LogLevel::Warning));
        assert!(l.is_enabled(LogLevel::Error));
        assert!(l.is_enabled(LogLevel::Critical));
    }

    #[test]
    fn test_properties_on_indented_lines() {
        let buffer = SharedBuffer::default();
        let provider = ConsoleProvider::new(Box::new(buffer.clone()));
        let props = Properties::new().with("user", "alice");

        provider
            .get_logger("auth")
            .log(LogLevel::Info, "login", &props)
            .unwrap();

        assert_eq!(buffer.contents(), "[Info] auth: login\n\tuser: alice\n");
    }

    #[test]
    fn test_below_threshold_writes_nothing() {
        let buffer = SharedBuffer::default();
        let provider =
            ConsoleProvider::new(Box::new(buffer.clone())).with_min_level(LogLevel::Error);

        provider
            .get_logger("quiet")
            .log(LogLevel::Info, "ignored", &Properties::new())
            .unwrap();

        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(ConsoleProvider::stdout().name(), "ConsoleProvider");
    }
}
