//! POSIX syslog provider
//!
//! Filtering is delegated to the syslog daemon through `setlogmask`, so sinks
//! report every level as enabled and leave the threshold to the OS.

use crate::core::{LogLevel, LoggerError, Properties, Provider, Result, Sink, SinkCache};
use std::ffi::CString;
use std::os::raw::c_int;
use std::sync::Arc;

/// Syslog priority for a level
fn priority(level: LogLevel) -> c_int {
    match level {
        LogLevel::Trace | LogLevel::Debug => libc::LOG_DEBUG,
        LogLevel::Info => libc::LOG_INFO,
        LogLevel::Warning => libc::LOG_WARNING,
        LogLevel::Error => libc::LOG_ERR,
        LogLevel::Critical => libc::LOG_CRIT,
    }
}

/// Equivalent of the `LOG_UPTO` macro: every priority up to and including `pri`
fn log_upto(pri: c_int) -> c_int {
    (1 << (pri + 1)) - 1
}

fn compose(category: &str, message: &str, properties: &Properties) -> String {
    if properties.is_empty() {
        format!("{}: {}", category, message)
    } else {
        format!("{}: {} {}", category, message, properties.format_fields())
    }
}

/// Forwards messages to the system logger (`LOG_USER` facility)
///
/// # Example
///
/// ```no_run
/// use rust_log_router::providers::SyslogProvider;
/// use rust_log_router::{LogLevel, LoggerFactory};
/// use std::sync::Arc;
///
/// let factory = LoggerFactory::builder()
///     .provider(Arc::new(SyslogProvider::new(LogLevel::Info)))
///     .build();
/// factory.create_logger("daemon").warning("disk almost full");
/// ```
pub struct SyslogProvider {
    min_level: LogLevel,
    sinks: SinkCache,
}

impl SyslogProvider {
    pub const NAME: &'static str = "SyslogProvider";

    /// Open the syslog connection and mask out priorities below `min_level`
    pub fn new(min_level: LogLevel) -> Self {
        // SAFETY: a null ident makes syslog use the program name; both calls
        // only update process-wide logger settings.
        unsafe {
            libc::setlogmask(log_upto(priority(min_level)));
            libc::openlog(std::ptr::null(), libc::LOG_NDELAY, libc::LOG_USER);
        }

        Self {
            min_level,
            sinks: SinkCache::new(),
        }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl Provider for SyslogProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn get_logger(&self, category: &str) -> Arc<dyn Sink> {
        self.sinks.get_or_create(category, || {
            Arc::new(SyslogSink {
                category: category.to_string(),
            })
        })
    }
}

struct SyslogSink {
    category: String,
}

impl Sink for SyslogSink {
    fn log(&self, level: LogLevel, message: &str, properties: &Properties) -> Result<()> {
        let text = compose(&self.category, message, properties);
        let cmsg = CString::new(text).map_err(|e| {
            LoggerError::invalid_message(
                SyslogProvider::NAME,
                format!("interior NUL byte at position {}", e.nul_position()),
            )
        })?;

        // SAFETY: both pointers are valid NUL-terminated strings for the
        // duration of the call, and "%s" consumes exactly one argument.
        unsafe {
            libc::syslog(priority(level), b"%s\0".as_ptr().cast(), cmsg.as_ptr());
        }
        Ok(())
    }

    fn is_enabled(&self, _level: LogLevel) -> bool {
        true
    }
}
