//! Android platform log provider (`liblog`)

use crate::core::{LogLevel, LoggerError, Properties, Provider, Result, Sink, SinkCache};
use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::sync::Arc;

const ANDROID_LOG_VERBOSE: c_int = 2;
const ANDROID_LOG_DEBUG: c_int = 3;
const ANDROID_LOG_INFO: c_int = 4;
const ANDROID_LOG_WARN: c_int = 5;
const ANDROID_LOG_ERROR: c_int = 6;
const ANDROID_LOG_FATAL: c_int = 7;

#[link(name = "log")]
extern "C" {
    fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
}

fn priority(level: LogLevel) -> c_int {
    match level {
        LogLevel::Trace => ANDROID_LOG_VERBOSE,
        LogLevel::Debug => ANDROID_LOG_DEBUG,
        LogLevel::Info => ANDROID_LOG_INFO,
        LogLevel::Warning => ANDROID_LOG_WARN,
        LogLevel::Error => ANDROID_LOG_ERROR,
        LogLevel::Critical => ANDROID_LOG_FATAL,
    }
}

/// Writes to logcat, using the category as the tag
pub struct AndroidProvider {
    min_level: LogLevel,
    sinks: SinkCache,
}

impl AndroidProvider {
    pub const NAME: &'static str = "AndroidProvider";

    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            sinks: SinkCache::new(),
        }
    }
}

impl Provider for AndroidProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn get_logger(&self, category: &str) -> Arc<dyn Sink> {
        self.sinks.get_or_create(category, || {
            Arc::new(AndroidSink {
                tag: category.to_string(),
                min_level: self.min_level,
            })
        })
    }
}

struct AndroidSink {
    tag: String,
    min_level: LogLevel,
}

impl AndroidSink {
    fn c_string(&self, text: String) -> Result<CString> {
        CString::new(text).map_err(|e| {
            LoggerError::invalid_message(
                AndroidProvider::NAME,
                format!("interior NUL byte at position {}", e.nul_position()),
            )
        })
    }
}

impl Sink for AndroidSink {
    fn log(&self, level: LogLevel, message: &str, properties: &Properties) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let mut text = format!("{}\n", message);
        for (key, value) in properties.iter() {
            text.push_str(&format!("\t{}: {}\n", key, value));
        }

        let tag = self.c_string(self.tag.clone())?;
        let text = self.c_string(text)?;

        // SAFETY: tag and text are valid NUL-terminated strings for the call
        unsafe {
            __android_log_write(priority(level), tag.as_ptr(), text.as_ptr());
        }
        Ok(())
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}
