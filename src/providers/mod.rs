//! Built-in providers

pub mod console;
pub mod memory;

#[cfg(feature = "file")]
pub mod file;

#[cfg(all(unix, feature = "syslog"))]
pub mod syslog;

#[cfg(target_os = "android")]
pub mod android;

pub use console::ConsoleProvider;
pub use memory::MemoryProvider;

#[cfg(feature = "file")]
pub use file::{FileProvider, FileProviderOptions, FileSplit};

#[cfg(all(unix, feature = "syslog"))]
pub use syslog::SyslogProvider;

#[cfg(target_os = "android")]
pub use android::AndroidProvider;
