//! Core routing types and traits

pub mod error;
pub mod factory;
pub mod log_level;
pub mod log_record;
pub mod metrics;
pub mod options;
pub mod output_format;
pub mod properties;
pub mod router;
pub mod rule;
pub mod sink;

pub use error::{LoggerError, Result};
pub use factory::{LoggerFactory, LoggerFactoryBuilder};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use metrics::RouterMetrics;
pub use options::RouterOptions;
pub use output_format::OutputFormat;
pub use properties::Properties;
pub use router::{Binding, Router};
pub use rule::{Rule, RuleFilter};
pub use sink::{Provider, Sink, SinkCache};
