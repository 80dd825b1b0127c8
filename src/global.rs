//! Process-wide default factory
//!
//! Independent subsystems that do not want to build their own
//! [`LoggerFactory`] can share one through [`acquire`]. The factory holds a
//! single stdout [`ConsoleProvider`]; it is created by the first guard and torn
//! down when the last guard is dropped.
//!
//! # Example
//!
//! ```
//! use rust_log_router::global;
//!
//! let factory = global::acquire();
//! factory.create_logger("startup").info("using the default factory");
//! ```

use crate::core::LoggerFactory;
use crate::providers::ConsoleProvider;
use parking_lot::Mutex;
use std::ops::Deref;
use std::sync::Arc;

struct GlobalState {
    users: usize,
    factory: Option<Arc<LoggerFactory>>,
}

static GLOBAL: Mutex<GlobalState> = parking_lot::const_mutex(GlobalState {
    users: 0,
    factory: None,
});

fn default_factory() -> LoggerFactory {
    LoggerFactory::builder()
        .provider(Arc::new(ConsoleProvider::stdout()))
        .build()
}

/// Shared handle to the default factory; releasing the last one tears it down
pub struct GlobalFactory {
    factory: Arc<LoggerFactory>,
}

/// Register a user of the default factory, creating it if this is the first
pub fn acquire() -> GlobalFactory {
    let mut state = GLOBAL.lock();
    let factory = match &state.factory {
        Some(factory) => Arc::clone(factory),
        None => {
            let factory = Arc::new(default_factory());
            state.factory = Some(Arc::clone(&factory));
            factory
        }
    };
    state.users += 1;

    GlobalFactory { factory }
}

/// Number of live [`GlobalFactory`] guards
pub fn active_users() -> usize {
    GLOBAL.lock().users
}

impl GlobalFactory {
    /// The underlying factory, usable beyond the guard's lifetime
    pub fn factory(&self) -> Arc<LoggerFactory> {
        Arc::clone(&self.factory)
    }
}

impl Deref for GlobalFactory {
    type Target = LoggerFactory;

    fn deref(&self) -> &LoggerFactory {
        &self.factory
    }
}

impl Clone for GlobalFactory {
    fn clone(&self) -> Self {
        GLOBAL.lock().users += 1;
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl Drop for GlobalFactory {
    fn drop(&mut self) {
        let mut state = GLOBAL.lock();
        state.users = state.users.saturating_sub(1);
        if state.users == 0 {
            state.factory = None;
        }
    }
}
