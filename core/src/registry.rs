//! Process-wide default logger.
//!
//! Drivers that were not handed a logger explicitly fall back to
//! [`default_logger`]. Until something is installed it is a [`NoopLogger`].

use std::sync::{Arc, PoisonError, RwLock};

use crate::{Logger, NoopLogger};

static DEFAULT_LOGGER: RwLock<Option<Arc<dyn Logger>>> = RwLock::new(None);

/// Installs `logger` as the process-wide default, returning the previous one.
pub fn set_default_logger(logger: Arc<dyn Logger>) -> Option<Arc<dyn Logger>> {
    DEFAULT_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(logger)
}

/// Removes the installed default, returning it.
pub fn take_default_logger() -> Option<Arc<dyn Logger>> {
    DEFAULT_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}

/// The current process-wide default logger.
pub fn default_logger() -> Arc<dyn Logger> {
    DEFAULT_LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_else(|| Arc::new(NoopLogger))
}
