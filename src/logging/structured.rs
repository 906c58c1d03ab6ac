//! Structured logging utilities.
//!
//! Provides context-aware logging with the pipeline action and the field
//! being processed included in every log message.

use std::fmt;

use crate::pipeline::Action;

/// Logging context for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub action: Action,
    pub field: Option<String>,
}

impl LogContext {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            field: None,
        }
    }

    pub fn with_field(&self, field: &str) -> Self {
        Self {
            action: self.action,
            field: Some(field.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "[action={}] [field={}]", self.action, field),
            None => write!(f, "[action={}]", self.action),
        }
    }
}
