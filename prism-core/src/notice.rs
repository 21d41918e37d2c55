//! User-facing notifications produced by tool actions

use std::fmt;

use crate::error::{ErrorKind, ToolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A short message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Turn a recovered failure into a notification, logging the detail
    pub fn from_error(context: &str, err: &ToolError) -> Self {
        match err.kind() {
            ErrorKind::InputRejected => log::info!("{}: {}", context, err),
            ErrorKind::ProcessingFailure | ErrorKind::EnvironmentDenial => {
                log::warn!("{}: {}", context, err)
            }
        }
        Self::error(format!("{}: {}", context, err.user_message()))
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}
