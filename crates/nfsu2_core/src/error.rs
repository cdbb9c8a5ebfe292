use std::io;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    Format,
    CorruptData,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code:?}: {message}")]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn io(context: impl AsRef<str>, err: io::Error) -> Self {
        Self::new(CoreErrorCode::Io, format!("{}: {err}", context.as_ref()))
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::Format, message)
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::CorruptData, message)
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
