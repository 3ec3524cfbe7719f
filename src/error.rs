use thiserror::Error;

/// Rejections surfaced to the immediate caller. Persistence failures never
/// show up here; stores log them and keep their in-memory state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("no account found, please sign up")]
    NoAccount,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("not signed in")]
    Unauthenticated,

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
