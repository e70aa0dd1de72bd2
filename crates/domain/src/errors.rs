use thiserror::Error;

pub const EMPTY_NAME_MESSAGE: &str = "Name cannot be empty";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller-correctable input; the message is meant to be shown as-is.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl DomainError {
    pub fn empty_name() -> Self {
        Self::InvalidArgument(EMPTY_NAME_MESSAGE.to_string())
    }

    pub fn invalid_email() -> Self {
        Self::InvalidArgument(INVALID_EMAIL_MESSAGE.to_string())
    }

    pub fn repository(err: impl std::fmt::Display) -> Self {
        Self::RepositoryError(err.to_string())
    }
}
