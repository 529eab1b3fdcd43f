use usage_core::UsageError;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// Bad request input; processing never started.
    #[error("{0}")]
    Input(String),
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn internal(msg: impl ToString) -> Self {
        Self::Internal(msg.to_string())
    }
}
