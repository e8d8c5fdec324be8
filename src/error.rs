use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient Balance")]
    InsufficientFunds,

    #[error("User already exists")]
    UserExists,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid Username or Password")]
    InvalidCredentials,

    #[error("Not logged in")]
    Unauthenticated,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Storage error: {0}")] Storage(String),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

impl AppError {
    /// Machine-readable error kind; the message stays human-facing.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidAmount => "INVALID_AMOUNT",
            AppError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            AppError::UserExists => "DUPLICATE_USER",
            AppError::PasswordMismatch => "PASSWORD_MISMATCH",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            | AppError::InvalidAmount
            | AppError::InsufficientFunds
            | AppError::PasswordMismatch => axum::http::StatusCode::BAD_REQUEST,
            AppError::UserExists => axum::http::StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthenticated => {
                axum::http::StatusCode::UNAUTHORIZED
            }
            AppError::AccountNotFound => axum::http::StatusCode::NOT_FOUND,
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The routes serve HTML forms, so errors render as plain text;
        // the kind stays on the type for callers that need it.
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
