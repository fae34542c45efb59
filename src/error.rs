use axum::response::{Html, IntoResponse, Response};
use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("database connection is not configured")]
    NotConfigured,
    #[error("could not connect to the database: {0}")]
    Unreachable(#[source] DbErr),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("settings file {path} could not be read: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is malformed: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("configured wallet directory does not exist: {0}")]
    WalletMissing(String),
    #[error("unknown evaluation target {0:?} (expected auto, movie or screening)")]
    EvaluationTarget(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error("a record with the same key already exists ({0})")]
    Duplicate(String),
    #[error("a referenced record does not exist or is still in use ({0})")]
    ForeignKey(String),
    #[error("record has no key and cannot be updated")]
    MissingKey,
    #[error("stored value could not be read: {0}")]
    Decode(String),
    #[error("statement failed: {0}")]
    Statement(#[source] DbErr),
}

impl From<DbErr> for RepoError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Duplicate(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::ForeignKey(msg),
            _ => Self::Statement(err),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("{0} does not look like a valid email address.")]
    Email(&'static str),
    #[error("{0} must be a date in YYYY-MM-DD format.")]
    Date(&'static str),
    #[error("{0} must be a time in HH:MM format.")]
    Time(&'static str),
    #[error("{label} must be a whole number between {min} and {max}.")]
    OutOfRange { label: &'static str, min: i32, max: i32 },
    #[error("{0} must be a number.")]
    Number(&'static str),
    #[error("{0} cannot be negative.")]
    Negative(&'static str),
    #[error("{0} has an unexpected value.")]
    Choice(&'static str),
}

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = crate::templates::error_page(self.to_string());
        Html(body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
