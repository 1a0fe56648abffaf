use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed index entry at line {line}: {reason}")]
    MalformedIndexEntry { line: usize, reason: String },

    #[error("unknown contig: {0}")]
    UnknownContig(String),

    #[error("invalid range: start {start} is not < end {end} after clamping")]
    InvalidRange { start: i64, end: i64 },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct HtsgetError {
    pub htsget: HtsgetErrorBody,
}

#[derive(Debug, Serialize)]
pub struct HtsgetErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl Error {
    /// Stable name of the error kind, used in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MalformedIndexEntry { .. } => "MalformedIndexEntry",
            Error::UnknownContig(_) => "UnknownContig",
            Error::InvalidRange { .. } => "InvalidRange",
            Error::NotFound(_) => "NotFound",
            Error::InvalidInput(_) => "InvalidInput",
            Error::Io(_) | Error::Internal(_) => "InternalError",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::UnknownContig(_) | Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidRange { .. } | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::MalformedIndexEntry { .. } | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = HtsgetError {
            htsget: HtsgetErrorBody {
                error: self.kind(),
                message: self.to_string(),
            },
        };
        (self.status_code(), axum::Json(body)).into_response()
    }
}
