use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("upload error: {0}")]
    Upload(#[from] axum::extract::multipart::MultipartError),
    #[error("{0}")]
    InvalidCsv(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InvalidCsv(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Upload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Every flow error ends up here: logged once, then handed to the client as a
// plain message instead of propagating into the event loop.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", &self);
        } else {
            tracing::warn!("{}", &self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
