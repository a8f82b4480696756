use ai_llm_service::AiLlmError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rag_chat::ChatError;
use serde::Serialize;
use site_corpus::RankError;
use thiserror::Error;
use tracing::{error, warn};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("configuration error: {0}")]
    Config(#[from] AiLlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Http { status, .. } => *status,
            AppError::Config(_) | AppError::Bind { .. } | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

/// Maps pipeline failures to status and a stable code: caller mistakes are
/// 4xx, upstream model failures 502, local data problems 500.
impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        let (status, code) = match &err {
            ChatError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ChatError::EmbeddingService(_) => (StatusCode::BAD_GATEWAY, "EMBEDDING_SERVICE_ERROR"),
            ChatError::CompletionService(_) => {
                (StatusCode::BAD_GATEWAY, "COMPLETION_SERVICE_ERROR")
            }
            ChatError::CorpusUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CORPUS_UNAVAILABLE")
            }
            ChatError::Rank(RankError::InvalidK(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_K")
            }
            ChatError::Rank(RankError::DimensionMismatch { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DIMENSION_MISMATCH")
            }
        };
        AppError::Http {
            status,
            code,
            message: err.to_string(),
        }
    }
}
