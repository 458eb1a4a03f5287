use reqwest::StatusCode;

/// Failure reported by the backend for a single request.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Service unavailable")]
    Unavailable,

    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("session missing or expired"))]
    Unauthorized(Option<String>),

    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: StatusCode,
        message: Option<String>,
    },
}

impl ApiError {
    /// Message the backend attached to the failure, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unavailable => None,
            ApiError::Unauthorized(v) => v.as_deref(),
            ApiError::Server { message, .. } => message.as_deref(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Server { status, .. } => *status,
        }
    }
}

/// Looks through the report chain for an [`ApiError`] and returns the
/// backend message it carries.
pub fn server_message(err: &eyre::Report) -> Option<&str> {
    err.chain()
        .find_map(|x| x.downcast_ref::<ApiError>())
        .and_then(|x| x.server_message())
}
