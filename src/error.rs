use thiserror::Error;

/// Main error type for the proxy.
///
/// Variants split along the boundaries callers care about: client input
/// (rejected before any network call), configuration, the two upstream
/// failure modes, and a catch-all that exposes nothing past its message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Completion API error: {message}")]
    UpstreamApi { message: String },

    #[error("Completion API transport error: {0}")]
    UpstreamTransport(String),

    #[error("Trip service error: {0}")]
    TripService(String),

    #[error("Failed to parse itinerary response from AI: {message}")]
    MalformedReply { message: String, raw: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Internal(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Config(_) => "CONFIG_ERROR",
            ApiError::UpstreamApi { .. } => "UPSTREAM_API_ERROR",
            ApiError::UpstreamTransport(_) => "UPSTREAM_TRANSPORT_ERROR",
            ApiError::TripService(_) => "TRIP_SERVICE_ERROR",
            ApiError::MalformedReply { .. } => "MALFORMED_REPLY",
            ApiError::Serialization(_) => "SERIALIZATION_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status the error maps to at the service boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidInput(_) => 400,
            ApiError::Config(_) => 500,
            ApiError::UpstreamApi { .. }
            | ApiError::UpstreamTransport(_)
            | ApiError::TripService(_)
            | ApiError::MalformedReply { .. } => 502,
            ApiError::Serialization(_) | ApiError::Internal(_) => 500,
        }
    }
}
