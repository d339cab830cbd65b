use axum::http::StatusCode;

/// Failure modes of the model-backed assistants.
///
/// Network problems, upstream rejections and unusable model output are kept apart so
/// callers can decide what is worth retrying and what should be reported to the user.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("assistant is not configured: OPENAI_API_KEY is missing")]
    NotConfigured,
    #[error("network failure calling the model API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("model API still failing after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<AssistantError>,
    },
    #[error("model returned no content")]
    EmptyContent,
    #[error("model output did not contain a JSON object: {excerpt}")]
    MalformedOutput { excerpt: String },
    #[error("model JSON did not match the expected shape: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported document content type '{0}': only images can be reviewed")]
    UnsupportedDocument(String),
}

impl AssistantError {
    /// Stable machine-readable classification used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AssistantError::NotConfigured => "not_configured",
            AssistantError::Transport(_) => "network_failure",
            AssistantError::Api { .. } => "upstream_error",
            AssistantError::RetriesExhausted { last, .. } => last.kind(),
            AssistantError::EmptyContent
            | AssistantError::MalformedOutput { .. }
            | AssistantError::Parse(_) => "malformed_model_output",
            AssistantError::UnsupportedDocument(_) => "unsupported_document",
        }
    }

    /// HTTP status reported to API callers, shared by every surface that exposes these errors.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AssistantError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AssistantError::UnsupportedDocument(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AssistantError::Transport(_)
            | AssistantError::Api { .. }
            | AssistantError::RetriesExhausted { .. }
            | AssistantError::EmptyContent
            | AssistantError::MalformedOutput { .. }
            | AssistantError::Parse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Whether a fresh attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AssistantError::Transport(_) => true,
            AssistantError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
