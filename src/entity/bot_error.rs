/// Errors surfaced to the chat as a retryable alert.
///
/// Transport, decode and persistence failures all end up here; none of them
/// are fatal to the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Bad request")]
    BadRequest,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Too many requests, please try again later")]
    RateLimited,

    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Telegram API error: {0}")]
    TelegramApi(#[from] teloxide::RequestError),
}

impl BotError {
    /// Map a non-success HTTP status to the transport taxonomy.
    pub fn from_status(status: u16, resource: &str) -> Self {
        match status {
            400 => BotError::BadRequest,
            401 | 403 => BotError::Unauthorized,
            404 => BotError::NotFound(resource.to_string()),
            429 => BotError::RateLimited,
            code => BotError::UnexpectedStatus(code),
        }
    }

    /// Whether the failure came from the price API rather than local storage.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BotError::Network(_)
                | BotError::BadRequest
                | BotError::Unauthorized
                | BotError::NotFound(_)
                | BotError::RateLimited
                | BotError::UnexpectedStatus(_)
        )
    }
}
