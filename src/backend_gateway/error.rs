pub const CONNECT_FAILURE_MESSAGE: &str =
    "Failed to connect to server. Make sure the backend is running.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Server reported: {0}")]
    Application(String),
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("Unexpected response: {0}")]
    Malformed(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// Text for the user: the server's own message when it sent one, a generic one otherwise.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Application(message) => message.clone(),
            GatewayError::Transport(_) | GatewayError::Status { .. } => {
                CONNECT_FAILURE_MESSAGE.to_string()
            }
            GatewayError::Malformed(_) => "Unexpected response from server".to_string(),
            GatewayError::InvalidRequest(message) => message.clone(),
        }
    }
}
