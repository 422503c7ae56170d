use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("no item is being edited")]
    NoItemSelected,
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
