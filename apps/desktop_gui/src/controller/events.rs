//! Backend-to-UI events and error modeling for the dashboard.

use client_core::{ClientError, ControllerState};

pub enum UiEvent {
    Info(String),
    /// Snapshot of the controller after each applied command.
    StateChanged(ControllerState),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    NotFound,
    Rejected,
    Server,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Load,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    /// Error raised by the GUI itself rather than by a catalog call.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context,
            message: message.into(),
        }
    }

    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Http(inner) if inner.is_decode() => UiErrorCategory::Server,
            ClientError::Http(_) => UiErrorCategory::Transport,
            ClientError::Status { status: 404, .. } => UiErrorCategory::NotFound,
            ClientError::Status { status, .. } if (400..500).contains(status) => {
                UiErrorCategory::Rejected
            }
            ClientError::Status { .. } => UiErrorCategory::Server,
            ClientError::InvalidBaseUrl { .. } | ClientError::NoItemSelected => {
                UiErrorCategory::Validation
            }
        };

        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line text for the status bar.
    pub fn summary(&self) -> String {
        let action = match self.context {
            UiErrorContext::BackendStartup => "Backend worker failed to start",
            UiErrorContext::Load => "Could not load the menu",
            UiErrorContext::Create => "Could not add the item",
            UiErrorContext::Update => "Could not save the item",
            UiErrorContext::Delete => {
                "Delete failed on the server; the item was removed from the list anyway"
            }
        };
        let hint = match self.category {
            UiErrorCategory::Transport => "server unreachable; check --server-url and retry",
            UiErrorCategory::NotFound => "the item no longer exists on the server",
            UiErrorCategory::Rejected => "the server rejected the request",
            UiErrorCategory::Server => "the server failed to handle the request",
            UiErrorCategory::Validation | UiErrorCategory::Unknown => self.message.as_str(),
        };
        format!("{action}: {hint}")
    }
}
