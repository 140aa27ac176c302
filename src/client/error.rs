//! Client-side error taxonomy
//!
//! Mirrors the server's error body so callers can branch on status, code and
//! `retryAfter` the way the pages do.

use serde::Deserialize;
use thiserror::Error;

use crate::pdf::UploadError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("MindMentor API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx reply
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        retry_after: Option<u64>,
    },

    /// 2xx reply that reported `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Refused before sending
    #[error("{0}")]
    InvalidUpload(#[from] UploadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Map transport failures onto the connection variants
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }

    /// Build from a failed response's status and body text
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let (code, message) = match envelope.error {
                    Some(ErrorField::Detailed { code, message }) => (code, message),
                    Some(ErrorField::Plain(text)) => (Some(text.clone()), Some(text)),
                    None => (None, None),
                };
                ClientError::Api {
                    status,
                    code,
                    message: envelope
                        .message
                        .or(message)
                        .unwrap_or_else(|| format!("HTTP {}", status)),
                    retry_after: envelope.retry_after,
                }
            }
            Err(_) => ClientError::Api {
                status,
                code: None,
                message: if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.trim().to_string()
                },
                retry_after: None,
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn retry_after(&self) -> Option<u64> {
        match self {
            ClientError::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// 429, and also 413, count as the AI rate limit
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.status(), Some(429) | Some(413))
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorField>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "retryAfter")]
    retry_after: Option<u64>,
}

/// `error` is an object from this server, a bare string from older ones
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Detailed {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
    Plain(String),
}
