//! Toast notifications
//!
//! The fixed set of messages the resource, plan, note and PDF pages show,
//! including how a failed resource request is classified.

use std::fmt;

use crate::api::error::RESOURCE_EXISTS;
use crate::client::ClientError;

/// Element the page scrolls to when resources already exist
pub const STORED_RESOURCES_ANCHOR: &str = "stored-resources";

/// Seconds assumed when a rate-limited reply carries no `retryAfter`
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastAction {
    /// Scroll the element with this id into view
    ScrollTo(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub variant: ToastVariant,
    pub title: String,
    pub description: String,
    pub action: Option<ToastAction>,
}

impl Toast {
    fn new(variant: ToastVariant, title: &str, description: impl Into<String>) -> Self {
        Self {
            variant,
            title: title.to_string(),
            description: description.into(),
            action: None,
        }
    }

    pub fn success(description: impl Into<String>) -> Self {
        Self::new(ToastVariant::Success, "Success", description)
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::new(ToastVariant::Error, "Error", description)
    }

    pub fn is_error(&self) -> bool {
        self.variant == ToastVariant::Error
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Which list page a toast belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Resources,
    Plans,
}

impl ListKind {
    fn noun(self) -> &'static str {
        match self {
            ListKind::Resources => "resources",
            ListKind::Plans => "study plans",
        }
    }
}

pub fn fetch_failed(kind: ListKind) -> Toast {
    Toast::error(format!(
        "Failed to fetch {}. Please try again.",
        kind.noun()
    ))
}

/// `retryAfter` seconds rounded up to whole minutes, pluralized
pub fn rate_limit_message(retry_after: Option<u64>) -> String {
    let secs = match retry_after {
        Some(secs) if secs > 0 => secs,
        _ => DEFAULT_RETRY_AFTER_SECS,
    };
    let minutes = secs.div_ceil(60);
    format!(
        "Please try again in {} minute{}. Our AI service has reached its limit.",
        minutes,
        if minutes > 1 { "s" } else { "" }
    )
}

pub fn rate_limited(retry_after: Option<u64>) -> Toast {
    Toast::new(
        ToastVariant::Error,
        "Rate Limit Exceeded",
        rate_limit_message(retry_after),
    )
}

/// A resource set for the subject already exists: informational, with a
/// scroll to the stored list
pub fn resources_exist(message: Option<&str>) -> Toast {
    let description = message
        .filter(|m| !m.is_empty())
        .unwrap_or("You already have resources for this subject.");
    Toast {
        action: Some(ToastAction::ScrollTo(STORED_RESOURCES_ANCHOR)),
        ..Toast::new(ToastVariant::Default, "Resources Already Exist", description)
    }
}

/// Classify a failed `create_curated_resources` call
pub fn resource_create_failed(err: &ClientError) -> Toast {
    if err.is_rate_limited() {
        return rate_limited(err.retry_after());
    }

    if err.code() == Some(RESOURCE_EXISTS) {
        let message = match err {
            ClientError::Api { message, .. } => Some(message.as_str()),
            _ => None,
        };
        return resources_exist(message);
    }

    let message = err.to_string();
    if message.is_empty() {
        Toast::error("Failed to create resources. Please try again.")
    } else {
        Toast::error(message)
    }
}

pub fn resources_created() -> Toast {
    Toast::success("Resources created successfully.")
}

pub fn resource_deleted() -> Toast {
    Toast::success("Resource deleted successfully.")
}

/// Server message when present, else the stock text
pub fn plan_deactivated(message: Option<&str>) -> Toast {
    Toast::success(
        message
            .filter(|m| !m.is_empty())
            .unwrap_or("Study plan deactivated successfully."),
    )
}

pub fn plan_deactivate_failed(err: &ClientError) -> Toast {
    let message = err.to_string();
    if message.is_empty() {
        Toast::error("Failed to deactivate study plan. Please try again.")
    } else {
        Toast::error(message)
    }
}

pub fn notes_load_failed() -> Toast {
    Toast::error("Failed to load notes")
}

pub fn pdf_uploaded() -> Toast {
    Toast::success("PDF uploaded successfully")
}

pub fn pdf_deleted() -> Toast {
    Toast::success("Document deleted successfully")
}

/// Upload validation and server failures both surface as the error text
pub fn pdf_upload_failed(err: &ClientError) -> Toast {
    Toast::error(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::UploadError;

    fn api_error(status: u16, code: Option<&str>, message: &str, retry_after: Option<u64>) -> ClientError {
        ClientError::Api {
            status,
            code: code.map(str::to_string),
            message: message.to_string(),
            retry_after,
        }
    }

    #[test]
    fn test_rate_limit_message_pluralization() {
        assert_eq!(
            rate_limit_message(Some(60)),
            "Please try again in 1 minute. Our AI service has reached its limit."
        );
        assert_eq!(
            rate_limit_message(Some(61)),
            "Please try again in 2 minutes. Our AI service has reached its limit."
        );
        assert_eq!(
            rate_limit_message(Some(1)),
            "Please try again in 1 minute. Our AI service has reached its limit."
        );
        // Missing value defaults to 60 seconds
        assert_eq!(rate_limit_message(None), rate_limit_message(Some(60)));
    }

    #[test]
    fn test_rate_limit_classification() {
        let toast = resource_create_failed(&api_error(429, Some("RATE_LIMITED"), "slow down", Some(600)));
        assert_eq!(toast.title, "Rate Limit Exceeded");
        assert!(toast.description.contains("10 minutes"));
        assert!(toast.is_error());

        // 413 is treated the same way
        let toast = resource_create_failed(&api_error(413, None, "too large", None));
        assert_eq!(toast.title, "Rate Limit Exceeded");
        assert!(toast.description.contains("1 minute."));
    }

    #[test]
    fn test_resource_exists_is_not_an_error() {
        let toast = resource_create_failed(&api_error(
            409,
            Some(RESOURCE_EXISTS),
            "You already have resources for Rust",
            None,
        ));
        assert_eq!(toast.variant, ToastVariant::Default);
        assert_eq!(toast.title, "Resources Already Exist");
        assert_eq!(toast.description, "You already have resources for Rust");
        assert_eq!(toast.action, Some(ToastAction::ScrollTo("stored-resources")));

        let fallback = resources_exist(None);
        assert_eq!(fallback.description, "You already have resources for this subject.");
    }

    #[test]
    fn test_other_errors_use_message() {
        let toast = resource_create_failed(&api_error(500, Some("INTERNAL_ERROR"), "boom", None));
        assert!(toast.is_error());
        assert_eq!(toast.description, "boom");
    }

    #[test]
    fn test_fetch_failed_messages() {
        assert_eq!(
            fetch_failed(ListKind::Resources).description,
            "Failed to fetch resources. Please try again."
        );
        assert_eq!(
            fetch_failed(ListKind::Plans).description,
            "Failed to fetch study plans. Please try again."
        );
    }

    #[test]
    fn test_plan_toasts() {
        assert_eq!(plan_deactivated(None).description, "Study plan deactivated successfully.");
        assert_eq!(plan_deactivated(Some("Plan archived")).description, "Plan archived");
        assert_eq!(
            plan_deactivate_failed(&ClientError::Rejected("nope".into())).description,
            "nope"
        );
    }

    #[test]
    fn test_pdf_upload_failure_text() {
        let toast = pdf_upload_failed(&ClientError::InvalidUpload(UploadError::TooLarge));
        assert_eq!(toast.description, "File size must be less than 10MB");
        assert_eq!(toast.to_string(), "Error: File size must be less than 10MB");
    }
}
