use serde::{Deserialize, Serialize};

use stayscope_ai::GenerationError;

/// User-facing copy shown when a report run fails. The funnel stays on the
/// conversation with every answer intact, so the message only has to explain
/// what to do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNotice {
    pub title: String,
    pub message: String,
}

impl FlowNotice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Pick the copy for a failed generation by its error kind
    pub fn from_error(error: &GenerationError) -> Self {
        let (title, message) = match error {
            GenerationError::Auth(_) => (
                "API key error",
                "Check the API key configuration. OPENAI_API_KEY must hold a valid key.",
            ),
            GenerationError::QuotaExceeded(_) => (
                "Service quota exceeded",
                "The service is temporarily over its usage limit. Try again in a moment.",
            ),
            GenerationError::BadRequest(_) => (
                "Request rejected",
                "The report request was not accepted. Adjust the answers and try again.",
            ),
            GenerationError::ModelNotFound(_) => (
                "Model not found",
                "The configured model is unavailable. Check the model name.",
            ),
            GenerationError::Network(_) => (
                "Network error",
                "Check the internet connection and try again.",
            ),
            GenerationError::MalformedResponse(_) => (
                "Report failed",
                "The report came back in an unexpected shape. Try again.",
            ),
        };
        Self::new(title, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_kind_has_distinct_copy() {
        let errors = [
            GenerationError::Auth("x".into()),
            GenerationError::QuotaExceeded("x".into()),
            GenerationError::BadRequest("x".into()),
            GenerationError::ModelNotFound("x".into()),
            GenerationError::Network("x".into()),
            GenerationError::MalformedResponse("x".into()),
        ];
        let titles: Vec<String> = errors
            .iter()
            .map(|e| FlowNotice::from_error(e).title)
            .collect();
        let mut unique = titles.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), titles.len());
    }

    #[test]
    fn test_auth_notice_points_at_the_key() {
        let notice = FlowNotice::from_error(&GenerationError::Auth("401".into()));
        assert_eq!(notice.title, "API key error");
        assert!(notice.message.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_quota_notice_suggests_retrying_later() {
        let notice = FlowNotice::from_error(&GenerationError::QuotaExceeded("429".into()));
        assert_eq!(notice.title, "Service quota exceeded");
        assert!(notice.message.contains("Try again"));
    }
}
