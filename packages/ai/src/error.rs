use thiserror::Error;

/// Why a generation call failed. The kind decides the notice shown to the
/// user, so the mapping from transport/status to kind lives here.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;

/// Map a failing HTTP status to an error kind. Statuses the taxonomy has no
/// name for count as network-level failures.
pub(crate) fn classify_status(status: u16, detail: String) -> GenerationError {
    match status {
        401 | 403 => GenerationError::Auth(detail),
        429 => GenerationError::QuotaExceeded(detail),
        400 => GenerationError::BadRequest(detail),
        404 => GenerationError::ModelNotFound(detail),
        _ => GenerationError::Network(format!("API returned {status}: {detail}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_statuses() {
        assert!(matches!(
            classify_status(401, "bad key".into()),
            GenerationError::Auth(_)
        ));
        assert!(matches!(
            classify_status(403, "forbidden".into()),
            GenerationError::Auth(_)
        ));
        assert!(matches!(
            classify_status(429, "slow down".into()),
            GenerationError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify_status(400, "bad body".into()),
            GenerationError::BadRequest(_)
        ));
        assert!(matches!(
            classify_status(404, "no model".into()),
            GenerationError::ModelNotFound(_)
        ));
    }

    #[test]
    fn test_unclassified_status_is_network() {
        let error = classify_status(500, "boom".into());
        match error {
            GenerationError::Network(detail) => {
                assert!(detail.contains("500"));
                assert!(detail.contains("boom"));
            }
            other => panic!("expected Network, got {other:?}"),
        }
    }
}
