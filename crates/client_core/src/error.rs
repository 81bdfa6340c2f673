use shared::domain::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key missing; set API_KEY to enable image generation")]
    MissingCredential,
    #[error("image generation already in progress")]
    Busy,
    #[error("unknown product {0}")]
    UnknownProduct(ProductId),
    #[error("invalid image service endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("image service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("image service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("malformed image service response: {0}")]
    MalformedResponse(String),
}

/// Payload-free copy of a [`GenerationError`] variant, cheap to broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    MissingCredential,
    Busy,
    UnknownProduct,
    InvalidEndpoint,
    Transport,
    Rejected { status: u16 },
    MalformedResponse,
}

impl GenerationErrorKind {
    /// Kinds that stop a trigger before any request is issued.
    pub fn is_precondition(self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::Busy | Self::UnknownProduct
        )
    }
}

impl GenerationError {
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            Self::MissingCredential => GenerationErrorKind::MissingCredential,
            Self::Busy => GenerationErrorKind::Busy,
            Self::UnknownProduct(_) => GenerationErrorKind::UnknownProduct,
            Self::InvalidEndpoint(_) => GenerationErrorKind::InvalidEndpoint,
            Self::Transport(_) => GenerationErrorKind::Transport,
            Self::Rejected { status, .. } => GenerationErrorKind::Rejected { status: *status },
            Self::MalformedResponse(_) => GenerationErrorKind::MalformedResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_keeps_rejection_status() {
        let err = GenerationError::Rejected {
            status: 429,
            message: "Resource has been exhausted".into(),
        };
        assert_eq!(err.kind(), GenerationErrorKind::Rejected { status: 429 });
        assert!(!err.kind().is_precondition());
    }

    #[test]
    fn precondition_kinds_are_the_pre_request_failures() {
        assert!(GenerationError::MissingCredential.kind().is_precondition());
        assert!(GenerationError::Busy.kind().is_precondition());
        assert!(GenerationError::UnknownProduct(ProductId::new("p9"))
            .kind()
            .is_precondition());
        assert!(!GenerationError::MalformedResponse("x".into())
            .kind()
            .is_precondition());
    }
}
