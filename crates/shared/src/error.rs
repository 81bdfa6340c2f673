use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataUriError {
    #[error("data uri must start with `data:`")]
    MissingScheme,
    #[error("data uri must carry a `;base64,` payload marker")]
    MissingBase64Marker,
    #[error("data uri has an empty mime type")]
    EmptyMimeType,
    #[error("data uri payload is not valid base64: {0}")]
    InvalidPayload(#[from] base64::DecodeError),
}
