use thiserror::Error;

/// Failure of a page/DOM operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Element not found: {0}")]
    MissingElement(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// The background request never produced a response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Network request failed: {0}")]
pub struct TransportError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeadFormError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Fallback submission failed: {0}")]
    Fallback(HostError),
}
