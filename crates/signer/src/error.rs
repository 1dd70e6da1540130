/// An enum representing the errors that can occur in the signer.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// An error occurred while signing.
    #[error("Failed to sign: {0}")]
    SigningError(#[from] alloy_signer::Error),
    /// The signer could not be built from the provided key material.
    #[error("Invalid signer key: {0}")]
    InvalidKey(#[from] alloy_signer_local::LocalSignerError),
    /// The signer credentials are missing or ambiguous.
    #[error("Configuration error: {0}")]
    Configuration(&'static str),
    /// The Signer request channel was closed.
    #[error("Request channel closed")]
    RequestChannelClosed,
}
