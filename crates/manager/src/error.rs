use rollup_node_primitives::ClockError;
use rollup_node_providers::L1ProviderError;

/// An error occurring at the [`ValidatorSetManager`](crate::ValidatorSetManager).
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    /// An error at the L1 provider.
    #[error(transparent)]
    L1Provider(#[from] L1ProviderError),
    /// An error deriving the rollup timeline.
    #[error(transparent)]
    Clock(#[from] ClockError),
    /// Validators cannot be admitted without the forwarder creation code.
    #[error("missing forwarder creation code")]
    MissingForwarderCode,
    /// The operation requires cheat codes only available on a test network.
    #[error("chain {chain_id} is not a test network")]
    NotTestNetwork {
        /// The chain id of the L1.
        chain_id: u64,
    },
}

impl ManagerError {
    /// Returns the underlying provider error, if any.
    pub const fn as_provider_error(&self) -> Option<&L1ProviderError> {
        match self {
            Self::L1Provider(err) => Some(err),
            _ => None,
        }
    }
}
