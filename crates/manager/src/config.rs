use alloy_primitives::U256;
use rollup_l1::{ForwarderDeployment, TEST_NETWORK_PROPOSER_BALANCE};
use std::time::Duration;

/// The default time to wait for a submitted transaction to be included.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// The configuration of the [`ValidatorSetManager`](crate::ValidatorSetManager).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    /// How long to wait for a submitted transaction to be included.
    pub confirmation_timeout: Duration,
    /// The balance credited to admitted proposers on a test network.
    pub test_network_balance: U256,
    /// How forwarder contracts are deployed. Required to admit validators.
    pub forwarder: Option<ForwarderDeployment>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            test_network_balance: TEST_NETWORK_PROPOSER_BALANCE,
            forwarder: None,
        }
    }
}

impl ManagerConfig {
    /// Sets the forwarder deployment.
    pub fn with_forwarder(mut self, forwarder: ForwarderDeployment) -> Self {
        self.forwarder = Some(forwarder);
        self
    }

    /// Sets the confirmation timeout.
    pub const fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }
}
