use metrics::{Counter, Histogram};
use metrics_derive::Metrics;

/// The metrics for the [`super::ValidatorSetManager`].
#[derive(Metrics, Clone)]
#[metrics(scope = "validator_set_manager")]
pub struct ManagerMetrics {
    /// The number of submitted transactions.
    pub submitted_transactions: Counter,
    /// The number of transactions that reverted.
    pub reverted_transactions: Counter,
    /// The number of transactions that were not confirmed in time.
    pub timed_out_transactions: Counter,
    /// The time between submission and confirmation.
    pub confirmation_duration: Histogram,
}
