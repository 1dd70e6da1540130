use metrics::{Counter, Histogram};
use metrics_derive::Metrics;

/// The metrics for the [`ConsensusSigner`](crate::ConsensusSigner).
#[derive(Metrics, Clone)]
#[metrics(scope = "rollup_signer")]
pub struct SignerMetrics {
    /// The time it takes to sign a consensus payload.
    pub signing_duration: Histogram,
    /// The number of payloads signed.
    pub signed_payloads: Counter,
    /// The number of failed signing requests.
    pub signing_failures: Counter,
}
