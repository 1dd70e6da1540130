//! Signing of consensus payloads and construction of the L1 accounts of validators.
//!
//! The [`ConsensusSigner`] runs as a task and accepts any `alloy_signer::Signer`, so local keys
//! and remote signers such as AWS KMS are interchangeable. Signatures are produced over the
//! digest of [`ConsensusPayload::payload_to_sign`](rollup_node_primitives::ConsensusPayload),
//! the same bytes the L1 contracts rebuild when verifying attestations.

use std::{ops::ControlFlow, sync::Arc, time::Instant};

use alloy_primitives::Signature;
use futures::stream::{FuturesOrdered, StreamExt};
use tokio::sync::mpsc::UnboundedSender;
use tokio_stream::wrappers::UnboundedReceiverStream;

mod credentials;
pub use credentials::{generate_l1_account, SignerCredentials};

mod error;
pub use error::SignerError;

mod event;
pub use event::SignerEvent;

mod future;
pub use future::{sign_payload, SignerFuture};

mod handle;
pub use handle::SignerHandle;

mod metrics;
pub use metrics::SignerMetrics;

mod requests;
pub use requests::SignerRequest;

type DynSigner = Arc<dyn alloy_signer::Signer<Signature> + Send + Sync>;

/// Signs consensus payloads in the order they are requested.
pub struct ConsensusSigner {
    signer: DynSigner,
    requests: UnboundedReceiverStream<SignerRequest>,
    /// Signatures in flight, yielded in request order.
    pending: FuturesOrdered<SignerFuture>,
    events: UnboundedSender<SignerEvent>,
    metrics: SignerMetrics,
}

impl ConsensusSigner {
    fn new(
        signer: impl alloy_signer::Signer<Signature> + Send + Sync + 'static,
    ) -> (Self, SignerHandle) {
        let (request_tx, request_rx) = tokio::sync::mpsc::unbounded_channel();
        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
        let handle = SignerHandle::new(request_tx, event_rx.into(), signer.address());
        let this = Self {
            signer: Arc::new(signer),
            requests: request_rx.into(),
            pending: FuturesOrdered::new(),
            events: event_tx,
            metrics: SignerMetrics::default(),
        };
        (this, handle)
    }

    /// Spawns the signer onto the tokio runtime and returns its handle.
    pub fn spawn(
        signer: impl alloy_signer::Signer<Signature> + Send + Sync + 'static,
    ) -> SignerHandle {
        let (this, handle) = Self::new(signer);
        tokio::spawn(this.run());
        handle
    }

    /// Builds the local signer from the credentials and spawns it.
    pub fn spawn_with_credentials(
        credentials: &SignerCredentials,
    ) -> Result<SignerHandle, SignerError> {
        Ok(Self::spawn(credentials.build()?))
    }

    async fn run(mut self) {
        loop {
            let flow = tokio::select! {
                Some(request) = self.requests.next() => self.on_request(request),
                Some(result) = self.pending.next(), if !self.pending.is_empty() => {
                    self.on_signed(result)
                }
                else => {
                    tracing::info!(target: "rollup::signer", "request channel closed, stopping signer");
                    ControlFlow::Break(())
                }
            };
            if flow.is_break() {
                break
            }
        }
    }

    fn on_request(&mut self, request: SignerRequest) -> ControlFlow<()> {
        let SignerRequest::SignPayload { payload, domain } = request;
        tracing::trace!(target: "rollup::signer", ?domain, archive = %payload.archive(), "signing payload");

        let signer = self.signer.clone();
        let duration = self.metrics.signing_duration.clone();
        self.pending.push_back(Box::pin(async move {
            let start = Instant::now();
            let result = sign_payload(payload, domain, signer).await;
            duration.record(start.elapsed().as_secs_f64());
            result
        }));
        ControlFlow::Continue(())
    }

    fn on_signed(&mut self, result: Result<SignerEvent, SignerError>) -> ControlFlow<()> {
        match result {
            Ok(event) => {
                self.metrics.signed_payloads.increment(1);
                if self.events.send(event).is_err() {
                    tracing::info!(target: "rollup::signer", "event channel closed, stopping signer");
                    return ControlFlow::Break(())
                }
            }
            Err(err) => {
                self.metrics.signing_failures.increment(1);
                tracing::error!(target: "rollup::signer", ?err, "failed to sign payload");
            }
        }
        ControlFlow::Continue(())
    }
}

impl std::fmt::Debug for ConsensusSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsensusSigner")
            .field("address", &self.signer.address())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_signer_local::PrivateKeySigner;
    use rollup_node_primitives::{ConsensusPayload, SignatureDomainSeparator};

    fn init_test_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    #[tokio::test]
    async fn test_signature_recovers_to_signer() {
        init_test_tracing();
        let key = PrivateKeySigner::random();
        let mut handle = ConsensusSigner::spawn(key.clone());

        let payload = ConsensusPayload::random(3);
        handle.sign_attestation(payload.clone()).unwrap();

        let SignerEvent::SignedPayload { payload: signed, domain, signature } =
            handle.next().await.unwrap();
        let digest = signed.signature_digest(domain);
        let recovered = signature.recover_address_from_msg(digest.as_slice()).unwrap();

        assert_eq!(signed, payload);
        assert_eq!(domain, SignatureDomainSeparator::BlockAttestation);
        assert_eq!(recovered, key.address());
        assert_eq!(handle.address(), key.address());
    }

    #[tokio::test]
    async fn test_requests_are_answered_in_order() {
        init_test_tracing();
        let mut handle = ConsensusSigner::spawn(PrivateKeySigner::random());

        let payload = ConsensusPayload::random(1);
        handle.sign_proposal(payload.clone()).unwrap();
        handle.sign_attestation(payload).unwrap();

        let SignerEvent::SignedPayload { domain: first_domain, signature: first, .. } =
            handle.next().await.unwrap();
        let SignerEvent::SignedPayload { domain: second_domain, signature: second, .. } =
            handle.next().await.unwrap();

        assert_eq!(first_domain, SignatureDomainSeparator::BlockProposal);
        assert_eq!(second_domain, SignatureDomainSeparator::BlockAttestation);
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_spawn_with_credentials() {
        init_test_tracing();
        let credentials = SignerCredentials::from_private_key(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        );
        let handle = ConsensusSigner::spawn_with_credentials(&credentials).unwrap();
        assert_eq!(handle.address(), credentials.build().unwrap().address());

        let err = ConsensusSigner::spawn_with_credentials(&SignerCredentials::default());
        assert!(matches!(err, Err(SignerError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_signer_stops_when_handle_dropped() {
        init_test_tracing();
        let (signer, handle) = ConsensusSigner::new(PrivateKeySigner::random());
        let task = tokio::spawn(signer.run());

        handle.sign_proposal(ConsensusPayload::empty()).unwrap();
        drop(handle);

        task.await.unwrap();
    }
}
