use super::{SignerError, SignerEvent};
use alloy_primitives::Signature;
use rollup_node_primitives::{ConsensusPayload, SignatureDomainSeparator};
use std::{future::Future, pin::Pin, sync::Arc};

/// A type alias for a future that resolves to a `SignerEvent` or a `SignerError`.
pub type SignerFuture = Pin<Box<dyn Future<Output = Result<SignerEvent, SignerError>> + Send>>;

/// A future that signs a consensus payload using the provided signer.
///
/// The digest of the payload is signed as an EIP-191 personal message, which is how the L1
/// contracts recover the signer.
pub fn sign_payload(
    payload: ConsensusPayload,
    domain: SignatureDomainSeparator,
    signer: Arc<dyn alloy_signer::Signer<Signature> + Send + Sync>,
) -> SignerFuture {
    Box::pin(async move {
        let digest = payload.signature_digest(domain);
        let signature = signer.sign_message(digest.as_slice()).await?;
        Ok(SignerEvent::SignedPayload { payload, domain, signature })
    })
}
