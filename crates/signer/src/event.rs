use alloy_primitives::Signature;
use rollup_node_primitives::{ConsensusPayload, SignatureDomainSeparator};

/// An enum representing the events that can be emitted by the signer.
#[derive(Debug, Clone)]
pub enum SignerEvent {
    /// A consensus payload has been signed by the signer.
    SignedPayload {
        /// The signed payload.
        payload: ConsensusPayload,
        /// The domain the payload was signed in.
        domain: SignatureDomainSeparator,
        /// The signature over the payload digest.
        signature: Signature,
    },
}
