use rollup_node_primitives::{ConsensusPayload, SignatureDomainSeparator};

/// An enum representing the requests that can be sent to the signer.
#[derive(Debug)]
pub enum SignerRequest {
    /// Request to sign a consensus payload in the provided domain.
    SignPayload {
        /// The payload to sign.
        payload: ConsensusPayload,
        /// The domain the payload is signed in.
        domain: SignatureDomainSeparator,
    },
}
