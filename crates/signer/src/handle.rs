use crate::{SignerError, SignerEvent, SignerRequest};
use std::{
    pin::Pin,
    task::{Context, Poll},
};

use alloy_primitives::Address;
use futures::Stream;
use rollup_node_primitives::{ConsensusPayload, SignatureDomainSeparator};
use tokio::sync::mpsc::UnboundedSender;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// The handle to a running [`ConsensusSigner`](crate::ConsensusSigner).
///
/// Requests are queued without waiting and the signed payloads are yielded by the handle, which
/// is a [`Stream`] of [`SignerEvent`]. Dropping the handle stops the signer.
#[derive(Debug)]
pub struct SignerHandle {
    requests: UnboundedSender<SignerRequest>,
    events: UnboundedReceiverStream<SignerEvent>,
    address: Address,
}

impl SignerHandle {
    pub(crate) const fn new(
        requests: UnboundedSender<SignerRequest>,
        events: UnboundedReceiverStream<SignerEvent>,
        address: Address,
    ) -> Self {
        Self { requests, events, address }
    }

    /// Returns the address signatures recover to.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Queues the payload to be signed in the provided domain.
    pub fn sign_payload(
        &self,
        payload: ConsensusPayload,
        domain: SignatureDomainSeparator,
    ) -> Result<(), SignerError> {
        self.requests
            .send(SignerRequest::SignPayload { payload, domain })
            .map_err(|_| SignerError::RequestChannelClosed)
    }

    /// Queues the payload to be signed as a block proposal.
    pub fn sign_proposal(&self, payload: ConsensusPayload) -> Result<(), SignerError> {
        self.sign_payload(payload, SignatureDomainSeparator::BlockProposal)
    }

    /// Queues the payload to be signed as a block attestation.
    pub fn sign_attestation(&self, payload: ConsensusPayload) -> Result<(), SignerError> {
        self.sign_payload(payload, SignatureDomainSeparator::BlockAttestation)
    }
}

impl Stream for SignerHandle {
    type Item = SignerEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.events).poll_next(cx)
    }
}
