use alloy_primitives::B256;
use alloy_provider::PendingTransactionError;
use alloy_transport::{RpcError, TransportErrorKind};
use rollup_l1::{is_timestamp_rejection, RevertReason};
use rollup_node_primitives::ClockError;

/// An error occurring at the L1 providers.
#[derive(Debug, thiserror::Error)]
pub enum L1ProviderError {
    /// L1 RPC error.
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// The call or transaction reverted on chain.
    #[error("execution reverted (tx: {tx_hash:?}, reason: {reason:?})")]
    Revert {
        /// The hash of the reverted transaction, if it was mined.
        tx_hash: Option<B256>,
        /// The decoded reason, if the chain returned one.
        reason: Option<RevertReason>,
    },
    /// The transaction was not confirmed in time. It may still land on chain.
    #[error("transaction {tx_hash} not confirmed in time")]
    ConfirmationTimeout {
        /// The hash of the pending transaction.
        tx_hash: B256,
    },
    /// Error watching a pending transaction.
    #[error(transparent)]
    PendingTransaction(#[from] PendingTransactionError),
    /// Error decoding the return data of a contract call.
    #[error("abi decoding error: {0}")]
    AbiDecode(#[from] alloy_sol_types::Error),
    /// Error deriving the rollup timeline.
    #[error(transparent)]
    Clock(#[from] ClockError),
    /// Other error.
    #[error("{0}")]
    Other(&'static str),
}

impl L1ProviderError {
    /// Converts an RPC error, lifting revert data carried by an error response into
    /// [`L1ProviderError::Revert`].
    pub fn from_rpc(err: RpcError<TransportErrorKind>) -> Self {
        match err.as_error_resp().and_then(|payload| payload.as_revert_data()) {
            Some(data) => Self::Revert { tx_hash: None, reason: Some(RevertReason::decode(&data)) },
            None => Self::Rpc(err),
        }
    }

    /// Returns the decoded revert reason, if the error is a revert with a known reason.
    pub const fn revert_reason(&self) -> Option<&RevertReason> {
        match self {
            Self::Revert { reason, .. } => reason.as_ref(),
            _ => None,
        }
    }

    /// Returns true if the node rejected a block timestamp that does not advance the chain.
    pub fn is_timestamp_rejection(&self) -> bool {
        match self {
            Self::Rpc(RpcError::ErrorResp(payload)) => is_timestamp_rejection(&payload.message),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_json_rpc::ErrorPayload;
    use alloy_sol_types::SolError;
    use rollup_l1::IRollup;

    fn error_resp(message: &'static str, data: Option<&str>) -> RpcError<TransportErrorKind> {
        let data = data.map(|d| serde_json::value::to_raw_value(d).expect("valid json string"));
        RpcError::ErrorResp(ErrorPayload { code: 3, message: message.into(), data })
    }

    #[test]
    fn test_revert_data_is_decoded() {
        let data = alloy_primitives::hex::encode_prefixed(
            IRollup::Rollup__NothingToPrune {}.abi_encode(),
        );
        let err = L1ProviderError::from_rpc(error_resp("execution reverted", Some(&data)));

        assert_eq!(err.revert_reason(), Some(&RevertReason::NothingToPrune));
    }

    #[test]
    fn test_plain_error_is_kept() {
        let err = L1ProviderError::from_rpc(error_resp("nonce too low", None));

        assert!(matches!(err, L1ProviderError::Rpc(_)));
        assert!(err.revert_reason().is_none());
    }

    #[test]
    fn test_timestamp_rejection() {
        let err = L1ProviderError::from_rpc(error_resp(
            "Timestamp error: 10 is lower than or equal to previous block's timestamp 20",
            None,
        ));
        assert!(err.is_timestamp_rejection());
        assert!(!L1ProviderError::Other("other").is_timestamp_rejection());
    }
}
