use alloy_primitives::{address, Address, U256};

/// The address of the deterministic deployment proxy used to deploy forwarder contracts with
/// CREATE2.
pub const DETERMINISTIC_DEPLOYER_ADDRESS: Address =
    address!("4e59b44847b379578588920cA78FbF26c0B4956C");

/// The chain id of a local anvil node.
pub const ANVIL_CHAIN_ID: u64 = 31337;

/// The balance credited to a freshly admitted proposer on a test network: 10^20 wei.
pub const TEST_NETWORK_PROPOSER_BALANCE: U256 = U256::from_limbs([0x6bc7_5e2d_6310_0000, 5, 0, 0]);

/// Returns true if the chain id belongs to a local test network that accepts cheat codes.
pub const fn is_test_network(chain_id: u64) -> bool {
    chain_id == ANVIL_CHAIN_ID
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposer_balance() {
        assert_eq!(TEST_NETWORK_PROPOSER_BALANCE, U256::from(10).pow(U256::from(20)));
    }

    #[test]
    fn test_is_test_network() {
        assert!(is_test_network(31337));
        assert!(!is_test_network(1));
        assert!(!is_test_network(11155111));
    }
}
