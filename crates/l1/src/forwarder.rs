use crate::DETERMINISTIC_DEPLOYER_ADDRESS;
use alloy_primitives::{Address, Bytes, Keccak256};

/// How forwarder contracts are deployed: the CREATE2 deployer and the forwarder creation code.
///
/// A forwarder relays a proposer's transactions. Its address is fully determined by the
/// deployer, the creation code and the proposer, so it can be registered before it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwarderDeployment {
    /// The CREATE2 deployer.
    pub deployer: Address,
    /// The creation code of the forwarder, without constructor arguments.
    pub creation_code: Bytes,
}

impl ForwarderDeployment {
    /// Returns a deployment through the deterministic deployment proxy.
    pub const fn new(creation_code: Bytes) -> Self {
        Self { deployer: DETERMINISTIC_DEPLOYER_ADDRESS, creation_code }
    }

    /// Returns the forwarder address for the proposer.
    pub fn address_for(&self, proposer: Address) -> Address {
        derive_forwarder_address(self.deployer, &self.creation_code, proposer)
    }
}

/// Derives the CREATE2 address of the forwarder owned by `proposer`.
///
/// The salt is the proposer address left-padded to 32 bytes and the init code is the creation
/// code followed by the ABI encoded proposer, which is the same padded word.
pub fn derive_forwarder_address(
    deployer: Address,
    creation_code: &[u8],
    proposer: Address,
) -> Address {
    let salt = proposer.into_word();
    let mut hasher = Keccak256::new();
    hasher.update(creation_code);
    hasher.update(salt);
    deployer.create2(salt, hasher.finalize())
}
