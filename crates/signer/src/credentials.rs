use crate::SignerError;
use alloy_primitives::{Address, B256};
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};

/// The key material an L1 account is built from: exactly one of a private key or a mnemonic.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignerCredentials {
    /// The hex encoded private key.
    pub private_key: Option<String>,
    /// The mnemonic seed phrase.
    pub mnemonic: Option<String>,
    /// The index of the account derived from the mnemonic.
    pub mnemonic_index: u32,
}

impl SignerCredentials {
    /// Returns credentials for the provided private key.
    pub fn from_private_key(private_key: impl Into<String>) -> Self {
        Self { private_key: Some(private_key.into()), ..Default::default() }
    }

    /// Returns credentials for the first account of the provided mnemonic.
    pub fn from_mnemonic(mnemonic: impl Into<String>) -> Self {
        Self { mnemonic: Some(mnemonic.into()), ..Default::default() }
    }

    /// Builds the local signer.
    ///
    /// Fails with [`SignerError::Configuration`] if neither or both of the private key and the
    /// mnemonic are set. Mnemonic accounts are derived along the default BIP-44 path.
    pub fn build(&self) -> Result<PrivateKeySigner, SignerError> {
        match (&self.private_key, &self.mnemonic) {
            (Some(key), None) => Ok(key.trim().parse::<PrivateKeySigner>()?),
            (None, Some(mnemonic)) => Ok(MnemonicBuilder::<English>::default()
                .phrase(mnemonic.trim())
                .index(self.mnemonic_index)?
                .build()?),
            (None, None) => {
                Err(SignerError::Configuration("either a private key or a mnemonic is required"))
            }
            (Some(_), Some(_)) => {
                Err(SignerError::Configuration("only one of a private key or a mnemonic is allowed"))
            }
        }
    }
}

impl std::fmt::Debug for SignerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerCredentials")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("mnemonic_index", &self.mnemonic_index)
            .finish()
    }
}

/// Generates a new random L1 account and returns its private key and address.
pub fn generate_l1_account() -> (B256, Address) {
    let signer = PrivateKeySigner::random();
    (signer.to_bytes(), signer.address())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ANVIL_MNEMONIC: &str = "test test test test test test test test test test test junk";
    const ANVIL_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    #[test]
    fn test_private_key_credentials() {
        let signer = SignerCredentials::from_private_key(ANVIL_KEY).build().unwrap();
        assert_eq!(signer.address(), ANVIL_ADDRESS);
    }

    #[test]
    fn test_mnemonic_credentials() {
        let signer = SignerCredentials::from_mnemonic(ANVIL_MNEMONIC).build().unwrap();
        assert_eq!(signer.address(), ANVIL_ADDRESS);

        let second =
            SignerCredentials { mnemonic_index: 1, ..SignerCredentials::from_mnemonic(ANVIL_MNEMONIC) };
        assert_eq!(
            second.build().unwrap().address(),
            address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")
        );
    }

    #[test]
    fn test_missing_credentials() {
        let err = SignerCredentials::default().build().unwrap_err();
        assert!(matches!(err, SignerError::Configuration(_)));
    }

    #[test]
    fn test_ambiguous_credentials() {
        let credentials = SignerCredentials {
            private_key: Some(ANVIL_KEY.into()),
            mnemonic: Some(ANVIL_MNEMONIC.into()),
            mnemonic_index: 0,
        };
        assert!(matches!(credentials.build().unwrap_err(), SignerError::Configuration(_)));
    }

    #[test]
    fn test_invalid_private_key() {
        let err = SignerCredentials::from_private_key("0x1234").build().unwrap_err();
        assert!(matches!(err, SignerError::InvalidKey(_)));
    }

    #[test]
    fn test_generate_l1_account() {
        let (key, address) = generate_l1_account();
        let signer = SignerCredentials::from_private_key(key.to_string()).build().unwrap();

        assert_eq!(signer.address(), address);
        assert_ne!(generate_l1_account().1, address);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", SignerCredentials::from_private_key(ANVIL_KEY));
        assert!(!debug.contains("ac0974"));
    }
}
