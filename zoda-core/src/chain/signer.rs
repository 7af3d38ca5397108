// ========================================================
// File: zoda-core/src/chain/signer.rs
// ========================================================

use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use zoda_common::Error;

use super::abi::keccak256;

/// Local secp256k1 key that signs mint transactions on the server's
/// behalf.
pub struct PrivateKeySigner {
    key: SigningKey,
    address: [u8; 20],
}

impl PrivateKeySigner {
    /// Parses a 32-byte private key from hex, with or without a `0x`
    /// prefix.
    pub fn from_hex(private_key: &str) -> Result<Self, Error> {
        let digits = private_key.trim().trim_start_matches("0x");
        let bytes = hex::decode(digits)
            .map_err(|e| Error::Config(format!("private key is not valid hex: {}", e)))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|e| Error::Config(format!("private key rejected: {}", e)))?;
        let address = derive_address(&key);
        Ok(Self { key, address })
    }

    pub fn key(&self) -> &SigningKey {
        &self.key
    }

    pub fn address(&self) -> [u8; 20] {
        self.address
    }

    /// Checksummed casing is not required by the RPC surface, so the
    /// address is rendered lowercase.
    pub fn address_hex(&self) -> String {
        format!("0x{}", hex::encode(self.address))
    }
}

fn derive_address(key: &SigningKey) -> [u8; 20] {
    let point = key.verifying_key().to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_KNOWN_KEY: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_address_derivation() {
        let signer = PrivateKeySigner::from_hex(WELL_KNOWN_KEY).unwrap();
        assert_eq!(
            signer.address_hex(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_prefix_is_optional() {
        let with_prefix = PrivateKeySigner::from_hex(WELL_KNOWN_KEY).unwrap();
        let without_prefix = PrivateKeySigner::from_hex(&WELL_KNOWN_KEY[2..]).unwrap();
        assert_eq!(with_prefix.address(), without_prefix.address());
    }

    #[test]
    fn test_invalid_keys_rejected() {
        assert!(matches!(
            PrivateKeySigner::from_hex("0xnothex"),
            Err(Error::Config(_))
        ));
        // Zero is not a valid secp256k1 scalar.
        assert!(matches!(
            PrivateKeySigner::from_hex(&"00".repeat(32)),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            PrivateKeySigner::from_hex("0x1234"),
            Err(Error::Config(_))
        ));
    }
}
