// ========================================================
// File: zoda-core/src/chain/tx.rs
// ========================================================

use k256::ecdsa::SigningKey;
use zoda_common::Error;

use super::abi::keccak256;

/// RLP-encodes a byte string.
pub fn rlp_bytes(data: &[u8]) -> Vec<u8> {
    if data.len() == 1 && data[0] < 0x80 {
        return data.to_vec();
    }
    let mut out = rlp_length_prefix(data.len(), 0x80);
    out.extend_from_slice(data);
    out
}

/// RLP-encodes an unsigned integer as its minimal big-endian bytes.
pub fn rlp_uint(value: u128) -> Vec<u8> {
    rlp_bytes(strip_leading_zeros(&value.to_be_bytes()))
}

/// RLP-encodes a list of already-encoded items.
pub fn rlp_list(items: &[Vec<u8>]) -> Vec<u8> {
    let payload_len: usize = items.iter().map(|i| i.len()).sum();
    let mut out = rlp_length_prefix(payload_len, 0xc0);
    for item in items {
        out.extend_from_slice(item);
    }
    out
}

fn rlp_length_prefix(len: usize, offset: u8) -> Vec<u8> {
    if len <= 55 {
        vec![offset + len as u8]
    } else {
        let len_bytes = strip_leading_zeros(&(len as u64).to_be_bytes()).to_vec();
        let mut out = vec![offset + 55 + len_bytes.len() as u8];
        out.extend_from_slice(&len_bytes);
        out
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

/// A pre-EIP-1559 transaction, signed with EIP-155 replay protection.
/// The target chains accept legacy transactions, which keeps the encoding
/// down to one RLP list.
#[derive(Debug, Clone)]
pub struct LegacyTransaction {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: [u8; 20],
    pub value: u128,
    pub data: Vec<u8>,
    pub chain_id: u64,
}

impl LegacyTransaction {
    /// Digest that gets signed: the keccak of the unsigned fields with the
    /// chain id folded in per EIP-155.
    pub fn sighash(&self) -> [u8; 32] {
        let items = vec![
            rlp_uint(self.nonce as u128),
            rlp_uint(self.gas_price),
            rlp_uint(self.gas_limit as u128),
            rlp_bytes(&self.to),
            rlp_uint(self.value),
            rlp_bytes(&self.data),
            rlp_uint(self.chain_id as u128),
            rlp_uint(0),
            rlp_uint(0),
        ];
        keccak256(&rlp_list(&items))
    }

    /// Signs the transaction and returns the raw bytes for
    /// `eth_sendRawTransaction`.
    pub fn sign(&self, key: &SigningKey) -> Result<Vec<u8>, Error> {
        let digest = self.sighash();
        let (signature, recovery_id) = key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| Error::Chain(format!("transaction signing failed: {}", e)))?;
        let v = self.chain_id * 2 + 35 + u64::from(recovery_id.to_byte());
        let (r, s) = signature.split_bytes();
        let items = vec![
            rlp_uint(self.nonce as u128),
            rlp_uint(self.gas_price),
            rlp_uint(self.gas_limit as u128),
            rlp_bytes(&self.to),
            rlp_uint(self.value),
            rlp_bytes(&self.data),
            rlp_uint(v as u128),
            rlp_bytes(strip_leading_zeros(r.as_slice())),
            rlp_bytes(strip_leading_zeros(s.as_slice())),
        ];
        Ok(rlp_list(&items))
    }
}
