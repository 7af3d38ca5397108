// ========================================================
// File: zoda-core/src/chain/abi.rs
// ========================================================

use sha3::{Digest, Keccak256};
use zoda_common::Error;

pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// First four bytes of the keccak hash of a canonical function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Full 32-byte topic hash of a canonical event signature.
pub fn event_topic(signature: &str) -> [u8; 32] {
    keccak256(signature.as_bytes())
}

/// Left-pads an address into a 32-byte ABI word.
pub fn encode_address(address: &[u8; 20]) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

/// Big-endian unsigned integer in a 32-byte ABI word.
pub fn encode_uint(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Calldata for a zero-argument call.
pub fn encode_call_no_args(selector: [u8; 4]) -> Vec<u8> {
    selector.to_vec()
}

/// Calldata for a call taking a single uint256.
pub fn encode_call_uint(selector: [u8; 4], value: u128) -> Vec<u8> {
    let mut data = selector.to_vec();
    data.extend_from_slice(&encode_uint(value));
    data
}

/// Calldata for a call taking `(address, string)`. The string is dynamic,
/// so the head holds an offset to its tail.
pub fn encode_call_address_string(selector: [u8; 4], address: &[u8; 20], value: &str) -> Vec<u8> {
    let mut data = selector.to_vec();
    data.extend_from_slice(&encode_address(address));
    data.extend_from_slice(&encode_uint(0x40));
    data.extend_from_slice(&encode_uint(value.len() as u128));
    data.extend_from_slice(value.as_bytes());
    let remainder = value.len() % 32;
    if remainder != 0 {
        data.resize(data.len() + 32 - remainder, 0);
    }
    data
}

fn strip_hex_prefix(value: &str) -> &str {
    value.strip_prefix("0x").unwrap_or(value)
}

/// Parses a hex-encoded ABI word (or RPC quantity) as an unsigned integer.
pub fn decode_uint(word: &str) -> Result<u128, Error> {
    let digits = strip_hex_prefix(word.trim());
    if digits.is_empty() {
        return Ok(0);
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > 32 {
        return Err(Error::Parse(format!("uint out of range: {}", word)));
    }
    if significant.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(significant, 16)
        .map_err(|e| Error::Parse(format!("invalid uint '{}': {}", word, e)))
}

/// Extracts the address from a 32-byte ABI return word.
pub fn decode_address_word(word: &str) -> Result<String, Error> {
    let digits = strip_hex_prefix(word.trim());
    if digits.len() != 64 {
        return Err(Error::Parse(format!(
            "expected a 32-byte word, got {} hex chars",
            digits.len()
        )));
    }
    Ok(format!("0x{}", &digits[24..]))
}

/// Decodes a single ABI-encoded string return value.
pub fn decode_string_return(hex_data: &str) -> Result<String, Error> {
    let bytes = hex::decode(strip_hex_prefix(hex_data.trim()))
        .map_err(|e| Error::Parse(format!("invalid hex in return data: {}", e)))?;
    if bytes.len() < 64 {
        return Err(Error::Parse("string return data too short".to_string()));
    }
    let offset = word_as_usize(&bytes[..32])?;
    let start = offset
        .checked_add(32)
        .filter(|s| *s <= bytes.len())
        .ok_or_else(|| Error::Parse("string offset out of bounds".to_string()))?;
    let length = word_as_usize(&bytes[offset..start])?;
    let end = start
        .checked_add(length)
        .filter(|e| *e <= bytes.len())
        .ok_or_else(|| Error::Parse("string length out of bounds".to_string()))?;
    String::from_utf8(bytes[start..end].to_vec())
        .map_err(|e| Error::Parse(format!("string return data is not UTF-8: {}", e)))
}

fn word_as_usize(word: &[u8]) -> Result<usize, Error> {
    if word[..16].iter().any(|b| *b != 0) {
        return Err(Error::Parse("ABI word too large for usize".to_string()));
    }
    let mut buf = [0u8; 16];
    buf.copy_from_slice(&word[16..32]);
    usize::try_from(u128::from_be_bytes(buf))
        .map_err(|_| Error::Parse("ABI word too large for usize".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        assert_eq!(hex::encode(selector("mint(address,string)")), "d0def521");
        assert_eq!(hex::encode(selector("mintFee()")), "13966db5");
        assert_eq!(hex::encode(selector("tokenURI(uint256)")), "c87b56dd");
        assert_eq!(hex::encode(selector("ownerOf(uint256)")), "6352211e");
    }

    #[test]
    fn test_mint_event_topic() {
        assert_eq!(
            hex::encode(event_topic("NFTMinted(address,uint256,string)")),
            "d35bb95e09c04b219e35047ce7b7b300e3384264ef84a40456943dbc0fc17c14"
        );
    }

    #[test]
    fn test_encode_call_address_string_layout() {
        let address: [u8; 20] = [0x11; 20];
        let data = encode_call_address_string(selector("mint(address,string)"), &address, "abc");
        // selector + address word + offset word + length word + one padded chunk
        assert_eq!(data.len(), 4 + 32 * 4);
        assert_eq!(&data[..4], &[0xd0, 0xde, 0xf5, 0x21]);
        assert_eq!(&data[16..36], &address);
        assert_eq!(data[67], 0x40);
        assert_eq!(data[99], 3);
        assert_eq!(&data[100..103], b"abc");
        assert!(data[103..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_call_address_string_word_aligned_input() {
        let data = encode_call_address_string([0; 4], &[0u8; 20], &"a".repeat(32));
        assert_eq!(data.len(), 4 + 32 * 4);
    }

    #[test]
    fn test_decode_uint() {
        assert_eq!(decode_uint("0x0").unwrap(), 0);
        assert_eq!(decode_uint("0x").unwrap(), 0);
        assert_eq!(decode_uint("0x14a34").unwrap(), 84532);
        assert_eq!(
            decode_uint("0x0000000000000000000000000000000000000000000000000000000000000007")
                .unwrap(),
            7
        );
        assert!(decode_uint("0xzz").is_err());
    }

    #[test]
    fn test_decode_address_word() {
        let word = "0x0000000000000000000000007e5f4552091a69125d5dfcb7b8c2659029395bdf";
        assert_eq!(
            decode_address_word(word).unwrap(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        assert!(decode_address_word("0x1234").is_err());
    }

    #[test]
    fn test_decode_string_return_round_trip() {
        let value = "ipfs://QmExampleHash/metadata.json";
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&encode_uint(0x20));
        bytes.extend_from_slice(&encode_uint(value.len() as u128));
        bytes.extend_from_slice(value.as_bytes());
        bytes.resize(bytes.len() + (32 - value.len() % 32), 0);
        let hex_data = format!("0x{}", hex::encode(bytes));
        assert_eq!(decode_string_return(&hex_data).unwrap(), value);
    }

    #[test]
    fn test_decode_string_return_rejects_truncated_data() {
        assert!(decode_string_return("0x0000").is_err());
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&encode_uint(0x20));
        bytes.extend_from_slice(&encode_uint(999));
        let hex_data = format!("0x{}", hex::encode(bytes));
        assert!(decode_string_return(&hex_data).is_err());
    }
}
