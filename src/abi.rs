// src/abi.rs
//! Minimal ABI encoding for the contract surface this app touches.
//!
//! Every call takes address/uint256 arguments and returns a single
//! uint256 word, so the codec stays small: a Keccak-256 selector plus
//! 32-byte words, hex on the wire.

use sha3::{Digest, Keccak256};

/// First 4 bytes of the Keccak-256 of a canonical function signature
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Parse a 0x-prefixed 20-byte address
pub fn parse_address(text: &str) -> Result<[u8; 20], String> {
    let stripped = text.trim().strip_prefix("0x").unwrap_or(text.trim());
    let bytes = hex::decode(stripped).map_err(|e| format!("Invalid address {}: {}", text, e))?;
    let array: [u8; 20] = bytes
        .try_into()
        .map_err(|_| format!("Invalid address length: {}", text))?;
    Ok(array)
}

/// Lowercase 0x-prefixed form
pub fn format_address(address: &[u8; 20]) -> String {
    format!("0x{}", hex::encode(address))
}

/// Left-pad an address into a 32-byte call word
pub fn word_from_address(address: &[u8; 20]) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

/// Left-pad a u128 into a 32-byte call word
pub fn word_from_uint(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Build 0x-prefixed calldata: selector followed by the argument words
pub fn encode_call(signature: &str, args: &[[u8; 32]]) -> String {
    let mut data = Vec::with_capacity(4 + 32 * args.len());
    data.extend_from_slice(&selector(signature));
    for word in args {
        data.extend_from_slice(word);
    }
    format!("0x{}", hex::encode(data))
}

/// Decode a single uint256 return word into u128.
///
/// An empty result usually means there is no contract code at the target
/// address; values above the u128 range are rejected rather than
/// truncated.
pub fn decode_uint(result: &str) -> Result<u128, String> {
    let stripped = result.trim().strip_prefix("0x").unwrap_or(result.trim());
    if stripped.is_empty() {
        return Err("Empty call result (no contract at address?)".to_string());
    }
    let bytes = hex::decode(stripped).map_err(|e| format!("Invalid call result: {}", e))?;
    if bytes.len() != 32 {
        return Err(format!("Expected 32-byte return word, got {} bytes", bytes.len()));
    }
    if bytes[..16].iter().any(|&b| b != 0) {
        return Err("Returned value exceeds supported range".to_string());
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&bytes[16..]);
    Ok(u128::from_be_bytes(low))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        assert_eq!(hex::encode(selector("balanceOf(address)")), "70a08231");
        assert_eq!(hex::encode(selector("approve(address,uint256)")), "095ea7b3");
        assert_eq!(hex::encode(selector("allowance(address,address)")), "dd62ed3e");
    }

    #[test]
    fn test_address_round_trip() {
        let text = "0x082c329ae8637bc89fd480b3d87484b5db441d6d";
        let parsed = parse_address(text).unwrap();
        assert_eq!(format_address(&parsed), text);
        // mixed-case input parses too
        assert_eq!(parse_address("0x082C329Ae8637bc89FD480B3d87484b5db441d6d").unwrap(), parsed);
    }

    #[test]
    fn test_parse_address_rejects() {
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("not an address").is_err());
        assert!(parse_address("").is_err());
    }

    #[test]
    fn test_encode_balance_of() {
        let owner = parse_address("0x1111111111111111111111111111111111111111").unwrap();
        let data = encode_call("balanceOf(address)", &[word_from_address(&owner)]);
        assert_eq!(
            data,
            "0x70a082310000000000000000000000001111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn test_encode_uint_word() {
        let word = word_from_uint(3_000_000_000_000_000_000);
        assert_eq!(
            hex::encode(word),
            "00000000000000000000000000000000000000000000000029a2241af62c0000"
        );
    }

    #[test]
    fn test_decode_uint() {
        let result = "0x00000000000000000000000000000000000000000000000029a2241af62c0000";
        assert_eq!(decode_uint(result).unwrap(), 3_000_000_000_000_000_000);
        assert_eq!(
            decode_uint("0x0000000000000000000000000000000000000000000000000000000000000000")
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_decode_uint_edges() {
        assert!(decode_uint("0x").is_err());
        assert!(decode_uint("0x1234").is_err());
        // top half set: larger than u128
        let oversized = format!("0x01{}", "00".repeat(31));
        assert!(decode_uint(&oversized).is_err());
    }
}
