//! Ethereum address helpers (EIP-55)

use alloy_primitives::keccak256;

/// Address-format predicate: `0x` prefix plus exactly 40 hex chars.
pub fn is_well_formed(address: &str) -> bool {
    let Some(payload) = address.strip_prefix("0x") else {
        return false;
    };
    payload.len() == 40 && payload.chars().all(|c| c.is_ascii_hexdigit())
}

/// Lowercased canonical form used as a store key.
pub fn normalize(address: &str) -> String {
    let trimmed = address.trim();
    let payload = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    format!("0x{}", payload.to_lowercase())
}

/// EIP-55 checksummed form. Returns `None` for malformed input.
pub fn to_checksum(address: &str) -> Option<String> {
    if !is_well_formed(address) {
        return None;
    }
    let payload = address[2..].to_lowercase();
    let hash = keccak256(payload.as_bytes());
    let hash_hex = hex::encode(hash.as_slice());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (i, c) in payload.chars().enumerate() {
        let hash_char = hash_hex.chars().nth(i).unwrap_or('0');
        let hash_val = hash_char.to_digit(16).unwrap_or(0);

        if hash_val >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    Some(result)
}

/// `0x74C3..7205` shortened display form.
pub fn short(address: &str) -> String {
    let value = address.trim();
    if value.len() <= 10 {
        return value.to_string();
    }
    let start: String = value.chars().take(6).collect();
    let end: String = value
        .chars()
        .rev()
        .take(4)
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    format!("{}..{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate() {
        assert!(is_well_formed(
            "0x74C3Ce17250bC522d2BFBFC3d19E1234D7df7205"
        ));
        assert!(!is_well_formed("74C3Ce17250bC522d2BFBFC3d19E1234D7df7205"));
        assert!(!is_well_formed("0x74C3"));
        assert!(!is_well_formed(
            "0xZZC3Ce17250bC522d2BFBFC3d19E1234D7df7205"
        ));
    }

    #[test]
    fn test_checksum() {
        let addr = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";
        let expected = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
        assert_eq!(to_checksum(addr).unwrap(), expected);
        assert!(to_checksum("0x123").is_none());
    }

    #[test]
    fn test_short() {
        assert_eq!(
            short("0x74C3Ce17250bC522d2BFBFC3d19E1234D7df7205"),
            "0x74C3..7205"
        );
        assert_eq!(short("0x74C3"), "0x74C3");
    }
}
