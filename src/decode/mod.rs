//! Bridge from raw ABI-encoded bytes to decoded values
//!
//! The chain client hands back raw return/log data; this module decodes it
//! with alloy-dyn-abi against registered parameter definitions so the
//! interpreter only ever sees [`DecodedValue`] trees.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use anyhow::{Context, Result};

use crate::domain::abi::{AbiParam, DecodedValue};

/// Decode a positional parameter list (function outputs or inputs) from raw
/// ABI-encoded bytes.
pub fn decode_params(params: &[AbiParam], data: &[u8]) -> Result<Vec<DecodedValue>> {
    if params.is_empty() {
        return Ok(Vec::new());
    }

    let types = params.iter().map(sol_type).collect::<Result<Vec<_>>>()?;

    // Wrap in a tuple so a single decode covers the whole list.
    let tuple_type = DynSolType::Tuple(types);
    let decoded = tuple_type
        .abi_decode(data)
        .context("failed to decode parameter data")?;

    match decoded {
        DynSolValue::Tuple(values) => Ok(values.iter().map(from_dyn).collect()),
        other => Ok(vec![from_dyn(&other)]),
    }
}

/// Parse a parameter's canonical type into a `DynSolType`.
fn sol_type(param: &AbiParam) -> Result<DynSolType> {
    let canonical = param.solidity_type();
    canonical.parse::<DynSolType>().with_context(|| {
        format!(
            "failed to parse type '{}' for param '{}'",
            canonical, param.name
        )
    })
}

/// Convert an alloy value into the display-facing [`DecodedValue`].
///
/// Integer magnitudes keep their full decimal form; any display shortening
/// is the rendering collaborator's call. Tuples become positional sequences
/// so the interpreter's labeling pass can attach field names.
pub fn from_dyn(value: &DynSolValue) -> DecodedValue {
    match value {
        DynSolValue::Bool(b) => DecodedValue::Bool(*b),
        DynSolValue::Int(i, _) => DecodedValue::Scalar(i.to_string()),
        DynSolValue::Uint(u, _) => DecodedValue::Scalar(u.to_string()),
        DynSolValue::FixedBytes(word, size) => {
            let bytes = &word.as_slice()[..(*size).min(32)];
            DecodedValue::Scalar(format!("0x{}", hex::encode(bytes)))
        }
        DynSolValue::Address(addr) => DecodedValue::Scalar(format!("{:?}", addr)),
        DynSolValue::Function(func) => {
            DecodedValue::Scalar(format!("0x{}", hex::encode(func.as_slice())))
        }
        DynSolValue::Bytes(bytes) => DecodedValue::Scalar(format!("0x{}", hex::encode(bytes))),
        DynSolValue::String(s) => DecodedValue::Scalar(s.clone()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            DecodedValue::Sequence(items.iter().map(from_dyn).collect())
        }
        DynSolValue::Tuple(fields) => {
            DecodedValue::Sequence(fields.iter().map(from_dyn).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn test_decode_address_uint_pair() {
        let params = vec![
            AbiParam::new("address", "to"),
            AbiParam::new("uint256", "amount"),
        ];

        // (0x1234...7890, 1000)
        let data = hex::decode(
            "000000000000000000000000123456789012345678901234567890123456789000000000000000000000000000000000000000000000000000000000000003e8"
        ).unwrap();

        let values = decode_params(&params, &data).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(
            values[0],
            DecodedValue::scalar("0x1234567890123456789012345678901234567890")
        );
        assert_eq!(values[1], DecodedValue::scalar("1000"));
    }

    #[test]
    fn test_decode_empty_params() {
        assert!(decode_params(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_bad_data_is_error() {
        let params = vec![AbiParam::new("uint256", "x")];
        assert!(decode_params(&params, &[0u8; 3]).is_err());
    }

    #[test]
    fn test_from_dyn_keeps_magnitude() {
        let value = DynSolValue::Uint(U256::MAX, 256);
        let DecodedValue::Scalar(text) = from_dyn(&value) else {
            panic!("expected scalar");
        };
        // 2^256 - 1, verbatim decimal, not hex-shortened.
        assert_eq!(
            text,
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn test_from_dyn_tuple_is_positional() {
        let value = DynSolValue::Tuple(vec![
            DynSolValue::Bool(true),
            DynSolValue::String("hi".to_string()),
        ]);
        assert_eq!(
            from_dyn(&value),
            DecodedValue::Sequence(vec![
                DecodedValue::Bool(true),
                DecodedValue::scalar("hi"),
            ])
        );
    }
}
