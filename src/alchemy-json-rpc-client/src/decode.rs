//! Decoding of raw JSON-RPC results into typed values.

use num::{BigUint, Num};
use serde_json::Value;

use crate::error::DecodingError;

fn as_hex_str<'a>(value: &'a Value, expected: &'static str) -> Result<&'a str, DecodingError> {
    value
        .as_str()
        .and_then(|s| s.strip_prefix("0x"))
        // `from_str_radix` would also let through a sign or `_` separators
        .filter(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| DecodingError::new(expected, value))
}

/// Decodes a `0x` prefixed byte string (e.g. contract code). The string is
/// returned verbatim once it is known to be valid hex; `"0x"` is the empty
/// code of an externally owned account.
pub fn decode_hex_string(value: &Value) -> Result<String, DecodingError> {
    const EXPECTED: &str = "hex string";

    let digits = as_hex_str(value, EXPECTED)?;
    hex::decode(digits).map_err(|_| DecodingError::new(EXPECTED, value))?;
    Ok(format!("0x{digits}"))
}

/// Decodes a `0x` prefixed hex quantity into an arbitrary precision integer.
pub fn decode_quantity(value: &Value) -> Result<BigUint, DecodingError> {
    const EXPECTED: &str = "hex quantity";

    let digits = as_hex_str(value, EXPECTED)?;
    BigUint::from_str_radix(digits, 16).map_err(|_| DecodingError::new(EXPECTED, value))
}

/// Decodes a `0x` prefixed hex quantity that must fit into 64 bits.
pub fn decode_u64(value: &Value) -> Result<u64, DecodingError> {
    const EXPECTED: &str = "64-bit hex quantity";

    let digits = as_hex_str(value, EXPECTED)?;
    u64::from_str_radix(digits, 16).map_err(|_| DecodingError::new(EXPECTED, value))
}

/// Encodes an integer as a minimal-width `0x` prefixed hex quantity.
pub fn encode_quantity(value: &BigUint) -> String {
    format!("0x{}", value.to_str_radix(16))
}
