use crate::error::{JsonRpcError, JsonRpcResult};

/// Length of an address without the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Returns true if `address` is `0x` followed by exactly 40 hex digits.
/// Both checksummed and lowercase forms are accepted.
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(digits) => {
            digits.len() == ADDRESS_HEX_LEN && digits.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Checks every address, failing on the first malformed one.
pub fn validate_addresses<S: AsRef<str>>(addresses: &[S]) -> JsonRpcResult<()> {
    match addresses
        .iter()
        .map(AsRef::as_ref)
        .find(|address| !is_valid_address(address))
    {
        Some(invalid) => Err(JsonRpcError::InvalidAddress(invalid.to_string())),
        None => Ok(()),
    }
}
