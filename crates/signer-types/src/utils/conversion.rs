//! Parsing of message fields supplied as strings.
//!
//! Message fields reach the signer from command-line arguments and config
//! files. Parsing is strict: a value that does not fit its declared ABI width
//! is rejected rather than truncated or wrapped.

use super::formatting::without_0x_prefix;
use alloy_primitives::{Address, U256};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a message field cannot be encoded at its declared width.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
	/// The value is negative, which no `uint` field can hold.
	#[error("Field '{field}' cannot be negative: {value}")]
	Negative { field: String, value: String },
	/// The value does not fit in 256 bits.
	#[error("Field '{field}' exceeds 256 bits: {value}")]
	Overflow { field: String, value: String },
	/// The value is not a decimal or 0x-prefixed hex integer.
	#[error("Field '{field}' is not a valid integer: {value}")]
	InvalidInteger { field: String, value: String },
	/// The value is not a 20-byte hex address.
	#[error("Field '{field}' is not a valid address: {value}")]
	InvalidAddress { field: String, value: String },
	/// The value is not `true` or `false`.
	#[error("Field '{field}' is not a valid boolean: {value}")]
	InvalidBool { field: String, value: String },
}

/// Parses an unsigned 256-bit integer from decimal or `0x` hex notation.
pub fn parse_uint256(field: &str, value: &str) -> Result<U256, EncodingError> {
	let trimmed = value.trim();
	if trimmed.starts_with('-') {
		return Err(EncodingError::Negative {
			field: field.to_string(),
			value: value.to_string(),
		});
	}

	let digits = without_0x_prefix(trimmed);
	let is_hex = digits.len() != trimmed.len();
	let radix = if is_hex { 16 } else { 10 };

	if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
		return Err(EncodingError::InvalidInteger {
			field: field.to_string(),
			value: value.to_string(),
		});
	}

	// Only well-formed digit strings reach this point, so any failure is width.
	U256::from_str_radix(digits, radix as u64).map_err(|_| EncodingError::Overflow {
		field: field.to_string(),
		value: value.to_string(),
	})
}

/// Parses a 20-byte address, accepting mixed-case (checksummed) input.
pub fn parse_address(field: &str, value: &str) -> Result<Address, EncodingError> {
	let trimmed = value.trim();
	if without_0x_prefix(trimmed).len() != 40 {
		return Err(EncodingError::InvalidAddress {
			field: field.to_string(),
			value: value.to_string(),
		});
	}
	Address::from_str(trimmed).map_err(|_| EncodingError::InvalidAddress {
		field: field.to_string(),
		value: value.to_string(),
	})
}

/// Parses a boolean flag.
pub fn parse_bool(field: &str, value: &str) -> Result<bool, EncodingError> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "1" => Ok(true),
		"false" | "0" => Ok(false),
		_ => Err(EncodingError::InvalidBool {
			field: field.to_string(),
			value: value.to_string(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_uint256_decimal_and_hex() {
		assert_eq!(parse_uint256("nonce", "0").unwrap(), U256::ZERO);
		assert_eq!(parse_uint256("nonce", "42").unwrap(), U256::from(42u64));
		assert_eq!(parse_uint256("nonce", "0x2a").unwrap(), U256::from(42u64));
		assert_eq!(parse_uint256("nonce", " 7 ").unwrap(), U256::from(7u64));
	}

	#[test]
	fn test_parse_uint256_max_value() {
		let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
		assert_eq!(parse_uint256("score", max).unwrap(), U256::MAX);
	}

	#[test]
	fn test_parse_uint256_rejects_negative() {
		let err = parse_uint256("tier", "-1").unwrap_err();
		assert!(matches!(err, EncodingError::Negative { .. }));
		assert!(err.to_string().contains("tier"));
	}

	#[test]
	fn test_parse_uint256_rejects_overflow() {
		let too_big =
			"115792089237316195423570985008687907853269984665640564039457584007913129639936";
		let err = parse_uint256("nonce", too_big).unwrap_err();
		assert!(matches!(err, EncodingError::Overflow { .. }));

		let hex_too_big = format!("0x1{}", "0".repeat(64));
		assert!(matches!(
			parse_uint256("nonce", &hex_too_big),
			Err(EncodingError::Overflow { .. })
		));
	}

	#[test]
	fn test_parse_uint256_rejects_garbage() {
		for bad in ["", "0x", "12a", "1.5", "ten"] {
			assert!(
				matches!(
					parse_uint256("nonce", bad),
					Err(EncodingError::InvalidInteger { .. })
				),
				"accepted {:?}",
				bad
			);
		}
	}

	#[test]
	fn test_parse_address() {
		let addr = parse_address("user", "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap();
		assert_eq!(
			addr.to_string().to_lowercase(),
			"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
		);
		assert!(parse_address("user", "0x1234").is_err());
		assert!(parse_address("user", "not-an-address").is_err());
	}

	#[test]
	fn test_parse_bool() {
		assert!(parse_bool("approved", "true").unwrap());
		assert!(parse_bool("approved", "TRUE").unwrap());
		assert!(!parse_bool("approved", "0").unwrap());
		assert!(parse_bool("approved", "yes").is_err());
	}
}
