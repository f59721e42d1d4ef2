//! String formatting utilities.
//!
//! Provides 0x prefix stripping and truncation of long hex values for log output.

/// Truncates a hex string for log output.
///
/// Shows only the first 10 characters followed by ".." for longer strings.
pub fn truncate_hex(value: &str) -> String {
	if value.len() <= 10 {
		value.to_string()
	} else {
		format!("{}..", &value[..10])
	}
}

/// Removes "0x" or "0X" prefix from a hex string if present.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}
