//! Utility functions for encoding, parsing and formatting.
//!
//! This module provides the EIP-712 word encoder, strict parsers for message
//! fields received as strings, and hex string helpers.

pub mod conversion;
pub mod eip712;
pub mod formatting;

pub use conversion::{parse_address, parse_bool, parse_uint256, EncodingError};
pub use eip712::{compute_domain_hash, compute_final_digest, Eip712AbiEncoder, DOMAIN_TYPE};
pub use formatting::{truncate_hex, without_0x_prefix};
