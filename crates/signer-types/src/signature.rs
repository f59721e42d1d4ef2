//! Recoverable ECDSA signatures.
//!
//! Verifying contracts disagree on how the recovery id is encoded: Solidity's
//! `ecrecover` expects `v` in {27, 28}, while some recovery libraries take the
//! raw y-parity in {0, 1}. The convention is chosen per deployment through
//! `VConvention` and applied when the signature is produced.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoding of the recovery id in `v`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VConvention {
	/// `v` is 27 or 28, as returned by `ecsign` and expected by `ecrecover`.
	#[default]
	Legacy,
	/// `v` is the raw y-parity bit, 0 or 1.
	Parity,
}

impl VConvention {
	/// Encodes a y-parity bit under this convention.
	pub fn encode(self, y_parity: bool) -> u8 {
		let bit = u8::from(y_parity);
		match self {
			VConvention::Legacy => 27 + bit,
			VConvention::Parity => bit,
		}
	}
}

impl FromStr for VConvention {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"legacy" | "27" => Ok(VConvention::Legacy),
			"parity" | "0" => Ok(VConvention::Parity),
			other => Err(format!(
				"unknown v convention '{}', expected 'legacy' or 'parity'",
				other
			)),
		}
	}
}

impl fmt::Display for VConvention {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			VConvention::Legacy => write!(f, "legacy"),
			VConvention::Parity => write!(f, "parity"),
		}
	}
}

/// Recoverable secp256k1 signature split into the `(v, r, s)` triple that
/// verifying contracts take as separate arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
	pub v: u8,
	pub r: B256,
	pub s: B256,
}

impl Signature {
	pub fn new(y_parity: bool, r: B256, s: B256, convention: VConvention) -> Self {
		Self {
			v: convention.encode(y_parity),
			r,
			s,
		}
	}

	/// Y-parity bit, whichever convention `v` was encoded with.
	///
	/// Returns `None` when `v` is not one of 0, 1, 27 or 28.
	pub fn y_parity(&self) -> Option<bool> {
		match self.v {
			0 | 27 => Some(false),
			1 | 28 => Some(true),
			_ => None,
		}
	}

	/// Re-encodes `v` under another convention.
	pub fn with_convention(self, convention: VConvention) -> Option<Self> {
		let parity = self.y_parity()?;
		Some(Self {
			v: convention.encode(parity),
			..self
		})
	}

	/// 65-byte `r || s || v` encoding.
	pub fn to_bytes(&self) -> [u8; 65] {
		let mut out = [0u8; 65];
		out[..32].copy_from_slice(self.r.as_slice());
		out[32..64].copy_from_slice(self.s.as_slice());
		out[64] = self.v;
		out
	}

	pub fn to_hex(&self) -> String {
		format!("0x{}", hex::encode(self.to_bytes()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample(v: u8) -> Signature {
		Signature {
			v,
			r: B256::repeat_byte(0x11),
			s: B256::repeat_byte(0x22),
		}
	}

	#[test]
	fn test_convention_encoding() {
		assert_eq!(VConvention::Legacy.encode(false), 27);
		assert_eq!(VConvention::Legacy.encode(true), 28);
		assert_eq!(VConvention::Parity.encode(false), 0);
		assert_eq!(VConvention::Parity.encode(true), 1);
		assert_eq!(VConvention::default(), VConvention::Legacy);
	}

	#[test]
	fn test_y_parity_across_conventions() {
		assert_eq!(sample(27).y_parity(), Some(false));
		assert_eq!(sample(0).y_parity(), Some(false));
		assert_eq!(sample(28).y_parity(), Some(true));
		assert_eq!(sample(1).y_parity(), Some(true));
		assert_eq!(sample(35).y_parity(), None);
	}

	#[test]
	fn test_with_convention() {
		let sig = sample(28).with_convention(VConvention::Parity).unwrap();
		assert_eq!(sig.v, 1);
		assert_eq!(sig.r, B256::repeat_byte(0x11));
		assert!(sample(99).with_convention(VConvention::Legacy).is_none());
	}

	#[test]
	fn test_to_bytes_layout() {
		let bytes = sample(27).to_bytes();
		assert!(bytes[..32].iter().all(|b| *b == 0x11));
		assert!(bytes[32..64].iter().all(|b| *b == 0x22));
		assert_eq!(bytes[64], 27);
		assert_eq!(sample(27).to_hex().len(), 2 + 130);
	}

	#[test]
	fn test_convention_from_str() {
		assert_eq!("legacy".parse::<VConvention>(), Ok(VConvention::Legacy));
		assert_eq!("Parity".parse::<VConvention>(), Ok(VConvention::Parity));
		assert!("eip155".parse::<VConvention>().is_err());
	}
}
