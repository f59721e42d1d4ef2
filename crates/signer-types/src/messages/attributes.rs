//! NFT attribute purchase authorisation.
//!
//! Unlike the typed approvals this message is not EIP-712: the contract
//! recomputes `keccak256(abi.encodePacked(score, character, attr_1, .., attr_n))`
//! and recovers the signer from the raw digest, with no domain and no
//! `\x19Ethereum Signed Message` prefix.

use alloy_primitives::{keccak256, B256, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePurchase {
	pub score: U256,
	pub character: U256,
	/// Attribute names, in the order the contract receives them.
	pub attributes: Vec<String>,
}

impl AttributePurchase {
	/// Packed encoding: two 32-byte words followed by the raw UTF-8 attribute names.
	pub fn packed(&self) -> Vec<u8> {
		let names_len: usize = self.attributes.iter().map(String::len).sum();
		let mut out = Vec::with_capacity(64 + names_len);
		out.extend_from_slice(&self.score.to_be_bytes::<32>());
		out.extend_from_slice(&self.character.to_be_bytes::<32>());
		for name in &self.attributes {
			out.extend_from_slice(name.as_bytes());
		}
		out
	}

	pub fn digest(&self) -> B256 {
		keccak256(self.packed())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::b256;

	#[test]
	fn test_digest_vector() {
		let purchase = AttributePurchase {
			score: U256::from(10u64),
			character: U256::ZERO,
			attributes: vec!["bot1-head-anim".into(), "bot1-body-anim".into()],
		};
		assert_eq!(purchase.packed().len(), 64 + 28);
		assert_eq!(
			purchase.digest(),
			b256!("373d3c03afbcabdc632d889d61d71002fd52dfa3a71dc470206862dac9d0f3e7")
		);
	}

	#[test]
	fn test_attribute_order_matters() {
		let a = AttributePurchase {
			score: U256::from(10u64),
			character: U256::ZERO,
			attributes: vec!["head".into(), "body".into()],
		};
		let mut b = a.clone();
		b.attributes.reverse();
		assert_ne!(a.digest(), b.digest());
	}
}
