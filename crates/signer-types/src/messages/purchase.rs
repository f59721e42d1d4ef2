//! NFT purchase approval, signed by the sale's authority over a buyer's tier
//! and score.

use super::{TypeHash, TypedMessage};
use crate::utils::Eip712AbiEncoder;
use alloy_primitives::{Address, U256};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The `uint` spelling is what the sale contract hashes; do not normalise it to `uint256`.
pub const NFT_PURCHASE_APPROVAL_TYPE: &str =
	"NftPurchaseApproval(address user,uint tier,uint score,uint256 nonce)";

pub static NFT_PURCHASE_APPROVAL_TYPEHASH: Lazy<TypeHash> =
	Lazy::new(|| TypeHash::of(NFT_PURCHASE_APPROVAL_TYPE));

/// `NftPurchaseApproval` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseApproval {
	pub user: Address,
	pub tier: U256,
	pub score: U256,
	pub nonce: U256,
}

impl TypedMessage for PurchaseApproval {
	fn type_hash(&self) -> TypeHash {
		*NFT_PURCHASE_APPROVAL_TYPEHASH
	}

	fn encode_fields(&self, encoder: &mut Eip712AbiEncoder) {
		encoder.push_address(&self.user);
		encoder.push_u256(self.tier);
		encoder.push_u256(self.score);
		encoder.push_u256(self.nonce);
	}
}
