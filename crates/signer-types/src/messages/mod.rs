//! Typed approval messages.
//!
//! Each message variant declares its canonical EIP-712 type string and the
//! order in which its fields are encoded. The type hash of every variant is
//! computed once, on first use, and shared process-wide.

use crate::utils::Eip712AbiEncoder;
use alloy_primitives::{keccak256, B256};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod attributes;
pub mod purchase;
pub mod vault;

pub use attributes::AttributePurchase;
pub use purchase::{PurchaseApproval, NFT_PURCHASE_APPROVAL_TYPE, NFT_PURCHASE_APPROVAL_TYPEHASH};
pub use vault::{
	VaultApproval, VAULT_ACCESS_APPROVAL_TYPE, VAULT_ACCESS_APPROVAL_TYPEHASH, VAULT_GRANT_WARNING,
	VAULT_REVOKE_WARNING,
};

/// Keccak256 of a struct's canonical type string.
///
/// The string must be identical to the one the verifying contract hashes;
/// a mismatch yields digests the contract silently rejects.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeHash(B256);

impl TypeHash {
	/// Hashes a canonical type string such as `Mail(address from,string contents)`.
	pub fn of(type_string: &str) -> Self {
		Self(keccak256(type_string.as_bytes()))
	}

	pub fn as_b256(&self) -> &B256 {
		&self.0
	}
}

impl From<B256> for TypeHash {
	fn from(value: B256) -> Self {
		Self(value)
	}
}

impl fmt::Debug for TypeHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TypeHash({})", self.0)
	}
}

/// A struct that can be hashed under EIP-712.
pub trait TypedMessage {
	/// The type hash the verifying contract uses for this struct.
	fn type_hash(&self) -> TypeHash;

	/// Appends the struct members, in declaration order, as 32-byte words.
	///
	/// The type hash itself is not written; callers push it first.
	fn encode_fields(&self, encoder: &mut Eip712AbiEncoder);
}

/// Approval messages accepted by the verifying contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApprovalMessage {
	Vault(VaultApproval),
	Purchase(PurchaseApproval),
}

impl TypedMessage for ApprovalMessage {
	fn type_hash(&self) -> TypeHash {
		match self {
			ApprovalMessage::Vault(m) => m.type_hash(),
			ApprovalMessage::Purchase(m) => m.type_hash(),
		}
	}

	fn encode_fields(&self, encoder: &mut Eip712AbiEncoder) {
		match self {
			ApprovalMessage::Vault(m) => m.encode_fields(encoder),
			ApprovalMessage::Purchase(m) => m.encode_fields(encoder),
		}
	}
}

impl From<VaultApproval> for ApprovalMessage {
	fn from(value: VaultApproval) -> Self {
		ApprovalMessage::Vault(value)
	}
}

impl From<PurchaseApproval> for ApprovalMessage {
	fn from(value: PurchaseApproval) -> Self {
		ApprovalMessage::Purchase(value)
	}
}
