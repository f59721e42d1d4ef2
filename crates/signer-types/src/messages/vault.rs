//! Vault access approval.
//!
//! Grants or revokes a contract's permission to move a user's funds held in a
//! lending vault. The struct carries a hashed human-readable warning so that
//! wallets rendering the typed data show the user what they are agreeing to.

use super::{TypeHash, TypedMessage};
use crate::utils::Eip712AbiEncoder;
use alloy_primitives::{keccak256, Address, B256, U256};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const VAULT_ACCESS_APPROVAL_TYPE: &str =
	"VaultAccessApproval(bytes32 warning,address user,address contract,bool approved,uint256 nonce)";

/// Warning shown when access is granted.
pub const VAULT_GRANT_WARNING: &str =
	"Grant full access to funds in Warp Vault? Read more here https://warp.finance/permission";

/// Warning shown when access is revoked.
pub const VAULT_REVOKE_WARNING: &str =
	"Revoke access to Warp Vault? Read more here https://warp.finance/revoke";

pub static VAULT_ACCESS_APPROVAL_TYPEHASH: Lazy<TypeHash> =
	Lazy::new(|| TypeHash::of(VAULT_ACCESS_APPROVAL_TYPE));

static GRANT_WARNING_HASH: Lazy<B256> = Lazy::new(|| keccak256(VAULT_GRANT_WARNING.as_bytes()));
static REVOKE_WARNING_HASH: Lazy<B256> = Lazy::new(|| keccak256(VAULT_REVOKE_WARNING.as_bytes()));

/// `VaultAccessApproval` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultApproval {
	/// Owner of the vault balance.
	pub user: Address,
	/// Contract being granted or denied access.
	pub contract: Address,
	/// `true` grants access, `false` revokes it.
	pub approved: bool,
	/// Current value of the vault's per-user approval nonce.
	pub nonce: U256,
}

impl VaultApproval {
	/// Warning hash selected by the `approved` flag.
	pub fn warning_hash(&self) -> B256 {
		if self.approved {
			*GRANT_WARNING_HASH
		} else {
			*REVOKE_WARNING_HASH
		}
	}
}

impl TypedMessage for VaultApproval {
	fn type_hash(&self) -> TypeHash {
		*VAULT_ACCESS_APPROVAL_TYPEHASH
	}

	fn encode_fields(&self, encoder: &mut Eip712AbiEncoder) {
		encoder.push_b256(&self.warning_hash());
		encoder.push_address(&self.user);
		encoder.push_address(&self.contract);
		encoder.push_bool(self.approved);
		encoder.push_u256(self.nonce);
	}
}
