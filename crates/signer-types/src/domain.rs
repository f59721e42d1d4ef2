//! EIP-712 signing domain.
//!
//! A `DomainDescriptor` identifies the verifying contract a signature is bound
//! to. Its fields are read live from the deployed contract by the caller and
//! must match the contract's own values exactly, otherwise every signature
//! produced against it is rejected on-chain.

use crate::utils::compute_domain_hash;
use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by local domain validation.
///
/// Only emptiness can be checked here; a name or version that differs from the
/// contract's is only detectable through on-chain rejection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
	#[error("Domain name cannot be empty")]
	EmptyName,
	#[error("Domain version cannot be empty")]
	EmptyVersion,
}

/// Signing domain of a verifying contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDescriptor {
	/// Value returned by the contract's `name()`.
	pub name: String,
	/// Value returned by the contract's `version()`.
	pub version: String,
	/// Deployed address of the verifying contract.
	pub verifying_contract: Address,
	/// Chain the contract is deployed on.
	pub chain_id: u64,
}

impl DomainDescriptor {
	pub fn new(
		name: impl Into<String>,
		version: impl Into<String>,
		verifying_contract: Address,
		chain_id: u64,
	) -> Self {
		Self {
			name: name.into(),
			version: version.into(),
			verifying_contract,
			chain_id,
		}
	}

	/// Rejects empty `name` or `version` strings.
	pub fn validate(&self) -> Result<(), DomainError> {
		if self.name.is_empty() {
			return Err(DomainError::EmptyName);
		}
		if self.version.is_empty() {
			return Err(DomainError::EmptyVersion);
		}
		Ok(())
	}

	/// Computes the domain separator after validating the descriptor.
	pub fn separator(&self) -> Result<B256, DomainError> {
		self.validate()?;
		Ok(compute_domain_hash(
			&self.name,
			&self.version,
			self.chain_id,
			&self.verifying_contract,
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::{address, b256};

	fn vault_domain() -> DomainDescriptor {
		DomainDescriptor::new(
			"Vault",
			"1",
			address!("1111111111111111111111111111111111111111"),
			1,
		)
	}

	#[test]
	fn test_separator_vector() {
		assert_eq!(
			vault_domain().separator().unwrap(),
			b256!("3012e698413f37d23c027dd5fa7ae21d750da4c810435e200eb775df17e60a8c")
		);
	}

	#[test]
	fn test_empty_name_rejected() {
		let mut domain = vault_domain();
		domain.name.clear();
		assert_eq!(domain.separator(), Err(DomainError::EmptyName));
	}

	#[test]
	fn test_empty_version_rejected() {
		let mut domain = vault_domain();
		domain.version = String::new();
		assert_eq!(domain.validate(), Err(DomainError::EmptyVersion));
	}

	#[test]
	fn test_each_field_changes_separator() {
		let base = vault_domain().separator().unwrap();

		let mut d = vault_domain();
		d.name = "Vault2".into();
		assert_ne!(d.separator().unwrap(), base);

		let mut d = vault_domain();
		d.version = "2".into();
		assert_ne!(d.separator().unwrap(), base);

		let mut d = vault_domain();
		d.chain_id = 5;
		assert_ne!(d.separator().unwrap(), base);

		let mut d = vault_domain();
		d.verifying_contract = address!("1111111111111111111111111111111111111112");
		assert_ne!(d.separator().unwrap(), base);
	}

	#[test]
	fn test_serde_camel_case() {
		let json = serde_json::to_value(vault_domain()).unwrap();
		assert_eq!(json["chainId"], 1);
		assert!(json.get("verifyingContract").is_some());
	}
}
