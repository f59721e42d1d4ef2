//! Approval signing service.
//!
//! `ApprovalSigner` pairs the configured signing domains with one account and
//! is what a relayer calls to authorise a user action: it resolves the domain,
//! builds the digest, signs it and returns everything the caller needs to
//! submit alongside the plaintext message.

use crate::{typed::TypedMessageSigner, SignerError};
use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use signer_account::{recover_signer, AccountService};
use signer_types::{
	utils::truncate_hex, ApprovalMessage, AttributePurchase, DomainDescriptor, PurchaseApproval,
	Signature, VConvention, VaultApproval,
};
use std::collections::HashMap;

/// Result of signing one approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedApproval {
	/// The digest that was signed.
	pub digest: B256,
	pub signature: Signature,
	/// Address the verifying contract will recover.
	pub signer: Address,
}

impl SignedApproval {
	/// Recovers the signer from the signature and checks it matches `signer`.
	pub fn verify(&self) -> bool {
		recover_signer(&self.digest, &self.signature)
			.map(|recovered| recovered == self.signer)
			.unwrap_or(false)
	}
}

/// Signs approvals for a set of named domains with a single account.
///
/// Every domain signer is built with the convention given to `new`, so typed
/// and attribute signatures always encode `v` the same way.
pub struct ApprovalSigner {
	id: String,
	domains: HashMap<String, TypedMessageSigner>,
	account: AccountService,
	convention: VConvention,
}

impl ApprovalSigner {
	/// Fails with `InvalidDomain` if any descriptor does not validate.
	pub fn new(
		id: impl Into<String>,
		domains: HashMap<String, DomainDescriptor>,
		account: AccountService,
		convention: VConvention,
	) -> Result<Self, SignerError> {
		let domains = domains
			.into_iter()
			.map(|(key, descriptor)| {
				TypedMessageSigner::new(descriptor, convention).map(|signer| (key, signer))
			})
			.collect::<Result<HashMap<_, _>, SignerError>>()?;

		Ok(Self {
			id: id.into(),
			domains,
			account,
			convention,
		})
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn address(&self) -> Address {
		self.account.get_address()
	}

	pub fn convention(&self) -> VConvention {
		self.convention
	}

	/// Sorted keys of the configured domains.
	pub fn domain_keys(&self) -> Vec<&str> {
		let mut keys: Vec<&str> = self.domains.keys().map(String::as_str).collect();
		keys.sort_unstable();
		keys
	}

	pub fn domain(&self, key: &str) -> Result<&TypedMessageSigner, SignerError> {
		self.domains
			.get(key)
			.ok_or_else(|| SignerError::UnknownDomain(key.to_string()))
	}

	/// Signs a typed approval under the domain configured as `domain_key`.
	pub fn sign_typed(
		&self,
		domain_key: &str,
		message: &ApprovalMessage,
	) -> Result<SignedApproval, SignerError> {
		let (digest, signature, signer) = self
			.domain(domain_key)?
			.sign_with_account(message, self.account.account())?;

		tracing::info!(
			signer_id = %self.id,
			domain = %domain_key,
			kind = message_kind(message),
			digest = %truncate_hex(&digest.to_string()),
			"Signed approval"
		);

		Ok(SignedApproval {
			digest,
			signature,
			signer,
		})
	}

	pub fn sign_vault_approval(
		&self,
		domain_key: &str,
		approval: VaultApproval,
	) -> Result<SignedApproval, SignerError> {
		self.sign_typed(domain_key, &ApprovalMessage::Vault(approval))
	}

	pub fn sign_purchase_approval(
		&self,
		domain_key: &str,
		approval: PurchaseApproval,
	) -> Result<SignedApproval, SignerError> {
		self.sign_typed(domain_key, &ApprovalMessage::Purchase(approval))
	}

	/// Signs a packed attribute purchase. No domain applies.
	pub fn sign_attributes(
		&self,
		purchase: &AttributePurchase,
	) -> Result<SignedApproval, SignerError> {
		let digest = purchase.digest();
		let signature = self.account.sign(&digest, self.convention)?;

		tracing::info!(
			signer_id = %self.id,
			kind = "attributes",
			attributes = purchase.attributes.len(),
			digest = %truncate_hex(&digest.to_string()),
			"Signed approval"
		);

		Ok(SignedApproval {
			digest,
			signature,
			signer: self.account.get_address(),
		})
	}
}

fn message_kind(message: &ApprovalMessage) -> &'static str {
	match message {
		ApprovalMessage::Vault(v) if v.approved => "vault_grant",
		ApprovalMessage::Vault(_) => "vault_revoke",
		ApprovalMessage::Purchase(_) => "purchase",
	}
}
