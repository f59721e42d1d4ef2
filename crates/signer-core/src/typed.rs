//! EIP-712 digest construction and signing.
//!
//! The free functions are the building blocks; `TypedMessageSigner` binds them
//! to one verifying contract's domain and `v` convention so the two approval
//! variants share a single digest path.

use crate::SignerError;
use alloy_primitives::{Address, B256};
use signer_account::{implementations::local::LocalAccount, AccountInterface};
use signer_types::{
	utils::{compute_final_digest, truncate_hex, Eip712AbiEncoder},
	DomainDescriptor, Signature, TypeHash, TypedMessage, VConvention,
};

/// Computes the domain separator of `domain`.
///
/// Fails with `InvalidDomain` when `name` or `version` is empty.
pub fn compute_domain_separator(domain: &DomainDescriptor) -> Result<B256, SignerError> {
	Ok(domain.separator()?)
}

/// Hashes `type_hash` followed by the message's fields in declaration order.
pub fn compute_struct_hash<M>(type_hash: &TypeHash, message: &M) -> B256
where
	M: TypedMessage + ?Sized,
{
	let mut enc = Eip712AbiEncoder::new();
	enc.push_b256(type_hash.as_b256());
	message.encode_fields(&mut enc);
	enc.hash()
}

/// Computes `keccak256(0x19 || 0x01 || domainSeparator || structHash)`, the
/// value the verifying contract recomputes before calling `ecrecover`.
pub fn compute_approval_digest<M>(
	domain: &DomainDescriptor,
	type_hash: &TypeHash,
	message: &M,
) -> Result<B256, SignerError>
where
	M: TypedMessage + ?Sized,
{
	let domain_separator = compute_domain_separator(domain)?;
	let struct_hash = compute_struct_hash(type_hash, message);
	Ok(compute_final_digest(&domain_separator, &struct_hash))
}

/// Signs a prehashed digest with a raw secp256k1 key.
///
/// Fails with `Signing` when the key is zero or not below the curve order.
pub fn sign(
	digest: &B256,
	private_key: &B256,
	convention: VConvention,
) -> Result<Signature, SignerError> {
	let account = LocalAccount::from_key_bytes(private_key)?;
	Ok(account.sign_digest(digest, convention)?)
}

/// Digest builder and signer bound to one verifying contract.
///
/// Construct a fresh signer whenever the contract is redeployed: the domain
/// separator is derived once from the descriptor given here.
#[derive(Debug, Clone)]
pub struct TypedMessageSigner {
	domain: DomainDescriptor,
	domain_separator: B256,
	convention: VConvention,
}

impl TypedMessageSigner {
	pub fn new(domain: DomainDescriptor, convention: VConvention) -> Result<Self, SignerError> {
		let domain_separator = compute_domain_separator(&domain)?;
		tracing::debug!(
			name = %domain.name,
			version = %domain.version,
			chain_id = domain.chain_id,
			verifying_contract = %domain.verifying_contract,
			separator = %truncate_hex(&domain_separator.to_string()),
			"Initialized typed message signer"
		);
		Ok(Self {
			domain,
			domain_separator,
			convention,
		})
	}

	pub fn domain(&self) -> &DomainDescriptor {
		&self.domain
	}

	pub fn domain_separator(&self) -> B256 {
		self.domain_separator
	}

	pub fn convention(&self) -> VConvention {
		self.convention
	}

	/// Struct hash of `message` under its own type hash.
	pub fn struct_hash<M: TypedMessage + ?Sized>(&self, message: &M) -> B256 {
		compute_struct_hash(&message.type_hash(), message)
	}

	/// Final approval digest of `message` under this signer's domain.
	pub fn digest<M: TypedMessage + ?Sized>(&self, message: &M) -> B256 {
		compute_final_digest(&self.domain_separator, &self.struct_hash(message))
	}

	/// Signs `message` with a raw key.
	pub fn sign_message<M: TypedMessage + ?Sized>(
		&self,
		message: &M,
		private_key: &B256,
	) -> Result<Signature, SignerError> {
		sign(&self.digest(message), private_key, self.convention)
	}

	/// Signs `message` with an account, returning the digest alongside.
	pub fn sign_with_account<M: TypedMessage + ?Sized>(
		&self,
		message: &M,
		account: &dyn AccountInterface,
	) -> Result<(B256, Signature, Address), SignerError> {
		let digest = self.digest(message);
		let signature = account.sign_digest(&digest, self.convention)?;
		Ok((digest, signature, account.address()))
	}
}
