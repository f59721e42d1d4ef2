//! Account management for the approval signer.
//!
//! This crate abstracts the key that authorises approvals. An account knows its
//! address and can produce recoverable secp256k1 signatures over 32-byte
//! digests. Implementations are selected by name from configuration through
//! the same factory registry pattern used for every pluggable component.

use alloy_primitives::{Address, PrimitiveSignature, B256, U256};
use signer_types::{ImplementationRegistry, Signature, VConvention};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when a signer address cannot be recovered.
	#[error("Recovery failed: {0}")]
	Recovery(String),
	/// Error that occurs when interacting with the account implementation.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Trait defining the interface for account implementations.
///
/// Signing is synchronous: it is a bounded amount of curve arithmetic with no
/// I/O, so implementations must not block on external services.
pub trait AccountInterface: Send + Sync {
	/// Address derived from the account's public key.
	fn address(&self) -> Address;

	/// Signs a prehashed 32-byte digest, encoding `v` under `convention`.
	///
	/// No EIP-191 prefix is applied; the digest is signed as given.
	fn sign_digest(&self, digest: &B256, convention: VConvention)
		-> Result<Signature, AccountError>;
}

/// Type alias for account factory functions.
pub type AccountFactory = fn(&toml::Value) -> Result<Box<dyn AccountInterface>, AccountError>;

/// Registry trait for account implementations.
pub trait AccountRegistry: ImplementationRegistry<Factory = AccountFactory> {}

/// Get all registered account implementations as (name, factory) pairs.
pub fn get_all_implementations() -> Vec<(&'static str, AccountFactory)> {
	use implementations::local;

	vec![(local::Registry::NAME, local::Registry::factory())]
}

/// Looks up a registered implementation by its configuration name and builds it.
pub fn create_account_by_name(
	name: &str,
	config: &toml::Value,
) -> Result<Box<dyn AccountInterface>, AccountError> {
	let factory = get_all_implementations()
		.into_iter()
		.find(|(registered, _)| *registered == name)
		.map(|(_, factory)| factory)
		.ok_or_else(|| {
			AccountError::Implementation(format!("Unknown account implementation '{}'", name))
		})?;
	factory(config)
}

/// Recovers the address that produced `signature` over `digest`.
///
/// Accepts `v` in either convention. This mirrors what the verifying contract
/// does with `ecrecover`, so a round trip through it is the local check that a
/// signature will be accepted.
pub fn recover_signer(digest: &B256, signature: &Signature) -> Result<Address, AccountError> {
	let y_parity = signature.y_parity().ok_or_else(|| {
		AccountError::Recovery(format!("Invalid recovery id v={}", signature.v))
	})?;
	let sig = PrimitiveSignature::new(
		U256::from_be_bytes(signature.r.0),
		U256::from_be_bytes(signature.s.0),
		y_parity,
	);
	sig.recover_address_from_prehash(digest)
		.map_err(|e| AccountError::Recovery(e.to_string()))
}

/// Service that manages account operations.
pub struct AccountService {
	/// The underlying account implementation.
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	/// Retrieves the address associated with the managed account.
	pub fn get_address(&self) -> Address {
		self.implementation.address()
	}

	/// The underlying implementation, for callers that sign through the trait.
	pub fn account(&self) -> &dyn AccountInterface {
		self.implementation.as_ref()
	}

	/// Signs a digest with the managed account.
	pub fn sign(&self, digest: &B256, convention: VConvention) -> Result<Signature, AccountError> {
		self.implementation.sign_digest(digest, convention)
	}
}
