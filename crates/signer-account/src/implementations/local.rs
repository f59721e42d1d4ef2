//! Local account backed by an in-process secp256k1 key.
//!
//! The key is either given directly as 32 hex-encoded bytes or derived from a
//! BIP-39 mnemonic at `m/44'/60'/0'/0/{index}`, the standard Ethereum path
//! that development networks use for their funded test accounts.

use crate::{AccountError, AccountFactory, AccountInterface, AccountRegistry};
use alloy_primitives::{Address, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use signer_types::{
	without_0x_prefix, ImplementationRegistry, SecretString, Signature, VConvention,
};

/// Account holding a private key in memory.
pub struct LocalAccount {
	signer: PrivateKeySigner,
}

impl LocalAccount {
	/// Builds an account from raw key bytes.
	///
	/// Fails when the key is zero or not below the secp256k1 group order.
	pub fn from_key_bytes(key: &B256) -> Result<Self, AccountError> {
		if key.is_zero() {
			return Err(AccountError::InvalidKey(
				"private key cannot be zero".to_string(),
			));
		}
		let signer = PrivateKeySigner::from_bytes(key).map_err(|_| {
			AccountError::InvalidKey("private key is not a valid secp256k1 scalar".to_string())
		})?;
		Ok(Self { signer })
	}

	/// Builds an account from a hex-encoded key, with or without `0x`.
	pub fn from_private_key(key: &SecretString) -> Result<Self, AccountError> {
		let signer: PrivateKeySigner = key.with_exposed(|raw| {
			let hex = without_0x_prefix(raw.trim());
			if hex.len() != 64 {
				return Err(AccountError::InvalidKey(format!(
					"private key must be 32 bytes, got {} hex characters",
					hex.len()
				)));
			}
			hex.parse().map_err(|_| {
				AccountError::InvalidKey("private key is not a valid secp256k1 key".to_string())
			})
		})?;
		Ok(Self { signer })
	}

	/// Derives the account at `m/44'/60'/0'/0/{index}` from a BIP-39 phrase.
	pub fn from_mnemonic(phrase: &SecretString, index: u32) -> Result<Self, AccountError> {
		let signer = phrase
			.with_exposed(|words| {
				MnemonicBuilder::<English>::default()
					.phrase(words.trim())
					.index(index)?
					.build()
			})
			.map_err(|e| AccountError::InvalidKey(format!("mnemonic derivation failed: {}", e)))?;
		Ok(Self { signer })
	}
}

impl AccountInterface for LocalAccount {
	fn address(&self) -> Address {
		self.signer.address()
	}

	fn sign_digest(
		&self,
		digest: &B256,
		convention: VConvention,
	) -> Result<Signature, AccountError> {
		let raw = self
			.signer
			.sign_hash_sync(digest)
			.map_err(|e| AccountError::SigningFailed(e.to_string()))?
			.as_bytes();

		let y_parity = match raw[64] {
			0 | 27 => false,
			1 | 28 => true,
			other => {
				return Err(AccountError::SigningFailed(format!(
					"unexpected recovery id {}",
					other
				)))
			},
		};

		let signature = Signature::new(
			y_parity,
			B256::from_slice(&raw[..32]),
			B256::from_slice(&raw[32..64]),
			convention,
		);
		tracing::debug!(signer = %self.signer.address(), digest = %digest, v = signature.v, "Signed digest");
		Ok(signature)
	}
}

/// Factory function to create a local account from configuration.
///
/// Configuration parameters:
/// - `private_key`: hex-encoded 32-byte key, or
/// - `mnemonic`: BIP-39 phrase, with optional `index` (default 0)
pub fn create_account(config: &toml::Value) -> Result<Box<dyn AccountInterface>, AccountError> {
	let private_key = config.get("private_key").and_then(|v| v.as_str());
	let mnemonic = config.get("mnemonic").and_then(|v| v.as_str());

	let account = match (private_key, mnemonic) {
		(Some(key), None) => LocalAccount::from_private_key(&SecretString::from(key))?,
		(None, Some(phrase)) => {
			let index = match config.get("index") {
				None => 0,
				Some(value) => value
					.as_integer()
					.and_then(|i| u32::try_from(i).ok())
					.ok_or_else(|| {
						AccountError::InvalidKey(
							"index must be a non-negative 32-bit integer".to_string(),
						)
					})?,
			};
			LocalAccount::from_mnemonic(&SecretString::from(phrase), index)?
		},
		(Some(_), Some(_)) => {
			return Err(AccountError::InvalidKey(
				"configure either private_key or mnemonic, not both".to_string(),
			))
		},
		(None, None) => {
			return Err(AccountError::InvalidKey(
				"private_key or mnemonic is required".to_string(),
			))
		},
	};

	tracing::info!(address = %account.address(), "Loaded local account");
	Ok(Box::new(account))
}

/// Registry for the local account implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = AccountFactory;

	fn factory() -> Self::Factory {
		create_account
	}
}

impl AccountRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::recover_signer;
	use alloy_primitives::{address, keccak256};

	const MNEMONIC: &str = "test test test test test test test test test test test junk";
	const KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn table(entries: &[(&str, toml::Value)]) -> toml::Value {
		let mut map = toml::map::Map::new();
		for (k, v) in entries {
			map.insert(k.to_string(), v.clone());
		}
		toml::Value::Table(map)
	}

	#[test]
	fn test_private_key_address() {
		let account = LocalAccount::from_private_key(&SecretString::from(KEY_0)).unwrap();
		assert_eq!(
			account.address(),
			address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
		);
	}

	#[test]
	fn test_private_key_without_prefix() {
		let account =
			LocalAccount::from_private_key(&SecretString::from(without_0x_prefix(KEY_0))).unwrap();
		assert_eq!(
			account.address(),
			address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
		);
	}

	#[test]
	fn test_mnemonic_derivation_matches_dev_accounts() {
		let phrase = SecretString::from(MNEMONIC);
		let first = LocalAccount::from_mnemonic(&phrase, 0).unwrap();
		let second = LocalAccount::from_mnemonic(&phrase, 1).unwrap();
		assert_eq!(
			first.address(),
			address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
		);
		assert_eq!(
			second.address(),
			address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")
		);
	}

	#[test]
	fn test_zero_key_rejected() {
		let result = LocalAccount::from_key_bytes(&B256::ZERO);
		assert!(matches!(result, Err(AccountError::InvalidKey(_))));
	}

	#[test]
	fn test_key_above_group_order_rejected() {
		let result = LocalAccount::from_key_bytes(&B256::repeat_byte(0xff));
		assert!(matches!(result, Err(AccountError::InvalidKey(_))));
	}

	#[test]
	fn test_zero_hex_key_rejected() {
		let zero = format!("0x{}", "0".repeat(64));
		let result = LocalAccount::from_private_key(&SecretString::from(zero.as_str()));
		assert!(matches!(result, Err(AccountError::InvalidKey(_))));
	}

	#[test]
	fn test_malformed_hex_rejected() {
		let non_hex = format!("0x{}", "g".repeat(64));
		for bad in ["0x1234", "zz", non_hex.as_str()] {
			assert!(
				LocalAccount::from_private_key(&SecretString::from(bad)).is_err(),
				"accepted {}",
				bad
			);
		}
	}

	#[test]
	fn test_invalid_mnemonic_rejected() {
		let result = LocalAccount::from_mnemonic(&SecretString::from("not a real phrase"), 0);
		assert!(matches!(result, Err(AccountError::InvalidKey(_))));
	}

	#[test]
	fn test_signatures_are_deterministic_and_recoverable() {
		let account = LocalAccount::from_private_key(&SecretString::from(KEY_0)).unwrap();
		let digest = keccak256(b"vault approval");

		let first = account.sign_digest(&digest, VConvention::Legacy).unwrap();
		let second = account.sign_digest(&digest, VConvention::Legacy).unwrap();
		assert_eq!(first, second);
		assert!(first.v == 27 || first.v == 28);
		assert_eq!(recover_signer(&digest, &first).unwrap(), account.address());

		let parity = account.sign_digest(&digest, VConvention::Parity).unwrap();
		assert_eq!(parity.v, first.v - 27);
		assert_eq!((parity.r, parity.s), (first.r, first.s));
	}

	#[test]
	fn test_factory_with_private_key() {
		let config = table(&[("private_key", toml::Value::String(KEY_0.to_string()))]);
		let account = create_account(&config).unwrap();
		assert_eq!(
			account.address(),
			address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
		);
	}

	#[test]
	fn test_factory_with_mnemonic_and_index() {
		let config = table(&[
			("mnemonic", toml::Value::String(MNEMONIC.to_string())),
			("index", toml::Value::Integer(1)),
		]);
		let account = create_account(&config).unwrap();
		assert_eq!(
			account.address(),
			address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")
		);
	}

	#[test]
	fn test_factory_rejects_ambiguous_or_missing_key() {
		let both = table(&[
			("private_key", toml::Value::String(KEY_0.to_string())),
			("mnemonic", toml::Value::String(MNEMONIC.to_string())),
		]);
		assert!(create_account(&both).is_err());
		assert!(create_account(&table(&[])).is_err());

		let negative_index = table(&[
			("mnemonic", toml::Value::String(MNEMONIC.to_string())),
			("index", toml::Value::Integer(-1)),
		]);
		assert!(create_account(&negative_index).is_err());
	}
}
