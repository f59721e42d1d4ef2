//! Configuration for the approval signer.
//!
//! Configuration is read from TOML. String values may reference environment
//! variables as `${VAR}` or `${VAR:-default}`, which keeps private keys and
//! mnemonics out of the file itself.
//!
//! ## Modular Configuration Support
//!
//! Configurations can be split into multiple files:
//! - Use `include = ["domains.toml", "account.toml"]` to include other config files
//! - Each top-level section must be unique across all files (no duplicates allowed)

mod loader;

use regex::Regex;
use serde::{Deserialize, Serialize};
use signer_types::{parse_address, DomainDescriptor, VConvention};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub use loader::ConfigLoader;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message, drop the echoed input
		ConfigError::Parse(err.message().to_string())
	}
}

/// Top-level signer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Identity and signature encoding of this signer instance.
	pub signer: SignerConfig,
	/// Signing domains, keyed by the name callers use to select them.
	pub domains: HashMap<String, DomainConfig>,
	/// Key material used to sign.
	pub account: AccountConfig,
}

/// Configuration specific to the signer instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignerConfig {
	/// Identifier used in logs.
	pub id: String,
	/// How `v` is encoded in produced signatures. Defaults to `legacy` (27/28).
	#[serde(default)]
	pub v_convention: VConvention,
}

/// A verifying contract's EIP-712 domain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DomainConfig {
	/// The contract's `name()`.
	pub name: String,
	/// The contract's `version()`.
	pub version: String,
	/// Chain the contract is deployed on.
	pub chain_id: u64,
	/// Deployed contract address.
	pub verifying_contract: String,
}

impl DomainConfig {
	/// Converts into a validated `DomainDescriptor`.
	pub fn to_descriptor(&self) -> Result<DomainDescriptor, ConfigError> {
		let verifying_contract = parse_address("verifying_contract", &self.verifying_contract)
			.map_err(|e| ConfigError::Validation(e.to_string()))?;
		let descriptor = DomainDescriptor::new(
			self.name.clone(),
			self.version.clone(),
			verifying_contract,
			self.chain_id,
		);
		descriptor
			.validate()
			.map_err(|e| ConfigError::Validation(e.to_string()))?;
		Ok(descriptor)
	}
}

/// Configuration for account management.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of account implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to bound regex work.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)))
				},
			},
		};

		result.push_str(&input[last_end..full_match.start()]);
		result.push_str(&value);
		last_end = full_match.end();
	}
	result.push_str(&input[last_end..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, following `include` directives.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let path_buf = Path::new(path);
		let base_dir = path_buf.parent().unwrap_or_else(|| Path::new("."));

		let mut loader = loader::ConfigLoader::new(base_dir);
		let file_name = path_buf
			.file_name()
			.ok_or_else(|| ConfigError::Validation(format!("Invalid path: {}", path)))?;
		loader.load_config(file_name).await
	}

	/// Returns the validated descriptor of the domain configured under `key`.
	pub fn domain(&self, key: &str) -> Result<DomainDescriptor, ConfigError> {
		self.domains
			.get(key)
			.ok_or_else(|| ConfigError::Validation(format!("Unknown domain '{}'", key)))?
			.to_descriptor()
	}

	/// Validates the configuration:
	/// - signer id is not empty
	/// - at least one domain, each with non-empty name/version and a valid address
	/// - the primary account implementation is configured
	fn validate(&self) -> Result<(), ConfigError> {
		if self.signer.id.is_empty() {
			return Err(ConfigError::Validation("Signer ID cannot be empty".into()));
		}

		if self.domains.is_empty() {
			return Err(ConfigError::Validation(
				"At least one signing domain must be configured".into(),
			));
		}
		for (key, domain) in &self.domains {
			domain.to_descriptor().map_err(|e| {
				ConfigError::Validation(format!("Domain '{}' is invalid: {}", key, e))
			})?;
		}

		if self.account.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Account primary implementation cannot be empty".into(),
			));
		}
		if !self
			.account
			.implementations
			.contains_key(&self.account.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary account '{}' not found in implementations",
				self.account.primary
			)));
		}

		Ok(())
	}
}

/// Parses TOML, resolving environment variables first and validating after.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
