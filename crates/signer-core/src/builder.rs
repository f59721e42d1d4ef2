//! Builder for constructing an approval signer from configuration.
//!
//! Account implementations are created through factory functions keyed by the
//! implementation name used in `[account.implementations]`. Every configured
//! domain is turned into a `TypedMessageSigner` up front so that a bad domain
//! fails at startup rather than on the first request.

use crate::service::ApprovalSigner;
use signer_account::{get_all_implementations, AccountFactory, AccountService};
use signer_config::Config;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while constructing an approval signer.
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Missing required component: {0}")]
	MissingComponent(String),
}

/// Builder for an `ApprovalSigner`.
pub struct ApprovalSignerBuilder {
	config: Config,
}

impl ApprovalSignerBuilder {
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Builds with every account implementation registered in `signer-account`.
	pub fn build(self) -> Result<ApprovalSigner, BuilderError> {
		let factories = get_all_implementations()
			.into_iter()
			.map(|(name, factory)| (name.to_string(), factory))
			.collect();
		self.build_with_factories(factories)
	}

	/// Builds using the given account factories.
	pub fn build_with_factories(
		self,
		account_factories: HashMap<String, AccountFactory>,
	) -> Result<ApprovalSigner, BuilderError> {
		let primary = &self.config.account.primary;
		let account_config = self
			.config
			.account
			.implementations
			.get(primary)
			.ok_or_else(|| {
				BuilderError::MissingComponent(format!(
					"Primary account '{}' has no configuration",
					primary
				))
			})?;
		let factory = account_factories.get(primary).ok_or_else(|| {
			BuilderError::MissingComponent(format!(
				"No account implementation registered as '{}'",
				primary
			))
		})?;

		let implementation = match factory(account_config) {
			Ok(implementation) => {
				tracing::info!(component = "account", implementation = %primary, address = %implementation.address(), "Loaded");
				implementation
			},
			Err(e) => {
				tracing::error!(
					component = "account",
					implementation = %primary,
					error = %e,
					"Failed to create account implementation"
				);
				return Err(BuilderError::Config(format!(
					"Failed to create account implementation '{}': {}",
					primary, e
				)));
			},
		};

		let convention = self.config.signer.v_convention;
		let mut domains = HashMap::new();
		for (key, domain_config) in &self.config.domains {
			let descriptor = domain_config
				.to_descriptor()
				.map_err(|e| BuilderError::Config(format!("Domain '{}': {}", key, e)))?;
			domains.insert(key.clone(), descriptor);
		}

		if domains.is_empty() {
			return Err(BuilderError::MissingComponent(
				"No signing domains configured".into(),
			));
		}

		let signer = ApprovalSigner::new(
			self.config.signer.id.clone(),
			domains,
			AccountService::new(implementation),
			convention,
		)
		.map_err(|e| BuilderError::Config(e.to_string()))?;

		for key in signer.domain_keys() {
			if let Ok(domain) = signer.domain(key) {
				tracing::info!(
					component = "domain",
					key = %key,
					name = %domain.domain().name,
					chain_id = domain.domain().chain_id,
					separator = %domain.domain_separator(),
					"Loaded"
				);
			}
		}

		Ok(signer)
	}
}
