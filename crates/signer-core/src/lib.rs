//! Core signing pipeline for EIP-712 approval messages.
//!
//! The pipeline is pure and stateless: a signing domain and a typed message
//! produce a digest, and the digest plus a key produce a recoverable signature.
//!
//! ```text
//! DomainDescriptor ─┐
//!                   ├─► approval digest ─► Signature { v, r, s }
//! TypedMessage ─────┘
//! ```
//!
//! Nonces, chain ids and contract name/version are read from chain by the
//! caller; nothing here performs I/O or tracks replay state.

use signer_account::AccountError;
use signer_types::{DomainError, EncodingError};
use thiserror::Error;

pub mod builder;
pub mod service;
pub mod typed;

pub use builder::{ApprovalSignerBuilder, BuilderError};
pub use service::{ApprovalSigner, SignedApproval};
pub use typed::{
	compute_approval_digest, compute_domain_separator, compute_struct_hash, sign,
	TypedMessageSigner,
};

/// Errors that can occur while building digests or signing them.
#[derive(Debug, Error)]
pub enum SignerError {
	/// The signing domain failed local validation.
	#[error("Invalid domain: {0}")]
	InvalidDomain(#[from] DomainError),
	/// The key was rejected or the curve operation failed.
	#[error("Signing failed: {0}")]
	Signing(String),
	/// A message field does not fit its declared width.
	#[error("Encoding error: {0}")]
	Encoding(#[from] EncodingError),
	/// No signing domain is configured under the requested key.
	#[error("Unknown domain '{0}'")]
	UnknownDomain(String),
}

impl From<AccountError> for SignerError {
	fn from(err: AccountError) -> Self {
		SignerError::Signing(err.to_string())
	}
}
