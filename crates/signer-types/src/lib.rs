//! Common types for the approval signer workspace.
//!
//! This crate defines the data shared by every signer component: the EIP-712
//! signing domain, the typed approval messages and their type hashes, the
//! recoverable signature representation, and the low-level ABI word encoder
//! used to build struct hashes.

/// Signing domain descriptor and domain validation.
pub mod domain;
/// Typed approval messages and their canonical type hashes.
pub mod messages;
/// Self-registering implementation registry trait.
pub mod registry;
/// Secret string wrapper for key material.
pub mod secret_string;
/// Recoverable ECDSA signature and `v` conventions.
pub mod signature;
/// Encoding, parsing and formatting helpers.
pub mod utils;

pub use alloy_primitives::{Address, B256, U256};
pub use domain::{DomainDescriptor, DomainError};
pub use messages::{
	ApprovalMessage, AttributePurchase, PurchaseApproval, TypeHash, TypedMessage, VaultApproval,
};
pub use registry::ImplementationRegistry;
pub use secret_string::SecretString;
pub use signature::{Signature, VConvention};
pub use utils::{parse_address, parse_bool, parse_uint256, without_0x_prefix, EncodingError};
