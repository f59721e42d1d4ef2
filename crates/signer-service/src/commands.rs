//! Subcommands of the approval signer CLI.
//!
//! Arguments arrive as strings and are parsed here so that a negative or
//! oversized integer fails with the offending field named, before anything
//! is hashed or signed.

use alloy_primitives::{Address, B256};
use clap::Subcommand;
use serde::Serialize;
use signer_core::{ApprovalSigner, SignedApproval, SignerError};
use signer_types::{
	parse_address, parse_bool, parse_uint256, AttributePurchase, PurchaseApproval, Signature,
	VaultApproval,
};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Print the configured signer address
	Address,
	/// Sign a vault access grant or revocation
	Vault {
		/// Key of the signing domain in the configuration
		#[arg(long)]
		domain: String,
		#[arg(long)]
		user: String,
		/// Contract being granted or revoked access
		#[arg(long)]
		contract: String,
		/// `true` to grant, `false` to revoke
		#[arg(long)]
		approved: String,
		/// Current on-chain nonce of the user
		#[arg(long, allow_hyphen_values = true)]
		nonce: String,
	},
	/// Sign an NFT purchase approval
	Purchase {
		#[arg(long)]
		domain: String,
		#[arg(long)]
		user: String,
		#[arg(long, allow_hyphen_values = true)]
		tier: String,
		#[arg(long, allow_hyphen_values = true)]
		score: String,
		#[arg(long, allow_hyphen_values = true)]
		nonce: String,
	},
	/// Sign a packed attribute purchase
	Attributes {
		#[arg(long, allow_hyphen_values = true)]
		score: String,
		#[arg(long, allow_hyphen_values = true)]
		character: String,
		/// Attribute name, repeatable and order-sensitive
		#[arg(long = "attr")]
		attributes: Vec<String>,
	},
}

/// JSON printed for a signed approval.
#[derive(Debug, Serialize)]
pub struct SignedOutput {
	pub digest: B256,
	pub signature: Signature,
	/// `r || s || v` as 0x-prefixed hex.
	pub signature_bytes: String,
	pub signer: Address,
}

impl From<SignedApproval> for SignedOutput {
	fn from(signed: SignedApproval) -> Self {
		Self {
			digest: signed.digest,
			signature_bytes: signed.signature.to_hex(),
			signature: signed.signature,
			signer: signed.signer,
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
	Address { signer: Address },
	Signed(SignedOutput),
}

/// Runs one command against a built signer.
///
/// Field parse failures surface as `SignerError::Encoding`.
pub fn execute(signer: &ApprovalSigner, command: &Command) -> Result<Output, SignerError> {
	let signed = match command {
		Command::Address => {
			return Ok(Output::Address {
				signer: signer.address(),
			})
		},
		Command::Vault {
			domain,
			user,
			contract,
			approved,
			nonce,
		} => {
			let approval = VaultApproval {
				user: parse_address("user", user)?,
				contract: parse_address("contract", contract)?,
				approved: parse_bool("approved", approved)?,
				nonce: parse_uint256("nonce", nonce)?,
			};
			signer.sign_vault_approval(domain, approval)?
		},
		Command::Purchase {
			domain,
			user,
			tier,
			score,
			nonce,
		} => {
			let approval = PurchaseApproval {
				user: parse_address("user", user)?,
				tier: parse_uint256("tier", tier)?,
				score: parse_uint256("score", score)?,
				nonce: parse_uint256("nonce", nonce)?,
			};
			signer.sign_purchase_approval(domain, approval)?
		},
		Command::Attributes {
			score,
			character,
			attributes,
		} => {
			let purchase = AttributePurchase {
				score: parse_uint256("score", score)?,
				character: parse_uint256("character", character)?,
				attributes: attributes.clone(),
			};
			signer.sign_attributes(&purchase)?
		},
	};

	Ok(Output::Signed(signed.into()))
}
