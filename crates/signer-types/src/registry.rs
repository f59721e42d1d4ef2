//! Registry trait for self-registering implementations.
//!
//! Pluggable components (currently accounts) expose a `Registry` type that
//! names the configuration key they answer to and hands out their factory.

/// Base trait for implementation registries.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation,
	/// e.g. "local" for `[account.implementations.local]`.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
