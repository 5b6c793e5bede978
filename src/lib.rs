// Authority Registry - Admin-gated registry of verified authority identities
//
// A single admin principal maintains a membership set of verified
// authorities and can hand the admin role itself to another principal. The
// host execution context supplies the caller identity for every gated call;
// persistence and transport stay host concerns.

// ================================
// Module Declarations
// ================================

/// Registry error types and the numeric code contract
pub mod error;

/// Opaque principal identity
pub mod principal;

/// The authority registry state machine
pub mod registry;

/// Host operation dispatch boundary
pub mod dispatch;

/// Bootstrap configuration
pub mod config;

// ================================
// Public API Re-exports
// ================================

// Re-export error types and codes
pub use error::{
    AuthorityError, ConfigError, Result, ERR_ALREADY_VERIFIED, ERR_NOT_ADMIN, ERR_NOT_VERIFIED,
};

// Re-export identity and registry components
pub use principal::Principal;
pub use registry::{AuthorityRegistry, RegistrySnapshot, SharedAuthorityRegistry};

// Re-export the host boundary
pub use dispatch::{Operation, Outcome};

// Re-export configuration
pub use config::RegistryConfig;

// ================================
// Convenience Functions
// ================================

/// Create a registry with the given bootstrap admin.
pub fn create_registry(bootstrap_admin: Principal) -> AuthorityRegistry {
    AuthorityRegistry::new(bootstrap_admin)
}

/// Create a thread-safe registry handle with the given bootstrap admin.
pub fn create_shared_registry(bootstrap_admin: Principal) -> SharedAuthorityRegistry {
    SharedAuthorityRegistry::new(bootstrap_admin)
}

// ================================
// Tests
// ================================
