use crate::principal::Principal;
use thiserror::Error;

// ================================
// Registry Error Types
// ================================

/// Code returned when the caller is not the current admin.
pub const ERR_NOT_ADMIN: u32 = 100;

/// Code returned when adding an authority that is already verified.
pub const ERR_ALREADY_VERIFIED: u32 = 101;

/// Code returned when removing an authority that is not verified.
pub const ERR_NOT_VERIFIED: u32 = 102;

/// Rejected preconditions for registry operations.
///
/// Every variant maps to a stable numeric code that calling systems branch
/// on; see [`AuthorityError::code`]. A failed operation leaves registry
/// state unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    #[error("Caller is not the current admin")]
    NotAdmin,

    #[error("Authority already verified: {0}")]
    AlreadyVerified(Principal),

    #[error("Authority not verified: {0}")]
    NotVerified(Principal),
}

impl AuthorityError {
    /// Stable numeric code for this error condition.
    pub const fn code(&self) -> u32 {
        match self {
            AuthorityError::NotAdmin => ERR_NOT_ADMIN,
            AuthorityError::AlreadyVerified(_) => ERR_ALREADY_VERIFIED,
            AuthorityError::NotVerified(_) => ERR_NOT_VERIFIED,
        }
    }
}

impl From<AuthorityError> for u32 {
    fn from(err: AuthorityError) -> u32 {
        err.code()
    }
}

// ================================
// Configuration Error Types
// ================================

/// Configuration loading errors.
///
/// These occur before a registry exists and are not part of the numeric
/// operation code contract.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Bootstrap admin is not configured")]
    MissingBootstrapAdmin,

    #[error("Bootstrap admin identifier is empty")]
    InvalidBootstrapAdmin,
}

/// Registry result type
pub type Result<T> = std::result::Result<T, AuthorityError>;
