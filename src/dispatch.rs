use crate::error::Result;
use crate::principal::Principal;
use crate::registry::{AuthorityRegistry, SharedAuthorityRegistry};
use serde::{Deserialize, Serialize};

// ================================
// Host Dispatch Boundary
// ================================

/// Operation selector supplied by the host execution context.
///
/// The host provides the selector, its typed arguments, and the caller
/// identity for the invocation; [`AuthorityRegistry::dispatch`] routes to
/// the matching registry operation. Tags serialize in the kebab-case form
/// the operations are named by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Operation {
    IsAdmin,
    AddAuthority { authority: Principal },
    RemoveAuthority { authority: Principal },
    IsVerified { authority: Principal },
    TransferAdmin { new_admin: Principal },
}

/// Success value of a dispatched operation.
///
/// Mutations return `Unit`; the two queries return `Bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Unit,
    Bool(bool),
}

impl Outcome {
    /// The boolean payload, if this outcome carries one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Outcome::Bool(value) => Some(*value),
            Outcome::Unit => None,
        }
    }
}

impl AuthorityRegistry {
    /// Execute one host-supplied operation under `caller`'s identity.
    ///
    /// Queries ignore the caller; mutations are admin-gated. Failures carry
    /// the stable numeric codes via [`crate::AuthorityError::code`].
    pub fn dispatch(&mut self, caller: &Principal, operation: Operation) -> Result<Outcome> {
        match operation {
            Operation::IsAdmin => Ok(Outcome::Bool(self.is_admin(caller))),
            Operation::AddAuthority { authority } => {
                self.add_authority(caller, authority)?;
                Ok(Outcome::Unit)
            }
            Operation::RemoveAuthority { authority } => {
                self.remove_authority(caller, &authority)?;
                Ok(Outcome::Unit)
            }
            Operation::IsVerified { authority } => Ok(Outcome::Bool(self.is_verified(&authority))),
            Operation::TransferAdmin { new_admin } => {
                self.transfer_admin(caller, new_admin)?;
                Ok(Outcome::Unit)
            }
        }
    }
}

impl SharedAuthorityRegistry {
    /// Execute one host-supplied operation under `caller`'s identity.
    pub fn dispatch(&self, caller: &Principal, operation: Operation) -> Result<Outcome> {
        match operation {
            Operation::IsAdmin => Ok(Outcome::Bool(self.is_admin(caller))),
            Operation::AddAuthority { authority } => {
                self.add_authority(caller, authority)?;
                Ok(Outcome::Unit)
            }
            Operation::RemoveAuthority { authority } => {
                self.remove_authority(caller, &authority)?;
                Ok(Outcome::Unit)
            }
            Operation::IsVerified { authority } => Ok(Outcome::Bool(self.is_verified(&authority))),
            Operation::TransferAdmin { new_admin } => {
                self.transfer_admin(caller, new_admin)?;
                Ok(Outcome::Unit)
            }
        }
    }
}
