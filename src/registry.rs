use crate::error::{AuthorityError, Result};
use crate::principal::Principal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::RwLock;
use tracing::{debug, info};

// ================================
// Authority Registry
// ================================

/// Admin-gated registry of verified authority identities.
///
/// Holds exactly one admin principal and a membership set of verified
/// authorities. Every mutation is gated on the caller being the current
/// admin at call time, and all checks run before any write, so a failed
/// call leaves the registry untouched. Caller identity is an explicit
/// parameter supplied by the host execution context.
#[derive(Debug, Clone)]
pub struct AuthorityRegistry {
    admin: Principal,
    verified: HashSet<Principal>,
}

impl AuthorityRegistry {
    /// Create a registry with the given bootstrap admin and an empty
    /// verified set.
    pub fn new(bootstrap_admin: Principal) -> Self {
        Self {
            admin: bootstrap_admin,
            verified: HashSet::new(),
        }
    }

    /// True iff `caller` is the current admin.
    pub fn is_admin(&self, caller: &Principal) -> bool {
        *caller == self.admin
    }

    /// The current admin.
    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    /// Number of verified authorities.
    pub fn verified_count(&self) -> usize {
        self.verified.len()
    }

    /// True iff `authority` is in the verified set.
    ///
    /// Public query: callable by any party, no caller identity required.
    pub fn is_verified(&self, authority: &Principal) -> bool {
        self.verified.contains(authority)
    }

    /// Add `authority` to the verified set.
    ///
    /// Fails with `NotAdmin` unless `caller` is the current admin, then
    /// with `AlreadyVerified` if `authority` is already present. A repeated
    /// add is a meaningful rejection, not a silent no-op.
    pub fn add_authority(&mut self, caller: &Principal, authority: Principal) -> Result<()> {
        if !self.is_admin(caller) {
            debug!(%caller, "add_authority rejected: caller is not admin");
            return Err(AuthorityError::NotAdmin);
        }
        if self.verified.contains(&authority) {
            debug!(%authority, "add_authority rejected: already verified");
            return Err(AuthorityError::AlreadyVerified(authority));
        }

        info!(%authority, "authority verified");
        self.verified.insert(authority);
        Ok(())
    }

    /// Remove `authority` from the verified set.
    ///
    /// Fails with `NotAdmin` unless `caller` is the current admin, then
    /// with `NotVerified` if `authority` is not present.
    pub fn remove_authority(&mut self, caller: &Principal, authority: &Principal) -> Result<()> {
        if !self.is_admin(caller) {
            debug!(%caller, "remove_authority rejected: caller is not admin");
            return Err(AuthorityError::NotAdmin);
        }
        if !self.verified.contains(authority) {
            debug!(%authority, "remove_authority rejected: not verified");
            return Err(AuthorityError::NotVerified(authority.clone()));
        }

        self.verified.remove(authority);
        info!(%authority, "authority removed");
        Ok(())
    }

    /// Hand the admin role to `new_admin`.
    ///
    /// Single-step and irrevocable: the previous admin loses all privilege
    /// as soon as the call returns, and every subsequent admin check uses
    /// the new value. Transferring to the current admin is accepted and
    /// succeeds.
    pub fn transfer_admin(&mut self, caller: &Principal, new_admin: Principal) -> Result<()> {
        if !self.is_admin(caller) {
            debug!(%caller, "transfer_admin rejected: caller is not admin");
            return Err(AuthorityError::NotAdmin);
        }

        info!(previous = %self.admin, %new_admin, "admin transferred");
        self.admin = new_admin;
        Ok(())
    }
}

// ================================
// Registry Snapshot
// ================================

/// Serializable image of registry state.
///
/// Persistence itself belongs to the host ledger/runtime; this type is the
/// stable shape it stores and restores. The verified list is emitted sorted
/// so snapshots of equal state serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Current admin principal
    pub admin: Principal,

    /// Verified authorities, sorted
    pub verified: Vec<Principal>,
}

impl RegistrySnapshot {
    /// Serialize to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl AuthorityRegistry {
    /// Capture the current state.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let mut verified: Vec<Principal> = self.verified.iter().cloned().collect();
        verified.sort();
        RegistrySnapshot {
            admin: self.admin.clone(),
            verified,
        }
    }

    /// Rebuild a registry from a snapshot.
    ///
    /// Duplicate entries in the snapshot collapse under set semantics.
    pub fn restore(snapshot: RegistrySnapshot) -> Self {
        Self {
            admin: snapshot.admin,
            verified: snapshot.verified.into_iter().collect(),
        }
    }
}

// ================================
// Shared Registry Handle
// ================================

/// Thread-safe handle around an [`AuthorityRegistry`].
///
/// The exclusive write lock serializes mutations, realizing the
/// one-at-a-time execution order the registry assumes of its host for
/// embedders that share it across threads.
#[derive(Debug)]
pub struct SharedAuthorityRegistry {
    inner: RwLock<AuthorityRegistry>,
}

impl SharedAuthorityRegistry {
    /// Create a shared registry with the given bootstrap admin.
    pub fn new(bootstrap_admin: Principal) -> Self {
        Self {
            inner: RwLock::new(AuthorityRegistry::new(bootstrap_admin)),
        }
    }

    /// Wrap an existing registry.
    pub fn from_registry(registry: AuthorityRegistry) -> Self {
        Self {
            inner: RwLock::new(registry),
        }
    }

    /// True iff `caller` is the current admin.
    pub fn is_admin(&self, caller: &Principal) -> bool {
        self.inner.read().unwrap().is_admin(caller)
    }

    /// The current admin.
    pub fn admin(&self) -> Principal {
        self.inner.read().unwrap().admin().clone()
    }

    /// Number of verified authorities.
    pub fn verified_count(&self) -> usize {
        self.inner.read().unwrap().verified_count()
    }

    /// True iff `authority` is in the verified set.
    pub fn is_verified(&self, authority: &Principal) -> bool {
        self.inner.read().unwrap().is_verified(authority)
    }

    /// Add `authority` to the verified set.
    pub fn add_authority(&self, caller: &Principal, authority: Principal) -> Result<()> {
        self.inner.write().unwrap().add_authority(caller, authority)
    }

    /// Remove `authority` from the verified set.
    pub fn remove_authority(&self, caller: &Principal, authority: &Principal) -> Result<()> {
        self.inner
            .write()
            .unwrap()
            .remove_authority(caller, authority)
    }

    /// Hand the admin role to `new_admin`.
    pub fn transfer_admin(&self, caller: &Principal, new_admin: Principal) -> Result<()> {
        self.inner
            .write()
            .unwrap()
            .transfer_admin(caller, new_admin)
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.inner.read().unwrap().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Principal {
        Principal::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM")
    }

    fn authority() -> Principal {
        Principal::new("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG")
    }

    #[test]
    fn test_fresh_registry_state() {
        let registry = AuthorityRegistry::new(admin());

        assert!(registry.is_admin(&admin()));
        assert!(!registry.is_admin(&authority()));
        assert!(!registry.is_verified(&authority()));
        assert_eq!(registry.verified_count(), 0);
        assert_eq!(registry.admin(), &admin());
    }

    #[test]
    fn test_add_authority() {
        let mut registry = AuthorityRegistry::new(admin());

        registry.add_authority(&admin(), authority()).unwrap();
        assert!(registry.is_verified(&authority()));
        assert_eq!(registry.verified_count(), 1);
    }

    #[test]
    fn test_add_authority_twice_rejected() {
        let mut registry = AuthorityRegistry::new(admin());

        registry.add_authority(&admin(), authority()).unwrap();
        let err = registry.add_authority(&admin(), authority()).unwrap_err();

        assert_eq!(err, AuthorityError::AlreadyVerified(authority()));
        assert_eq!(err.code(), 101);
        // The rejection does not disturb existing membership
        assert!(registry.is_verified(&authority()));
        assert_eq!(registry.verified_count(), 1);
    }

    #[test]
    fn test_add_authority_requires_admin() {
        let mut registry = AuthorityRegistry::new(admin());
        let intruder = Principal::new("ST3NBRSFKX28FQ2ZJ1MAKX58HKHSDGNV5N7R21XCP");

        let err = registry.add_authority(&intruder, authority()).unwrap_err();

        assert_eq!(err, AuthorityError::NotAdmin);
        assert_eq!(err.code(), 100);
        assert!(!registry.is_verified(&authority()));
        assert_eq!(registry.verified_count(), 0);
    }

    #[test]
    fn test_remove_authority() {
        let mut registry = AuthorityRegistry::new(admin());

        registry.add_authority(&admin(), authority()).unwrap();
        registry.remove_authority(&admin(), &authority()).unwrap();

        assert!(!registry.is_verified(&authority()));
        assert_eq!(registry.verified_count(), 0);
    }

    #[test]
    fn test_remove_unverified_rejected() {
        let mut registry = AuthorityRegistry::new(admin());

        let err = registry
            .remove_authority(&admin(), &authority())
            .unwrap_err();

        assert_eq!(err, AuthorityError::NotVerified(authority()));
        assert_eq!(err.code(), 102);
        assert!(!registry.is_verified(&authority()));
    }

    #[test]
    fn test_remove_authority_requires_admin() {
        let mut registry = AuthorityRegistry::new(admin());
        registry.add_authority(&admin(), authority()).unwrap();

        let err = registry
            .remove_authority(&authority(), &authority())
            .unwrap_err();

        assert_eq!(err, AuthorityError::NotAdmin);
        // Admin precondition is checked before membership
        assert!(registry.is_verified(&authority()));
    }

    #[test]
    fn test_transfer_admin() {
        let mut registry = AuthorityRegistry::new(admin());
        let new_admin = Principal::new("ST3PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");

        registry.transfer_admin(&admin(), new_admin.clone()).unwrap();

        // Old admin immediately loses all privilege
        assert!(!registry.is_admin(&admin()));
        let err = registry.add_authority(&admin(), authority()).unwrap_err();
        assert_eq!(err, AuthorityError::NotAdmin);

        // New admin gains it
        assert!(registry.is_admin(&new_admin));
        registry.add_authority(&new_admin, authority()).unwrap();
        assert!(registry.is_verified(&authority()));
    }

    #[test]
    fn test_transfer_admin_requires_admin() {
        let mut registry = AuthorityRegistry::new(admin());
        let intruder = Principal::new("ST3NBRSFKX28FQ2ZJ1MAKX58HKHSDGNV5N7R21XCP");

        let err = registry
            .transfer_admin(&intruder, intruder.clone())
            .unwrap_err();

        assert_eq!(err, AuthorityError::NotAdmin);
        assert!(registry.is_admin(&admin()));
    }

    #[test]
    fn test_transfer_admin_to_self_accepted() {
        let mut registry = AuthorityRegistry::new(admin());

        registry.transfer_admin(&admin(), admin()).unwrap();

        assert!(registry.is_admin(&admin()));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut registry = AuthorityRegistry::new(admin());
        registry.add_authority(&admin(), authority()).unwrap();
        registry
            .add_authority(&admin(), Principal::new("ST3AAA"))
            .unwrap();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.admin, admin());
        assert_eq!(snapshot.verified.len(), 2);
        // Sorted output is deterministic
        let mut expected = snapshot.verified.clone();
        expected.sort();
        assert_eq!(snapshot.verified, expected);

        let restored = AuthorityRegistry::restore(snapshot);
        assert!(restored.is_verified(&authority()));
        assert_eq!(restored.verified_count(), 2);
        assert!(restored.is_admin(&admin()));
    }

    #[test]
    fn test_restore_collapses_duplicates() {
        let snapshot = RegistrySnapshot {
            admin: admin(),
            verified: vec![authority(), authority()],
        };

        let restored = AuthorityRegistry::restore(snapshot);
        assert_eq!(restored.verified_count(), 1);
    }

    #[test]
    fn test_snapshot_json() {
        let mut registry = AuthorityRegistry::new(admin());
        registry.add_authority(&admin(), authority()).unwrap();

        let json = registry.snapshot().to_json().unwrap();
        let back = RegistrySnapshot::from_json(&json).unwrap();

        assert_eq!(back, registry.snapshot());
    }

    #[test]
    fn test_shared_registry() {
        let registry = SharedAuthorityRegistry::new(admin());

        registry.add_authority(&admin(), authority()).unwrap();
        assert!(registry.is_verified(&authority()));
        assert_eq!(registry.verified_count(), 1);

        let new_admin = Principal::new("ST3PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");
        registry.transfer_admin(&admin(), new_admin.clone()).unwrap();
        assert!(!registry.is_admin(&admin()));
        assert_eq!(registry.admin(), new_admin);

        registry.remove_authority(&new_admin, &authority()).unwrap();
        assert!(!registry.is_verified(&authority()));
    }

    #[test]
    fn test_shared_registry_across_threads() {
        use std::sync::Arc;

        let registry = Arc::new(SharedAuthorityRegistry::new(admin()));
        let admin_id = admin();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                let caller = admin_id.clone();
                std::thread::spawn(move || {
                    registry
                        .add_authority(&caller, Principal::new(format!("ST3WORKER{i}")))
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.verified_count(), 4);
    }
}
