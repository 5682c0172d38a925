//! Owner/admin role registry.
//!
//! One owner (transferable) and a set of admins managed by the owner. The
//! owner is implicitly admin-equivalent: "admin-or-owner" is the standard tier
//! for workflow and registry mutations, while ownership transfer and admin-set
//! changes require the owner itself.
//!
//! Checks are capability functions returning a typed [`ElectionError`], meant
//! to be called first thing in every privileged operation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tally_types::{ElectionError, Identity, Notification};

/// Role registry for one engine instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Identity,
    admins: BTreeSet<Identity>,
}

impl AccessControl {
    /// Create a registry owned by `owner`.
    pub fn new(owner: Identity) -> Result<Self, ElectionError> {
        if owner.is_null() {
            return Err(ElectionError::InvalidArgument(
                "owner cannot be the null identity".into(),
            ));
        }
        Ok(Self {
            owner,
            admins: BTreeSet::new(),
        })
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    pub fn is_owner(&self, caller: &Identity) -> bool {
        &self.owner == caller
    }

    /// Explicit admin-set membership (does not include the owner).
    pub fn is_admin(&self, caller: &Identity) -> bool {
        self.admins.contains(caller)
    }

    pub fn is_admin_or_owner(&self, caller: &Identity) -> bool {
        self.is_owner(caller) || self.is_admin(caller)
    }

    /// Admins in identity order.
    pub fn admins(&self) -> impl Iterator<Item = &Identity> {
        self.admins.iter()
    }

    pub fn require_owner(&self, caller: &Identity) -> Result<(), ElectionError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "owner-only operation refused");
            Err(ElectionError::Unauthorized(caller.to_string()))
        }
    }

    pub fn require_admin(&self, caller: &Identity) -> Result<(), ElectionError> {
        if self.is_admin_or_owner(caller) {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "admin operation refused");
            Err(ElectionError::Unauthorized(caller.to_string()))
        }
    }

    /// Hand ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(
        &mut self,
        caller: &Identity,
        new_owner: Identity,
    ) -> Result<Notification, ElectionError> {
        self.require_owner(caller)?;
        if new_owner.is_null() {
            return Err(ElectionError::InvalidArgument(
                "new owner cannot be the null identity".into(),
            ));
        }
        let previous = std::mem::replace(&mut self.owner, new_owner);
        tracing::info!(previous = %previous, owner = %new_owner, "ownership transferred");
        Ok(Notification::OwnershipTransferred {
            previous,
            owner: new_owner,
        })
    }

    /// Grant or revoke admin membership. Owner only; idempotent, and notifies
    /// even when membership did not change.
    pub fn set_admin(
        &mut self,
        caller: &Identity,
        identity: Identity,
        is_admin: bool,
    ) -> Result<Notification, ElectionError> {
        self.require_owner(caller)?;
        if identity.is_null() {
            return Err(ElectionError::InvalidArgument(
                "admin cannot be the null identity".into(),
            ));
        }
        if is_admin {
            self.admins.insert(identity);
        } else {
            self.admins.remove(&identity);
        }
        tracing::debug!(identity = %identity, is_admin, "admin membership set");
        Ok(Notification::AdminChanged { identity, is_admin })
    }
}
