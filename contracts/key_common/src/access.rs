//! # Capability table
//!
//! Authorization is an explicit table `Address -> {Role}` held in persistent
//! storage of the contract that owns it. Checks are plain predicates called
//! at the top of each entry point; there is no inherited access-control
//! machinery.
//!
//! | Key             | Type        | Description                       |
//! |-----------------|-------------|-----------------------------------|
//! | `Roles(addr)`   | `Vec<Role>` | Set of roles held by `addr`       |
//!
//! Only an `Admin` may grant or revoke roles, and an admin cannot strip its
//! own `Admin` role.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::error::Error;
use crate::events;
use crate::ttl::bump_persistent;

/// Role tags understood by the KEY contracts.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Configuration, role administration and upgrades.
    Admin,
    /// Approved non-governmental organisation.
    Ong,
    /// Field technician registered by an ONG.
    Professor,
    /// Funding party registered by an admin.
    Investor,
    /// Recipient of training and certificates.
    Beneficiary,
    /// May mint soul-bound certificates.
    Issuer,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum AccessKey {
    Roles(Address),
}

/// Return the set of roles held by `account` (empty when none).
pub fn roles_of(env: &Env, account: &Address) -> Vec<Role> {
    let key = AccessKey::Roles(account.clone());
    match env.storage().persistent().get::<_, Vec<Role>>(&key) {
        Some(roles) => {
            bump_persistent(env, &key);
            roles
        }
        None => Vec::new(env),
    }
}

pub fn has_role(env: &Env, account: &Address, role: Role) -> bool {
    roles_of(env, account).iter().any(|held| held == role)
}

/// Add `role` to `account`. Returns `false` if it was already held.
pub fn grant(env: &Env, account: &Address, role: Role) -> bool {
    let mut roles = roles_of(env, account);
    if roles.iter().any(|held| held == role) {
        return false;
    }
    roles.push_back(role);

    let key = AccessKey::Roles(account.clone());
    env.storage().persistent().set(&key, &roles);
    bump_persistent(env, &key);
    true
}

/// Remove `role` from `account`. Returns `false` if it was not held.
pub fn revoke(env: &Env, account: &Address, role: Role) -> bool {
    let roles = roles_of(env, account);
    let mut kept = Vec::new(env);
    for held in roles.iter() {
        if held != role {
            kept.push_back(held);
        }
    }
    if kept.len() == roles.len() {
        return false;
    }

    let key = AccessKey::Roles(account.clone());
    if kept.is_empty() {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &kept);
        bump_persistent(env, &key);
    }
    true
}

pub fn require_role(env: &Env, account: &Address, role: Role) -> Result<(), Error> {
    if has_role(env, account, role) {
        Ok(())
    } else {
        Err(Error::Unauthorized)
    }
}

pub fn require_admin(env: &Env, account: &Address) -> Result<(), Error> {
    require_role(env, account, Role::Admin)
}

/// Admin-gated grant used by every contract's `grant_role` entry point.
pub fn grant_by(env: &Env, caller: &Address, target: &Address, role: Role) -> Result<(), Error> {
    caller.require_auth();
    require_admin(env, caller)?;

    if grant(env, target, role) {
        events::emit_role_set(env, target.clone(), role, caller.clone());
    }
    Ok(())
}

/// Admin-gated revoke used by every contract's `revoke_role` entry point.
pub fn revoke_by(env: &Env, caller: &Address, target: &Address, role: Role) -> Result<(), Error> {
    caller.require_auth();
    require_admin(env, caller)?;

    if role == Role::Admin && caller == target {
        return Err(Error::SelfRevocation);
    }
    if revoke(env, target, role) {
        events::emit_role_del(env, target.clone(), role, caller.clone());
    }
    Ok(())
}
