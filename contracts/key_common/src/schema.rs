//! # Schema versioning
//!
//! Each contract records the version of the storage layout it was
//! initialised (or last migrated) with. A contract's code declares an
//! ordered list of [`Migration`] steps; step `i` converts layout version
//! `i + 1` into version `i + 2`, so the compiled layout version is always
//! `steps.len() + 1`.
//!
//! Layout compatibility rule: a new step is required whenever a stored
//! type changes shape or a key variant is renamed. Adding a brand-new key
//! variant is backwards compatible and needs no step.

use soroban_sdk::{contracttype, Address, Env};

use crate::access;
use crate::error::Error;
use crate::events;
use crate::ttl::bump_instance;

/// Rewrites storage from one layout version to the next.
pub type Migration = fn(&Env);

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum SchemaKey {
    Version,
}

/// Layout version produced by running every step in `steps`.
pub fn target_version(steps: &[Migration]) -> u32 {
    steps.len() as u32 + 1
}

/// Stored layout version, `0` before initialisation.
pub fn version(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&SchemaKey::Version)
        .unwrap_or(0)
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&SchemaKey::Version)
}

pub fn require_initialized(env: &Env) -> Result<(), Error> {
    if !is_initialized(env) {
        return Err(Error::NotInitialized);
    }
    bump_instance(env);
    Ok(())
}

/// Mark the contract initialised at the current layout version.
pub fn init(env: &Env, steps: &[Migration]) -> Result<(), Error> {
    if is_initialized(env) {
        return Err(Error::AlreadyInitialized);
    }
    set_version(env, target_version(steps));
    Ok(())
}

fn set_version(env: &Env, version: u32) {
    env.storage().instance().set(&SchemaKey::Version, &version);
    bump_instance(env);
}

/// Admin-gated migration of stored data up to the compiled layout.
///
/// Returns the layout version after the call. Running it on an up-to-date
/// contract is a no-op.
pub fn migrate(env: &Env, caller: &Address, steps: &[Migration]) -> Result<u32, Error> {
    caller.require_auth();
    require_initialized(env)?;
    access::require_admin(env, caller)?;

    let target = target_version(steps);
    let from = version(env);
    if from > target {
        return Err(Error::SchemaTooNew);
    }
    if from == target {
        return Ok(target);
    }

    for step in &steps[(from - 1) as usize..] {
        step(env);
    }
    set_version(env, target);
    events::emit_migrated(env, from, target, caller.clone());
    Ok(target)
}

#[cfg(any(test, feature = "testutils"))]
pub fn force_version(env: &Env, version: u32) {
    set_version(env, version);
}
