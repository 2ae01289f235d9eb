//! # Storage
//!
//! ## Instance storage
//!
//! | Key         | Type        | Description                 |
//! |-------------|-------------|-----------------------------|
//! | `FeeConfig` | `FeeConfig` | Registration fee settings   |
//!
//! ## Persistent storage
//!
//! | Key              | Type       | Description                |
//! |------------------|------------|----------------------------|
//! | `Identity(addr)` | `Identity` | One record per wallet      |
//!
//! Role grants live in the shared capability table (`key_common::access`).

use key_common::ttl::{bump_instance, bump_persistent};
use key_common::Error;
use soroban_sdk::{contracttype, Address, Env};

use crate::types::{FeeConfig, Identity};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Registration fee settings (Instance).
    FeeConfig,
    /// Identity record keyed by wallet (Persistent).
    Identity(Address),
}

pub fn save_fee_config(env: &Env, config: &FeeConfig) {
    env.storage().instance().set(&DataKey::FeeConfig, config);
    bump_instance(env);
}

pub fn load_fee_config(env: &Env) -> Result<FeeConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::FeeConfig)
        .ok_or(Error::NotInitialized)
}

pub fn load_identity(env: &Env, wallet: &Address) -> Option<Identity> {
    let key = DataKey::Identity(wallet.clone());
    let identity = env.storage().persistent().get(&key);
    if identity.is_some() {
        bump_persistent(env, &key);
    }
    identity
}

pub fn save_identity(env: &Env, wallet: &Address, identity: &Identity) {
    let key = DataKey::Identity(wallet.clone());
    env.storage().persistent().set(&key, identity);
    bump_persistent(env, &key);
}

pub fn is_registered(env: &Env, wallet: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Identity(wallet.clone()))
}
