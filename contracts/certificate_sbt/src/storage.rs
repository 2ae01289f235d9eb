//! # Storage
//!
//! | Key                 | Tier       | Type          |
//! |---------------------|------------|---------------|
//! | `TokenCount`        | Instance   | `u64`         |
//! | `Cert(id)`          | Persistent | `Certificate` |
//! | `PackageToken(h)`   | Persistent | `u64`         |
//! | `OwnerTokens(addr)` | Persistent | `Vec<u64>`    |

use key_common::ttl::{bump_instance, bump_persistent};
use key_common::Error;
use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::types::Certificate;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    TokenCount,
    Cert(u64),
    PackageToken(BytesN<32>),
    OwnerTokens(Address),
}

/// Increments the token counter and returns the new id (first id is 1).
pub fn next_token_id(env: &Env) -> u64 {
    bump_instance(env);
    let next = total_supply(env) + 1;
    env.storage().instance().set(&DataKey::TokenCount, &next);
    next
}

pub fn total_supply(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TokenCount)
        .unwrap_or(0)
}

pub fn save_certificate(env: &Env, cert: &Certificate) {
    let key = DataKey::Cert(cert.token_id);
    env.storage().persistent().set(&key, cert);
    bump_persistent(env, &key);
}

pub fn load_certificate(env: &Env, token_id: u64) -> Result<Certificate, Error> {
    let key = DataKey::Cert(token_id);
    let cert: Certificate = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::TokenNotFound)?;
    bump_persistent(env, &key);
    Ok(cert)
}

pub fn token_of_package(env: &Env, package_hash: &BytesN<32>) -> Option<u64> {
    let key = DataKey::PackageToken(package_hash.clone());
    let token_id = env.storage().persistent().get(&key);
    if token_id.is_some() {
        bump_persistent(env, &key);
    }
    token_id
}

pub fn bind_package(env: &Env, package_hash: &BytesN<32>, token_id: u64) {
    let key = DataKey::PackageToken(package_hash.clone());
    env.storage().persistent().set(&key, &token_id);
    bump_persistent(env, &key);
}

pub fn tokens_of(env: &Env, owner: &Address) -> Vec<u64> {
    let key = DataKey::OwnerTokens(owner.clone());
    match env.storage().persistent().get(&key) {
        Some(tokens) => {
            bump_persistent(env, &key);
            tokens
        }
        None => Vec::new(env),
    }
}

pub fn push_owner_token(env: &Env, owner: &Address, token_id: u64) {
    let mut tokens = tokens_of(env, owner);
    tokens.push_back(token_id);
    let key = DataKey::OwnerTokens(owner.clone());
    env.storage().persistent().set(&key, &tokens);
    bump_persistent(env, &key);
}
