//! # Storage
//!
//! ## Instance storage
//!
//! | Key                | Type      | Description                      |
//! |--------------------|-----------|----------------------------------|
//! | `IdentityRegistry` | `Address` | Role source                      |
//! | `ProjectRegistry`  | `Address` | Project owner lookups and links  |
//! | `PhalaTee`         | `Address` | Only address allowed to audit    |
//! | `CertificateSbt`   | `Address` | Soul-bound certificate minter    |
//!
//! ## Persistent storage
//!
//! | Key              | Type             |
//! |------------------|------------------|
//! | `Evidence(hash)` | `EvidenceRecord` |
//! | `Audits(hash)`   | `Vec<Audit>`     |

use key_common::ttl::{bump_instance, bump_persistent};
use key_common::Error;
use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::types::{Audit, EvidenceRecord};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    IdentityRegistry,
    ProjectRegistry,
    PhalaTee,
    CertificateSbt,
    Evidence(BytesN<32>),
    Audits(BytesN<32>),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

pub fn set_address(env: &Env, key: &DataKey, address: &Address) {
    env.storage().instance().set(key, address);
    bump_instance(env);
}

pub fn get_address(env: &Env, key: &DataKey) -> Option<Address> {
    env.storage().instance().get(key)
}

/// Collaborator address that must have been configured.
pub fn require_address(env: &Env, key: &DataKey) -> Result<Address, Error> {
    get_address(env, key).ok_or(Error::NotConfigured)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

pub fn has_evidence(env: &Env, package_hash: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Evidence(package_hash.clone()))
}

pub fn save_evidence(env: &Env, record: &EvidenceRecord) {
    let key = DataKey::Evidence(record.package.package_hash.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn load_evidence(env: &Env, package_hash: &BytesN<32>) -> Result<EvidenceRecord, Error> {
    let key = DataKey::Evidence(package_hash.clone());
    let record: EvidenceRecord = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::PackageNotFound)?;
    bump_persistent(env, &key);
    Ok(record)
}

pub fn load_audits(env: &Env, package_hash: &BytesN<32>) -> Vec<Audit> {
    let key = DataKey::Audits(package_hash.clone());
    match env.storage().persistent().get(&key) {
        Some(audits) => {
            bump_persistent(env, &key);
            audits
        }
        None => Vec::new(env),
    }
}

pub fn append_audit(env: &Env, package_hash: &BytesN<32>, audit: Audit) {
    let mut audits = load_audits(env, package_hash);
    audits.push_back(audit);
    let key = DataKey::Audits(package_hash.clone());
    env.storage().persistent().set(&key, &audits);
    bump_persistent(env, &key);
}
