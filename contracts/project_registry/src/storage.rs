//! # Storage
//!
//! ## Instance storage
//!
//! | Key                | Type      | Description                         |
//! |--------------------|-----------|-------------------------------------|
//! | `ProjectCount`     | `u64`     | Last assigned project id            |
//! | `IdentityRegistry` | `Address` | Role source for ONGs and professors |
//! | `KeyRegistry`      | `Address` | Only caller allowed to link evidence|
//!
//! ## Persistent storage
//!
//! | Key                   | Type               | Description                   |
//! |-----------------------|--------------------|-------------------------------|
//! | `ProjConfig(id)`      | `ProjectConfig`    | Immutable project fields      |
//! | `ProjState(id)`       | `ProjectState`     | Assignment and counters       |
//! | `Activity(id, n)`     | `Activity`         | n-th activity of project `id` |
//! | `Evidence(id)`        | `Vec<BytesN<32>>`  | Linked evidence hashes        |

use key_common::ttl::{bump_instance, bump_persistent};
use key_common::Error;
use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::types::{Activity, Project, ProjectConfig, ProjectState};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Project id counter (Instance).
    ProjectCount,
    /// Identity registry address (Instance).
    IdentityRegistry,
    /// KEY registry address (Instance).
    KeyRegistry,
    /// Immutable project configuration keyed by id (Persistent).
    ProjConfig(u64),
    /// Mutable project state keyed by id (Persistent).
    ProjState(u64),
    /// Activity keyed by project id and activity id (Persistent).
    Activity(u64, u32),
    /// Evidence hashes linked to a project (Persistent).
    Evidence(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Increments the project counter and returns the new id (first id is 1).
pub fn next_project_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0);
    let next = current + 1;
    env.storage().instance().set(&DataKey::ProjectCount, &next);
    next
}

pub fn project_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0)
}

pub fn set_identity_registry(env: &Env, identity: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::IdentityRegistry, identity);
    bump_instance(env);
}

pub fn get_identity_registry(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::IdentityRegistry)
        .ok_or(Error::NotInitialized)
}

pub fn set_key_registry(env: &Env, key_registry: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::KeyRegistry, key_registry);
    bump_instance(env);
}

pub fn get_key_registry(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::KeyRegistry)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Save the immutable config and initial state of a new project.
pub fn save_project(env: &Env, project: &Project) {
    let config_key = DataKey::ProjConfig(project.id);
    let config = ProjectConfig {
        id: project.id,
        ong: project.ong.clone(),
        title: project.title.clone(),
        description: project.description.clone(),
        investor: project.investor.clone(),
        start: project.start,
        end: project.end,
        funding_target: project.funding_target,
        metadata_uri: project.metadata_uri.clone(),
    };
    env.storage().persistent().set(&config_key, &config);
    bump_persistent(env, &config_key);

    save_project_state(
        env,
        project.id,
        &ProjectState {
            professor: project.professor.clone(),
            activity_count: project.activity_count,
            evidence_count: project.evidence_count,
        },
    );
}

/// Load the full `Project` by combining config and state.
pub fn load_project(env: &Env, id: u64) -> Result<Project, Error> {
    let config = load_project_config(env, id)?;
    let state = load_project_state(env, id)?;
    Ok(Project {
        id: config.id,
        ong: config.ong,
        title: config.title,
        description: config.description,
        investor: config.investor,
        start: config.start,
        end: config.end,
        funding_target: config.funding_target,
        metadata_uri: config.metadata_uri,
        professor: state.professor,
        activity_count: state.activity_count,
        evidence_count: state.evidence_count,
    })
}

pub fn load_project_config(env: &Env, id: u64) -> Result<ProjectConfig, Error> {
    let key = DataKey::ProjConfig(id);
    let config: ProjectConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ProjectNotFound)?;
    bump_persistent(env, &key);
    Ok(config)
}

pub fn load_project_state(env: &Env, id: u64) -> Result<ProjectState, Error> {
    let key = DataKey::ProjState(id);
    let state: ProjectState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ProjectNotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    let key = DataKey::ProjState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn save_activity(env: &Env, activity: &Activity) {
    let key = DataKey::Activity(activity.project_id, activity.id);
    env.storage().persistent().set(&key, activity);
    bump_persistent(env, &key);
}

pub fn load_activity(env: &Env, project_id: u64, activity_id: u32) -> Result<Activity, Error> {
    let key = DataKey::Activity(project_id, activity_id);
    let activity: Activity = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ActivityNotFound)?;
    bump_persistent(env, &key);
    Ok(activity)
}

pub fn load_evidence(env: &Env, project_id: u64) -> Vec<BytesN<32>> {
    let key = DataKey::Evidence(project_id);
    match env.storage().persistent().get(&key) {
        Some(hashes) => {
            bump_persistent(env, &key);
            hashes
        }
        None => Vec::new(env),
    }
}

pub fn append_evidence(env: &Env, project_id: u64, evidence_hash: &BytesN<32>) {
    let mut hashes = load_evidence(env, project_id);
    hashes.push_back(evidence_hash.clone());
    let key = DataKey::Evidence(project_id);
    env.storage().persistent().set(&key, &hashes);
    bump_persistent(env, &key);
}
