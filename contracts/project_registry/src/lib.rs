//! # KEY Protocol Project Registry
//!
//! Projects run by verified ONGs, the professor assigned to each one, the
//! field activities that professor records and the evidence hashes the KEY
//! registry links back.
//!
//! | Phase      | Entry Point(s)                                         |
//! |------------|--------------------------------------------------------|
//! | Bootstrap  | [`ProjectRegistry::initialize`], `set_key_registry`    |
//! | Lifecycle  | `create_project`, `assign_professor`, `register_activity` |
//! | Evidence   | `link_evidence` (KEY registry only)                    |
//! | Admin      | `grant_role`, `revoke_role`, `upgrade`, `migrate`      |
//! | Queries    | `get_project`, `get_activity`, `project_evidence`, `project_count`, `project_owner`, `key_registry`, `identity_registry`, `has_role`, `roles_of`, `version` |
//!
//! Role checks for ONGs and professors are answered by the identity registry
//! at call time, so a revoked role takes effect immediately.

#![no_std]

use key_common::interfaces::{require_professor, require_verified_ong};
use key_common::schema::{self, Migration};
use key_common::{access, upgrade, Error, Role};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

pub use events::{ActivityRegistered, EvidenceLinked, ProfessorAssigned, ProjectCreated};
pub use types::{Activity, ActivityKind, Project, ProjectConfig, ProjectState};

const MIGRATIONS: &[Migration] = &[];

#[contract]
pub struct ProjectRegistry;

#[contractimpl]
impl ProjectRegistry {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the registry with its first admin and the identity
    /// registry it reads roles from.
    pub fn initialize(env: Env, admin: Address, identity_registry: Address) -> Result<(), Error> {
        admin.require_auth();
        schema::init(&env, MIGRATIONS)?;
        access::grant(&env, &admin, Role::Admin);
        storage::set_identity_registry(&env, &identity_registry);
        Ok(())
    }

    /// Point the registry at the KEY registry allowed to link evidence.
    /// Admin only; may be called again to re-point.
    pub fn set_key_registry(env: Env, admin: Address, key_registry: Address) -> Result<(), Error> {
        admin.require_auth();
        schema::require_initialized(&env)?;
        access::require_admin(&env, &admin)?;

        storage::set_key_registry(&env, &key_registry);
        events::emit_key_registry_set(&env, key_registry);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Project lifecycle
    // ─────────────────────────────────────────────────────────

    /// Create a project owned by the calling ONG and return its id.
    ///
    /// - `start` must be strictly before `end` (`InvalidDates`).
    /// - `funding_target` must not be negative (`InvalidAmount`).
    #[allow(clippy::too_many_arguments)]
    pub fn create_project(
        env: Env,
        ong: Address,
        title: String,
        description: String,
        investor: Address,
        start: u64,
        end: u64,
        funding_target: i128,
        metadata_uri: String,
    ) -> Result<u64, Error> {
        ong.require_auth();
        schema::require_initialized(&env)?;
        let identity = storage::get_identity_registry(&env)?;
        require_verified_ong(&env, &identity, &ong)?;

        if start >= end {
            return Err(Error::InvalidDates);
        }
        if funding_target < 0 {
            return Err(Error::InvalidAmount);
        }

        let id = storage::next_project_id(&env);
        let project = Project {
            id,
            ong: ong.clone(),
            title: title.clone(),
            description,
            investor: investor.clone(),
            start,
            end,
            funding_target,
            metadata_uri,
            professor: None,
            activity_count: 0,
            evidence_count: 0,
        };
        storage::save_project(&env, &project);

        events::emit_project_created(&env, id, ong, investor, title);
        Ok(id)
    }

    /// Assign (or reassign) the professor responsible for a project.
    ///
    /// Only the owning ONG may call this and `professor` must hold the
    /// Professor role. Reassignment revokes the previous professor's access
    /// immediately.
    pub fn assign_professor(
        env: Env,
        ong: Address,
        project_id: u64,
        professor: Address,
    ) -> Result<(), Error> {
        ong.require_auth();
        schema::require_initialized(&env)?;

        let config = storage::load_project_config(&env, project_id)?;
        if config.ong != ong {
            return Err(Error::NotProjectOwner);
        }
        let identity = storage::get_identity_registry(&env)?;
        require_verified_ong(&env, &identity, &ong)?;
        require_professor(&env, &identity, &professor)?;

        let mut state = storage::load_project_state(&env, project_id)?;
        let previous = state.professor.replace(professor.clone());
        storage::save_project_state(&env, project_id, &state);

        events::emit_professor_assigned(&env, project_id, professor, previous);
        Ok(())
    }

    /// Record a field activity. Only the currently assigned professor may
    /// call this; returns the new activity id (1-based, per project).
    #[allow(clippy::too_many_arguments)]
    pub fn register_activity(
        env: Env,
        professor: Address,
        project_id: u64,
        kind: ActivityKind,
        title: String,
        description: String,
        timestamp: u64,
        metadata_uri: String,
    ) -> Result<u32, Error> {
        professor.require_auth();
        schema::require_initialized(&env)?;

        let mut state = storage::load_project_state(&env, project_id)?;
        if state.professor.as_ref() != Some(&professor) {
            return Err(Error::Unassigned);
        }

        state.activity_count += 1;
        let activity_id = state.activity_count;
        storage::save_activity(
            &env,
            &Activity {
                id: activity_id,
                project_id,
                kind,
                title,
                description,
                timestamp,
                metadata_uri,
                professor: professor.clone(),
            },
        );
        storage::save_project_state(&env, project_id, &state);

        events::emit_activity_registered(&env, project_id, activity_id, professor);
        Ok(activity_id)
    }

    /// Attach an evidence hash to a project. Only the configured KEY
    /// registry may call this.
    ///
    /// The emitted event carries the project's latest activity id (0 when
    /// no activity has been registered yet).
    pub fn link_evidence(
        env: Env,
        caller: Address,
        project_id: u64,
        evidence_hash: BytesN<32>,
    ) -> Result<(), Error> {
        caller.require_auth();
        schema::require_initialized(&env)?;
        match storage::get_key_registry(&env) {
            Some(key_registry) if key_registry == caller => {}
            _ => return Err(Error::NotKeyRegistry),
        }

        let mut state = storage::load_project_state(&env, project_id)?;
        state.evidence_count += 1;
        storage::save_project_state(&env, project_id, &state);
        storage::append_evidence(&env, project_id, &evidence_hash);

        events::emit_evidence_linked(&env, project_id, state.activity_count, evidence_hash);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────

    pub fn grant_role(env: Env, caller: Address, target: Address, role: Role) -> Result<(), Error> {
        schema::require_initialized(&env)?;
        access::grant_by(&env, &caller, &target, role)
    }

    pub fn revoke_role(env: Env, caller: Address, target: Address, role: Role) -> Result<(), Error> {
        schema::require_initialized(&env)?;
        access::revoke_by(&env, &caller, &target, role)
    }

    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        upgrade::upgrade(&env, &caller, new_wasm_hash)
    }

    pub fn migrate(env: Env, caller: Address) -> Result<u32, Error> {
        schema::migrate(&env, &caller, MIGRATIONS)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_project(env: Env, project_id: u64) -> Result<Project, Error> {
        storage::load_project(&env, project_id)
    }

    pub fn get_activity(env: Env, project_id: u64, activity_id: u32) -> Result<Activity, Error> {
        storage::load_activity(&env, project_id, activity_id)
    }

    /// Evidence hashes linked to a project, in linkage order.
    pub fn project_evidence(env: Env, project_id: u64) -> Result<Vec<BytesN<32>>, Error> {
        storage::load_project_config(&env, project_id)?;
        Ok(storage::load_evidence(&env, project_id))
    }

    /// Number of projects created; also the id of the latest one.
    pub fn project_count(env: Env) -> u64 {
        storage::project_count(&env)
    }

    pub fn project_owner(env: Env, project_id: u64) -> Result<Address, Error> {
        Ok(storage::load_project_config(&env, project_id)?.ong)
    }

    pub fn key_registry(env: Env) -> Option<Address> {
        storage::get_key_registry(&env)
    }

    pub fn identity_registry(env: Env) -> Result<Address, Error> {
        storage::get_identity_registry(&env)
    }

    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        access::has_role(&env, &account, role)
    }

    pub fn roles_of(env: Env, account: Address) -> Vec<Role> {
        access::roles_of(&env, &account)
    }

    pub fn version(env: Env) -> u32 {
        schema::version(&env)
    }
}
