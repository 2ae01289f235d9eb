//! Project registry events.
//!
//! | Topic                       | Data                 |
//! |-----------------------------|----------------------|
//! | `("created", project_id)`   | `ProjectCreated`     |
//! | `("prof_asgn", project_id)` | `ProfessorAssigned`  |
//! | `("activity", project_id)`  | `ActivityRegistered` |
//! | `("ev_link", project_id)`   | `EvidenceLinked`     |
//! | `("key_set",)`              | `Address`            |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub ong: Address,
    pub investor: Address,
    pub title: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfessorAssigned {
    pub project_id: u64,
    pub professor: Address,
    pub previous: Option<Address>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActivityRegistered {
    pub project_id: u64,
    pub activity_id: u32,
    pub professor: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvidenceLinked {
    pub project_id: u64,
    /// Latest activity of the project when the evidence was linked.
    pub activity_id: u32,
    pub evidence_hash: BytesN<32>,
}

pub fn emit_project_created(
    env: &Env,
    project_id: u64,
    ong: Address,
    investor: Address,
    title: String,
) {
    let topics = (symbol_short!("created"), project_id);
    env.events().publish(
        topics,
        ProjectCreated {
            project_id,
            ong,
            investor,
            title,
        },
    );
}

pub fn emit_professor_assigned(
    env: &Env,
    project_id: u64,
    professor: Address,
    previous: Option<Address>,
) {
    let topics = (symbol_short!("prof_asgn"), project_id);
    env.events().publish(
        topics,
        ProfessorAssigned {
            project_id,
            professor,
            previous,
        },
    );
}

pub fn emit_activity_registered(env: &Env, project_id: u64, activity_id: u32, professor: Address) {
    let topics = (symbol_short!("activity"), project_id);
    env.events().publish(
        topics,
        ActivityRegistered {
            project_id,
            activity_id,
            professor,
        },
    );
}

pub fn emit_evidence_linked(env: &Env, project_id: u64, activity_id: u32, evidence_hash: BytesN<32>) {
    let topics = (symbol_short!("ev_link"), project_id);
    env.events().publish(
        topics,
        EvidenceLinked {
            project_id,
            activity_id,
            evidence_hash,
        },
    );
}

pub fn emit_key_registry_set(env: &Env, key_registry: Address) {
    env.events().publish((symbol_short!("key_set"),), key_registry);
}
