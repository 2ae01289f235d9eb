//! # Types
//!
//! ## Config / State split
//!
//! A [`Project`] is stored as two ledger entries:
//!
//! - [`ProjectConfig`]: written once by `create_project`, never mutated.
//! - [`ProjectState`]: professor assignment and counters, rewritten on
//!   assignment, activity registration and evidence linkage.
//!
//! The public API returns the reconstructed [`Project`].
//!
//! ## Lifecycle
//!
//! ```text
//! created ──assign_professor──► professor set ──register_activity──► activity_count += 1
//!                 ▲                    │
//!                 └────── reassign ────┘   (previous professor loses access at once)
//! ```

use soroban_sdk::{contracttype, Address, String};

/// Kind of field activity a professor runs for a project.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActivityKind {
    Training,
    Workshop,
    FieldVisit,
    Assessment,
}

/// Immutable project configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub ong: Address,
    pub title: String,
    pub description: String,
    pub investor: Address,
    pub start: u64,
    pub end: u64,
    pub funding_target: i128,
    pub metadata_uri: String,
}

/// Mutable project state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    pub professor: Option<Address>,
    pub activity_count: u32,
    pub evidence_count: u32,
}

/// Full project as returned by `get_project`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Auto-incremented, starting at 1.
    pub id: u64,
    /// Owning ONG; the only address that may assign professors.
    pub ong: Address,
    pub title: String,
    pub description: String,
    pub investor: Address,
    /// Ledger timestamp; strictly before `end`.
    pub start: u64,
    pub end: u64,
    pub funding_target: i128,
    pub metadata_uri: String,
    /// Currently assigned professor, if any.
    pub professor: Option<Address>,
    /// Number of activities registered so far; also the latest activity id.
    pub activity_count: u32,
    /// Number of evidence packages linked by the KEY registry.
    pub evidence_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Activity {
    pub id: u32,
    pub project_id: u64,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub timestamp: u64,
    pub metadata_uri: String,
    pub professor: Address,
}
