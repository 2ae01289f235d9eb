//! # Types
//!
//! ## Evidence lifecycle
//!
//! ```text
//! (none) ──register_evidence──► Submitted ──verify_evidence(true)──► Verified ──emit_certificate──► (certificate)
//!                                   │
//!                                   └──verify_evidence(false)──► Rejected
//! ```
//!
//! `Verified` and `Rejected` are final. Audits are appended to any
//! registered package without touching its status.

use soroban_sdk::{contracttype, Address, BytesN, String, Vec};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EvidenceStatus {
    Submitted,
    Verified,
    Rejected,
}

/// Capture location in micro-degrees; `accuracy` in metres.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeoPoint {
    pub lat: i64,
    pub lng: i64,
    pub accuracy: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeviceInfo {
    pub model: String,
    pub os: String,
    pub app_version: String,
}

/// Evidence captured in the field by a professor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvidencePackage {
    pub session_id: String,
    /// Must be the registering professor.
    pub technician: Address,
    pub timestamp: u64,
    pub location: GeoPoint,
    pub photo_uris: Vec<String>,
    pub audio_uris: Vec<String>,
    pub biometric_hash: Option<BytesN<32>>,
    pub beneficiaries: Vec<Address>,
    pub device: DeviceInfo,
    /// Registry-wide primary key.
    pub package_hash: BytesN<32>,
    /// Ignored on input; always `Submitted` once registered.
    pub status: EvidenceStatus,
}

/// A registered package plus the bookkeeping the registry keeps about it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvidenceRecord {
    pub package: EvidencePackage,
    pub project_id: u64,
    pub registered_at: u64,
    /// ONG that verified or rejected the package.
    pub resolved_by: Option<Address>,
    /// Certificate minted for the package, once issued.
    pub certificate: Option<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Audit {
    pub audit_hash: BytesN<32>,
    pub emitter: Address,
    pub timestamp: u64,
}
