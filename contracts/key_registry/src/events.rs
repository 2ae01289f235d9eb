//! KEY registry events. Every evidence event is topic-keyed by the
//! package hash so indexers can follow a package end to end.
//!
//! | Topic                    | Data                 |
//! |--------------------------|----------------------|
//! | `("ev_reg", hash)`       | `EvidenceRegistered` |
//! | `("ev_verif", hash)`     | `EvidenceVerified`   |
//! | `("audit", hash)`        | `AuditEmitted`       |
//! | `("cert_iss", hash)`     | `CertificateIssued`  |
//! | `("config", name)`       | `Address`            |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvidenceRegistered {
    pub package_hash: BytesN<32>,
    pub project_id: u64,
    pub technician: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvidenceVerified {
    pub package_hash: BytesN<32>,
    pub project_id: u64,
    pub approved: bool,
    pub verifier: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditEmitted {
    pub package_hash: BytesN<32>,
    pub audit_hash: BytesN<32>,
    pub emitter: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificateIssued {
    pub package_hash: BytesN<32>,
    pub beneficiary: Address,
    pub issuer: Address,
    pub token_id: u64,
}

pub fn emit_evidence_registered(
    env: &Env,
    package_hash: BytesN<32>,
    project_id: u64,
    technician: Address,
) {
    let topics = (symbol_short!("ev_reg"), package_hash.clone());
    env.events().publish(
        topics,
        EvidenceRegistered {
            package_hash,
            project_id,
            technician,
        },
    );
}

pub fn emit_evidence_verified(
    env: &Env,
    package_hash: BytesN<32>,
    project_id: u64,
    approved: bool,
    verifier: Address,
) {
    let topics = (symbol_short!("ev_verif"), package_hash.clone());
    env.events().publish(
        topics,
        EvidenceVerified {
            package_hash,
            project_id,
            approved,
            verifier,
        },
    );
}

pub fn emit_audit(env: &Env, package_hash: BytesN<32>, audit_hash: BytesN<32>, emitter: Address) {
    let topics = (symbol_short!("audit"), package_hash.clone());
    env.events().publish(
        topics,
        AuditEmitted {
            package_hash,
            audit_hash,
            emitter,
        },
    );
}

pub fn emit_certificate_issued(
    env: &Env,
    package_hash: BytesN<32>,
    beneficiary: Address,
    issuer: Address,
    token_id: u64,
) {
    let topics = (symbol_short!("cert_iss"), package_hash.clone());
    env.events().publish(
        topics,
        CertificateIssued {
            package_hash,
            beneficiary,
            issuer,
            token_id,
        },
    );
}

/// Collaborator address changed; `name` is `tee` or `sbt`.
pub fn emit_config(env: &Env, name: Symbol, address: Address) {
    env.events().publish((symbol_short!("config"), name), address);
}
