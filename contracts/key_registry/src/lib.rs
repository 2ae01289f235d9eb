//! # KEY Protocol Evidence Registry
//!
//! The evidence pipeline: professors register field evidence, the owning
//! ONG verifies or rejects it, a TEE oracle may attach audits, and verified
//! evidence is certified with a soul-bound token minted to a beneficiary.
//!
//! | Phase         | Entry Point(s)                                          |
//! |---------------|---------------------------------------------------------|
//! | Bootstrap     | [`KeyRegistry::initialize`], `set_phala_tee`, `set_certificate_sbt` |
//! | Evidence      | `register_evidence`, `verify_evidence`                  |
//! | Attestation   | `emit_audit`                                            |
//! | Certification | `emit_certificate`                                      |
//! | Admin         | `grant_role`, `revoke_role`, `upgrade`, `migrate`       |
//! | Queries       | `get_evidence`, `get_audits`, `certificate_of`, `phala_tee`, `certificate_sbt`, `identity_registry`, `project_registry`, `has_role`, `roles_of`, `version` |
//!
//! ## Collaborators
//!
//! - Identity registry: professor and verified-ONG checks.
//! - Project registry: project ownership, and `link_evidence` on every
//!   registration. A failed link aborts the registration.
//! - Certificate SBT: this contract must hold its `Issuer` role.
//!
//! Local state is written before any call out to a collaborator.

#![no_std]

use key_common::interfaces::{require_professor, require_verified_ong, CertificateClient, ProjectClient};
use key_common::schema::{self, Migration};
use key_common::{access, upgrade, Error, Role};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env, String, Vec};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod testutils;

pub use events::{AuditEmitted, CertificateIssued, EvidenceRegistered, EvidenceVerified};
pub use types::{Audit, DeviceInfo, EvidencePackage, EvidenceRecord, EvidenceStatus, GeoPoint};

use storage::DataKey;

const MIGRATIONS: &[Migration] = &[];

#[contract]
pub struct KeyRegistry;

#[contractimpl]
impl KeyRegistry {
    // ─────────────────────────────────────────────────────────
    // Initialisation and configuration
    // ─────────────────────────────────────────────────────────

    pub fn initialize(
        env: Env,
        admin: Address,
        identity_registry: Address,
        project_registry: Address,
    ) -> Result<(), Error> {
        admin.require_auth();
        schema::init(&env, MIGRATIONS)?;
        access::grant(&env, &admin, Role::Admin);
        storage::set_address(&env, &DataKey::IdentityRegistry, &identity_registry);
        storage::set_address(&env, &DataKey::ProjectRegistry, &project_registry);
        Ok(())
    }

    /// Set the TEE oracle allowed to emit audits. Admin only; overwrites.
    pub fn set_phala_tee(env: Env, admin: Address, tee: Address) -> Result<(), Error> {
        admin.require_auth();
        schema::require_initialized(&env)?;
        access::require_admin(&env, &admin)?;

        storage::set_address(&env, &DataKey::PhalaTee, &tee);
        events::emit_config(&env, symbol_short!("tee"), tee);
        Ok(())
    }

    /// Set the certificate SBT contract. Admin only; overwrites.
    pub fn set_certificate_sbt(env: Env, admin: Address, sbt: Address) -> Result<(), Error> {
        admin.require_auth();
        schema::require_initialized(&env)?;
        access::require_admin(&env, &admin)?;

        storage::set_address(&env, &DataKey::CertificateSbt, &sbt);
        events::emit_config(&env, symbol_short!("sbt"), sbt);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Evidence
    // ─────────────────────────────────────────────────────────

    /// Register an evidence package against a project and link it there.
    ///
    /// - Caller must hold the Professor role and be the package technician.
    /// - `package.package_hash` must be new to the registry (`DuplicatePackage`).
    /// - The stored status is always `Submitted`.
    pub fn register_evidence(
        env: Env,
        professor: Address,
        project_id: u64,
        package: EvidencePackage,
    ) -> Result<(), Error> {
        professor.require_auth();
        schema::require_initialized(&env)?;
        let identity = storage::require_address(&env, &DataKey::IdentityRegistry)?;
        require_professor(&env, &identity, &professor)?;

        if package.technician != professor {
            return Err(Error::TechnicianMismatch);
        }
        let package_hash = package.package_hash.clone();
        if storage::has_evidence(&env, &package_hash) {
            return Err(Error::DuplicatePackage);
        }

        storage::save_evidence(
            &env,
            &EvidenceRecord {
                package: EvidencePackage {
                    status: EvidenceStatus::Submitted,
                    ..package
                },
                project_id,
                registered_at: env.ledger().timestamp(),
                resolved_by: None,
                certificate: None,
            },
        );

        let projects = storage::require_address(&env, &DataKey::ProjectRegistry)?;
        ProjectClient::new(&env, &projects).link_evidence(
            &env.current_contract_address(),
            &project_id,
            &package_hash,
        );

        events::emit_evidence_registered(&env, package_hash, project_id, professor);
        Ok(())
    }

    /// Resolve a submitted package as verified (`approved`) or rejected.
    ///
    /// Caller must be a verified ONG that owns the package's project. A
    /// package resolves exactly once (`AlreadyResolved`).
    pub fn verify_evidence(
        env: Env,
        ong: Address,
        package_hash: BytesN<32>,
        approved: bool,
    ) -> Result<(), Error> {
        ong.require_auth();
        schema::require_initialized(&env)?;
        let identity = storage::require_address(&env, &DataKey::IdentityRegistry)?;
        require_verified_ong(&env, &identity, &ong)?;

        let mut record = storage::load_evidence(&env, &package_hash)?;
        Self::require_project_owner(&env, record.project_id, &ong)?;
        if record.package.status != EvidenceStatus::Submitted {
            return Err(Error::AlreadyResolved);
        }

        record.package.status = if approved {
            EvidenceStatus::Verified
        } else {
            EvidenceStatus::Rejected
        };
        record.resolved_by = Some(ong.clone());
        storage::save_evidence(&env, &record);

        events::emit_evidence_verified(&env, package_hash, record.project_id, approved, ong);
        Ok(())
    }

    /// Append a TEE audit to a registered package. Status is unchanged.
    pub fn emit_audit(
        env: Env,
        tee: Address,
        package_hash: BytesN<32>,
        audit_hash: BytesN<32>,
    ) -> Result<(), Error> {
        tee.require_auth();
        schema::require_initialized(&env)?;
        if storage::require_address(&env, &DataKey::PhalaTee)? != tee {
            return Err(Error::NotTee);
        }
        if !storage::has_evidence(&env, &package_hash) {
            return Err(Error::PackageNotFound);
        }

        storage::append_audit(
            &env,
            &package_hash,
            Audit {
                audit_hash: audit_hash.clone(),
                emitter: tee.clone(),
                timestamp: env.ledger().timestamp(),
            },
        );

        events::emit_audit(&env, package_hash, audit_hash, tee);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Certification
    // ─────────────────────────────────────────────────────────

    /// Mint a soul-bound certificate for a verified package to `beneficiary`
    /// and return the token id. The calling ONG is recorded as issuer.
    pub fn emit_certificate(
        env: Env,
        ong: Address,
        beneficiary: Address,
        package_hash: BytesN<32>,
        metadata_uri: String,
    ) -> Result<u64, Error> {
        ong.require_auth();
        schema::require_initialized(&env)?;
        let identity = storage::require_address(&env, &DataKey::IdentityRegistry)?;
        require_verified_ong(&env, &identity, &ong)?;

        let mut record = storage::load_evidence(&env, &package_hash)?;
        Self::require_project_owner(&env, record.project_id, &ong)?;
        if record.package.status != EvidenceStatus::Verified {
            return Err(Error::PackageNotVerified);
        }
        if record.certificate.is_some() {
            return Err(Error::AlreadyIssued);
        }
        let sbt = storage::require_address(&env, &DataKey::CertificateSbt)?;

        // The token id only exists once the SBT assigns it, so the record is
        // saved straight after the mint and before anything else runs. The
        // host rejects re-entry into this contract while the mint is on the
        // stack, and a failed mint reverts the whole invocation.
        let token_id = CertificateClient::new(&env, &sbt).mint(
            &env.current_contract_address(),
            &beneficiary,
            &package_hash,
            &metadata_uri,
            &ong,
        );
        record.certificate = Some(token_id);
        storage::save_evidence(&env, &record);

        events::emit_certificate_issued(&env, package_hash, beneficiary, ong, token_id);
        Ok(token_id)
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

    /// Replace this contract's code. Admin only; evidence, audits and
    /// configuration survive the swap.
    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        upgrade::upgrade(&env, &caller, new_wasm_hash)
    }

    pub fn migrate(env: Env, caller: Address) -> Result<u32, Error> {
        schema::migrate(&env, &caller, MIGRATIONS)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_evidence(env: Env, package_hash: BytesN<32>) -> Result<EvidenceRecord, Error> {
        storage::load_evidence(&env, &package_hash)
    }

    pub fn get_audits(env: Env, package_hash: BytesN<32>) -> Result<Vec<Audit>, Error> {
        if !storage::has_evidence(&env, &package_hash) {
            return Err(Error::PackageNotFound);
        }
        Ok(storage::load_audits(&env, &package_hash))
    }

    /// Token id of the certificate minted for a package.
    pub fn certificate_of(env: Env, package_hash: BytesN<32>) -> Result<u64, Error> {
        storage::load_evidence(&env, &package_hash)?
            .certificate
            .ok_or(Error::TokenNotFound)
    }

    pub fn phala_tee(env: Env) -> Option<Address> {
        storage::get_address(&env, &DataKey::PhalaTee)
    }

    pub fn certificate_sbt(env: Env) -> Option<Address> {
        storage::get_address(&env, &DataKey::CertificateSbt)
    }

    pub fn identity_registry(env: Env) -> Result<Address, Error> {
        storage::require_address(&env, &DataKey::IdentityRegistry)
    }

    pub fn project_registry(env: Env) -> Result<Address, Error> {
        storage::require_address(&env, &DataKey::ProjectRegistry)
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

impl KeyRegistry {
    fn require_project_owner(env: &Env, project_id: u64, ong: &Address) -> Result<(), Error> {
        let projects = storage::require_address(env, &DataKey::ProjectRegistry)?;
        if ProjectClient::new(env, &projects).project_owner(&project_id) != *ong {
            return Err(Error::NotProjectOwner);
        }
        Ok(())
    }
}
