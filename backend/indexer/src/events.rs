//! Canonical event types emitted by the KEY Protocol contracts.
//!
//! Topics mirror the `symbol_short!` names published by the identity,
//! project, KEY and certificate contracts plus the shared role / upgrade
//! events every contract emits.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// All recognised event kinds across the four KEY contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An ONG paid the fee and filed a registration (`ong_req`).
    OngRegistrationRequested,
    /// An identity became active: ONG approval or actor registration (`id_reg`).
    IdentityRegistered,
    /// A professor joined a verified ONG (`ong_assoc`).
    OngAssociated,
    /// An investor's cumulative total grew (`invested`).
    InvestmentRecorded,
    /// Registration fee or collector changed (`fee_set`).
    FeeUpdated,
    /// A project was created (`created`).
    ProjectCreated,
    /// A professor was (re)assigned to a project (`prof_asgn`).
    ProfessorAssigned,
    /// A professor recorded a field activity (`activity`).
    ActivityRegistered,
    /// The KEY registry linked evidence to a project (`ev_link`).
    EvidenceLinked,
    /// The project registry was pointed at a KEY registry (`key_set`).
    KeyRegistrySet,
    /// A professor registered an evidence package (`ev_reg`).
    EvidenceRegistered,
    /// An ONG approved a package (`ev_verif`, `approved = true`).
    EvidenceVerified,
    /// An ONG rejected a package (`ev_verif`, `approved = false`).
    EvidenceRejected,
    /// The TEE oracle attached an audit (`audit`).
    AuditEmitted,
    /// The KEY registry issued a certificate (`cert_iss`).
    CertificateIssued,
    /// TEE or SBT collaborator address changed (`config`).
    ConfigUpdated,
    /// The SBT contract minted a token (`minted`).
    CertificateMinted,
    /// An issuer revoked a certificate (`revoked`).
    CertificateRevoked,
    /// A role was granted (`role_set`).
    RoleSet,
    /// A role was revoked (`role_del`).
    RoleDel,
    /// Contract code was replaced (`upgraded`).
    Upgraded,
    /// Stored data was migrated (`migrated`).
    Migrated,
    /// An event from a KEY contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol into an [`EventKind`].
    ///
    /// `ev_verif` always maps to [`EventKind::EvidenceVerified`]; use
    /// [`EventKind::refine`] with the event data to split out rejections.
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "ong_req" => Self::OngRegistrationRequested,
            "id_reg" => Self::IdentityRegistered,
            "ong_assoc" => Self::OngAssociated,
            "invested" => Self::InvestmentRecorded,
            "fee_set" => Self::FeeUpdated,
            "created" => Self::ProjectCreated,
            "prof_asgn" => Self::ProfessorAssigned,
            "activity" => Self::ActivityRegistered,
            "ev_link" => Self::EvidenceLinked,
            "key_set" => Self::KeyRegistrySet,
            "ev_reg" => Self::EvidenceRegistered,
            "ev_verif" => Self::EvidenceVerified,
            "audit" => Self::AuditEmitted,
            "cert_iss" => Self::CertificateIssued,
            "config" => Self::ConfigUpdated,
            "minted" => Self::CertificateMinted,
            "revoked" => Self::CertificateRevoked,
            "role_set" => Self::RoleSet,
            "role_del" => Self::RoleDel,
            "upgraded" => Self::Upgraded,
            "migrated" => Self::Migrated,
            _ => Self::Unknown,
        }
    }

    /// Narrow a topic-derived kind using the event payload.
    pub fn refine(self, data: &Value) -> Self {
        match self {
            Self::EvidenceVerified
                if data.get("approved").and_then(Value::as_bool) == Some(false) =>
            {
                Self::EvidenceRejected
            }
            other => other,
        }
    }

    /// Short identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OngRegistrationRequested => "ong_registration_requested",
            Self::IdentityRegistered => "identity_registered",
            Self::OngAssociated => "ong_associated",
            Self::InvestmentRecorded => "investment_recorded",
            Self::FeeUpdated => "fee_updated",
            Self::ProjectCreated => "project_created",
            Self::ProfessorAssigned => "professor_assigned",
            Self::ActivityRegistered => "activity_registered",
            Self::EvidenceLinked => "evidence_linked",
            Self::KeyRegistrySet => "key_registry_set",
            Self::EvidenceRegistered => "evidence_registered",
            Self::EvidenceVerified => "evidence_verified",
            Self::EvidenceRejected => "evidence_rejected",
            Self::AuditEmitted => "audit_emitted",
            Self::CertificateIssued => "certificate_issued",
            Self::ConfigUpdated => "config_updated",
            Self::CertificateMinted => "certificate_minted",
            Self::CertificateRevoked => "certificate_revoked",
            Self::RoleSet => "role_set",
            Self::RoleDel => "role_del",
            Self::Upgraded => "upgraded",
            Self::Migrated => "migrated",
            Self::Unknown => "unknown",
        }
    }

    /// Payload fields naming the acting address, in preference order.
    pub fn actor_fields(&self) -> &'static [&'static str] {
        match self {
            Self::OngRegistrationRequested => &["ong"],
            Self::IdentityRegistered => &["wallet"],
            Self::OngAssociated => &["professor"],
            Self::InvestmentRecorded => &["investor"],
            Self::FeeUpdated => &["collector"],
            Self::ProjectCreated => &["ong"],
            Self::ProfessorAssigned | Self::ActivityRegistered => &["professor"],
            Self::EvidenceRegistered => &["technician"],
            Self::EvidenceVerified | Self::EvidenceRejected => &["verifier"],
            Self::AuditEmitted => &["emitter"],
            Self::CertificateIssued | Self::CertificateRevoked => &["issuer"],
            Self::CertificateMinted => &["owner", "issuer"],
            Self::RoleSet | Self::RoleDel | Self::Upgraded | Self::Migrated => &["by"],
            Self::EvidenceLinked | Self::KeyRegistrySet | Self::ConfigUpdated | Self::Unknown => {
                &[]
            }
        }
    }

    /// Payload fields carrying an amount, in preference order.
    pub fn amount_fields(&self) -> &'static [&'static str] {
        match self {
            Self::OngRegistrationRequested => &["fee"],
            Self::InvestmentRecorded => &["amount"],
            Self::FeeUpdated => &["amount"],
            _ => &[],
        }
    }
}

/// A fully decoded KEY event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyEvent {
    /// RPC event id; unique per event and used for idempotent inserts.
    pub event_id: String,
    pub event_type: String,
    /// Second topic: project id, package hash (hex), token id or address.
    pub subject: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    /// Raw event payload as JSON text.
    pub data: String,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub subject: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub data: String,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
