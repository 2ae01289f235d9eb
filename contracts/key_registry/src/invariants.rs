#![allow(dead_code)]

extern crate std;

use soroban_sdk::Vec;

use crate::types::{Audit, EvidenceRecord, EvidenceStatus};

/// Only `Submitted -> Verified` and `Submitted -> Rejected` are legal.
pub fn assert_valid_status_transition(from: &EvidenceStatus, to: &EvidenceStatus) {
    let valid = matches!(
        (from, to),
        (EvidenceStatus::Submitted, EvidenceStatus::Verified)
            | (EvidenceStatus::Submitted, EvidenceStatus::Rejected)
    );
    assert!(
        valid,
        "invalid evidence transition from {:?} to {:?}",
        from, to
    );
}

/// Everything except status, resolver and certificate is fixed at registration.
pub fn assert_record_immutable_fields(original: &EvidenceRecord, current: &EvidenceRecord) {
    let (a, b) = (&original.package, &current.package);
    assert_eq!(a.package_hash, b.package_hash, "package hash changed");
    assert_eq!(a.technician, b.technician, "technician changed");
    assert_eq!(a.session_id, b.session_id, "session id changed");
    assert_eq!(a.timestamp, b.timestamp, "capture timestamp changed");
    assert_eq!(a.location, b.location, "location changed");
    assert_eq!(a.photo_uris, b.photo_uris, "photo uris changed");
    assert_eq!(a.audio_uris, b.audio_uris, "audio uris changed");
    assert_eq!(a.beneficiaries, b.beneficiaries, "beneficiaries changed");
    assert_eq!(original.project_id, current.project_id, "project id changed");
    assert_eq!(
        original.registered_at, current.registered_at,
        "registration time changed"
    );
}

/// `after` extends `before` without touching existing entries.
pub fn assert_audits_append_only(before: &Vec<Audit>, after: &Vec<Audit>) {
    assert!(
        after.len() >= before.len(),
        "audit log shrank from {} to {}",
        before.len(),
        after.len()
    );
    for (i, audit) in before.iter().enumerate() {
        assert_eq!(
            after.get(i as u32),
            Some(audit),
            "audit {} was rewritten",
            i
        );
    }
}

/// A certificate is only ever attached to a verified package.
pub fn assert_certificate_requires_verification(record: &EvidenceRecord) {
    if record.certificate.is_some() {
        assert_eq!(
            record.package.status,
            EvidenceStatus::Verified,
            "certificate attached to a package that is not verified"
        );
    }
}
