extern crate std;

use soroban_sdk::{symbol_short, testutils::Events, vec, IntoVal, TryIntoVal};

use crate::events::{AuditEmitted, CertificateIssued, EvidenceRegistered, EvidenceVerified};
use crate::testutils::Protocol;

#[test]
fn test_evidence_registered_event() {
    let p = Protocol::deploy();
    let s = p.staffed();
    let h1 = p.submit(&s, 1);

    let last_event = p.env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, p.key.address);
    let expected_topics = vec![
        &p.env,
        symbol_short!("ev_reg").into_val(&p.env),
        h1.into_val(&p.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: EvidenceRegistered = last_event.2.try_into_val(&p.env).unwrap();
    assert_eq!(
        event_data,
        EvidenceRegistered {
            package_hash: h1,
            project_id: s.project_id,
            technician: s.professor.clone(),
        }
    );
}

#[test]
fn test_evidence_verified_event_reports_rejection() {
    let p = Protocol::deploy();
    let s = p.staffed();
    let h1 = p.submit(&s, 1);
    p.key.verify_evidence(&s.ong, &h1, &false);

    let last_event = p.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &p.env,
        symbol_short!("ev_verif").into_val(&p.env),
        h1.into_val(&p.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: EvidenceVerified = last_event.2.try_into_val(&p.env).unwrap();
    assert!(!event_data.approved);
    assert_eq!(event_data.verifier, s.ong);
    assert_eq!(event_data.project_id, s.project_id);
}

#[test]
fn test_audit_event() {
    let p = Protocol::deploy();
    let s = p.staffed();
    let h1 = p.submit(&s, 1);
    p.key.emit_audit(&p.tee, &h1, &p.hash(0xaa));

    let last_event = p.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &p.env,
        symbol_short!("audit").into_val(&p.env),
        h1.into_val(&p.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: AuditEmitted = last_event.2.try_into_val(&p.env).unwrap();
    assert_eq!(
        event_data,
        AuditEmitted {
            package_hash: h1,
            audit_hash: p.hash(0xaa),
            emitter: p.tee.clone(),
        }
    );
}

#[test]
fn test_certificate_issued_event_follows_mint() {
    let p = Protocol::deploy();
    let s = p.staffed();
    let h1 = p.submit(&s, 1);
    p.key.verify_evidence(&s.ong, &h1, &true);
    let token_id = p
        .key
        .emit_certificate(&s.ong, &s.beneficiary, &h1, &p.metadata());

    let all_events = p.env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.0, p.key.address);
    let expected_topics = vec![
        &p.env,
        symbol_short!("cert_iss").into_val(&p.env),
        h1.into_val(&p.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CertificateIssued = last_event.2.try_into_val(&p.env).unwrap();
    assert_eq!(
        event_data,
        CertificateIssued {
            package_hash: h1,
            beneficiary: s.beneficiary.clone(),
            issuer: s.ong.clone(),
            token_id,
        }
    );

    // The SBT's own mint event precedes it.
    let minted = all_events.get(all_events.len() - 2).expect("No mint event");
    assert_eq!(minted.0, p.sbt.address);
}
