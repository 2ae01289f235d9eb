extern crate std;

use identity_registry::{IdentityRegistry, IdentityRegistryClient, OngProfile, ProfessorProfile};
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, BytesN, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{EvidenceLinked, ProfessorAssigned, ProjectCreated};
use crate::{ActivityKind, ProjectRegistry, ProjectRegistryClient};

struct Fixture {
    env: Env,
    client: ProjectRegistryClient<'static>,
    ong: Address,
    professor: Address,
    investor: Address,
    key_registry: Address,
}

fn fixture() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(admin.clone());
    let identity_id = env.register(IdentityRegistry, ());
    let identity = IdentityRegistryClient::new(&env, &identity_id);
    identity.initialize(&admin, &admin, &sac.address(), &0);

    let ong = Address::generate(&env);
    identity.request_registration_ong(
        &ong,
        &OngProfile {
            wallet: ong.clone(),
            name: String::from_str(&env, "ONG Verde"),
            country: String::from_str(&env, "PE"),
            description: String::from_str(&env, "Water access"),
            metadata_uri: String::from_str(&env, "ipfs://ong"),
            did_hash: None,
            verified: false,
        },
        &0,
    );
    identity.approve_ong(&admin, &ong);

    let professor = Address::generate(&env);
    identity.register_professor(
        &ong,
        &professor,
        &ProfessorProfile {
            wallet: professor.clone(),
            name: String::from_str(&env, "Ana"),
            specialty: String::from_str(&env, "Hydrology"),
            metadata_uri: String::from_str(&env, "ipfs://ana"),
            did_hash: None,
            associated_ongs: vec![&env],
            active: true,
        },
    );

    let contract_id = env.register(ProjectRegistry, ());
    let client = ProjectRegistryClient::new(&env, &contract_id);
    client.initialize(&admin, &identity_id);
    let key_registry = Address::generate(&env);
    client.set_key_registry(&admin, &key_registry);

    Fixture {
        investor: Address::generate(&env),
        env,
        client,
        ong,
        professor,
        key_registry,
    }
}

fn create(f: &Fixture) -> u64 {
    f.client.create_project(
        &f.ong,
        &String::from_str(&f.env, "Pozos"),
        &String::from_str(&f.env, "Community wells"),
        &f.investor,
        &10,
        &20,
        &1_000,
        &String::from_str(&f.env, "ipfs://pozos"),
    )
}

#[test]
fn test_project_created_event() {
    let f = fixture();
    let id = create(&f);

    let all_events = f.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, f.client.address);
    let expected_topics = vec![
        &f.env,
        symbol_short!("created").into_val(&f.env),
        id.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectCreated = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        event_data,
        ProjectCreated {
            project_id: id,
            ong: f.ong.clone(),
            investor: f.investor.clone(),
            title: String::from_str(&f.env, "Pozos"),
        }
    );
}

#[test]
fn test_professor_assigned_event_carries_previous() {
    let f = fixture();
    let id = create(&f);
    f.client.assign_professor(&f.ong, &id, &f.professor);
    // Reassigning the same professor still reports the prior holder.
    f.client.assign_professor(&f.ong, &id, &f.professor);

    let last_event = f.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &f.env,
        symbol_short!("prof_asgn").into_val(&f.env),
        id.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProfessorAssigned = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(event_data.professor, f.professor);
    assert_eq!(event_data.previous, Some(f.professor.clone()));
}

#[test]
fn test_evidence_linked_event_uses_latest_activity() {
    let f = fixture();
    let id = create(&f);
    f.client.assign_professor(&f.ong, &id, &f.professor);
    for _ in 0..2 {
        f.client.register_activity(
            &f.professor,
            &id,
            &ActivityKind::FieldVisit,
            &String::from_str(&f.env, "Visit"),
            &String::from_str(&f.env, "Well inspection"),
            &15,
            &String::from_str(&f.env, "ipfs://visit"),
        );
    }

    let hash = BytesN::from_array(&f.env, &[9u8; 32]);
    f.client.link_evidence(&f.key_registry, &id, &hash);

    let last_event = f.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &f.env,
        symbol_short!("ev_link").into_val(&f.env),
        id.into_val(&f.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: EvidenceLinked = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(
        event_data,
        EvidenceLinked {
            project_id: id,
            activity_id: 2,
            evidence_hash: hash,
        }
    );
}
