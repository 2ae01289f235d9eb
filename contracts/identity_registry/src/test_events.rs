extern crate std;

use key_common::Role;
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{IdentityRegistered, OngAssociated, OngRegistrationRequested};
use crate::{IdentityRegistry, IdentityRegistryClient, OngProfile, ProfessorProfile};

const FEE: i128 = 100_000;

fn setup_with_init() -> (Env, IdentityRegistryClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(IdentityRegistry, ());
    let client = IdentityRegistryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(admin.clone());
    client.initialize(&admin, &admin, &sac.address(), &FEE);
    (env, client, admin, sac.address())
}

fn request_ong(env: &Env, client: &IdentityRegistryClient, token: &Address) -> Address {
    let ong = Address::generate(env);
    token::StellarAssetClient::new(env, token).mint(&ong, &FEE);
    let data = OngProfile {
        wallet: ong.clone(),
        name: String::from_str(env, "ONG Verde"),
        country: String::from_str(env, "CO"),
        description: String::from_str(env, "Environmental education"),
        metadata_uri: String::from_str(env, "ipfs://ong-metadata"),
        did_hash: None,
        verified: false,
    };
    client.request_registration_ong(&ong, &data, &FEE);
    ong
}

#[test]
fn test_registration_requested_event() {
    let (env, client, _admin, token) = setup_with_init();
    let ong = request_ong(&env, &client, &token);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("ong_req").into_val(&env),
        ong.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: OngRegistrationRequested = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        OngRegistrationRequested {
            ong: ong.clone(),
            name: String::from_str(&env, "ONG Verde"),
            fee: FEE,
        }
    );
}

#[test]
fn test_identity_registered_event_on_approval() {
    let (env, client, admin, token) = setup_with_init();
    let ong = request_ong(&env, &client, &token);

    client.approve_ong(&admin, &ong);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &env,
        symbol_short!("id_reg").into_val(&env),
        ong.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: IdentityRegistered = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        IdentityRegistered {
            wallet: ong.clone(),
            role: Role::Ong,
            label: String::from_str(&env, "ONG Verde"),
        }
    );
}

#[test]
fn test_ong_associated_event() {
    let (env, client, admin, token) = setup_with_init();
    let ong = request_ong(&env, &client, &token);
    client.approve_ong(&admin, &ong);

    let professor = Address::generate(&env);
    let data = ProfessorProfile {
        wallet: professor.clone(),
        name: String::from_str(&env, "Juan Profesor"),
        specialty: String::from_str(&env, "Agrotech"),
        metadata_uri: String::from_str(&env, "ipfs://professor-metadata"),
        did_hash: None,
        associated_ongs: vec![&env],
        active: true,
    };
    client.register_professor(&ong, &professor, &data);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let event_data: IdentityRegistered = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data.role, Role::Professor);
    assert_eq!(event_data.label, String::from_str(&env, "Juan Profesor"));

    client.join_ong(&professor, &ong);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("ong_assoc").into_val(&env),
        professor.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: OngAssociated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, OngAssociated { professor, ong });
}
