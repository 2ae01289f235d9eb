extern crate std;

use key_common::{Error, Role};
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    vec, Address, BytesN, Env, IntoVal, String, TryIntoVal,
};

use crate::{CertificateMinted, CertificateRevoked, CertificateSbt, CertificateSbtClient};

struct Setup {
    env: Env,
    client: CertificateSbtClient<'static>,
    admin: Address,
    minter: Address,
    ong: Address,
    beneficiary: Address,
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = 1_700_000_000);

    let contract_id = env.register(CertificateSbt, ());
    let client = CertificateSbtClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin);

    let minter = Address::generate(&env);
    client.grant_role(&admin, &minter, &Role::Issuer);

    Setup {
        ong: Address::generate(&env),
        beneficiary: Address::generate(&env),
        env,
        client,
        admin,
        minter,
    }
}

fn hash(env: &Env, byte: u8) -> BytesN<32> {
    BytesN::from_array(env, &[byte; 32])
}

fn mint(s: &Setup, package: u8) -> u64 {
    s.client.mint(
        &s.minter,
        &s.beneficiary,
        &hash(&s.env, package),
        &String::from_str(&s.env, "ipfs://certificate"),
        &s.ong,
    )
}

#[test]
fn test_mint_records_certificate() {
    let s = setup();
    let token_id = mint(&s, 1);
    assert_eq!(token_id, 1);

    let cert = s.client.get_certificate(&token_id);
    assert_eq!(cert.owner, s.beneficiary);
    assert_eq!(cert.issuer, s.ong);
    assert_eq!(cert.package_hash, hash(&s.env, 1));
    assert_eq!(cert.issued_at, 1_700_000_000);
    assert!(!cert.revoked);
    assert_eq!(cert.revocation_reason, None);

    assert_eq!(s.client.owner_of(&token_id), s.beneficiary);
    assert_eq!(s.client.token_of_package(&hash(&s.env, 1)), token_id);
    assert_eq!(s.client.total_supply(), 1);
}

#[test]
fn test_mint_requires_issuer_role() {
    let s = setup();
    let result = s.client.try_mint(
        &s.admin,
        &s.beneficiary,
        &hash(&s.env, 1),
        &String::from_str(&s.env, "ipfs://certificate"),
        &s.ong,
    );
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
    assert_eq!(s.client.total_supply(), 0);
}

#[test]
fn test_mint_same_package_twice_fails() {
    let s = setup();
    mint(&s, 1);
    let result = s.client.try_mint(
        &s.minter,
        &Address::generate(&s.env),
        &hash(&s.env, 1),
        &String::from_str(&s.env, "ipfs://other"),
        &s.ong,
    );
    assert_eq!(result, Err(Ok(Error::AlreadyIssued)));
    assert_eq!(s.client.total_supply(), 1);
}

#[test]
fn test_certificates_of_lists_owner_tokens() {
    let s = setup();
    let first = mint(&s, 1);
    let second = mint(&s, 2);
    assert_eq!(
        s.client.certificates_of(&s.beneficiary),
        vec![&s.env, first, second]
    );
    assert_eq!(
        s.client.certificates_of(&Address::generate(&s.env)),
        vec![&s.env]
    );
}

#[test]
fn test_transfers_always_fail() {
    let s = setup();
    let token_id = mint(&s, 1);
    let other = Address::generate(&s.env);

    assert_eq!(
        s.client.try_transfer(&s.beneficiary, &other, &token_id),
        Err(Ok(Error::NonTransferable))
    );
    assert_eq!(
        s.client
            .try_transfer_from(&s.admin, &s.beneficiary, &other, &token_id),
        Err(Ok(Error::NonTransferable))
    );
    assert_eq!(s.client.owner_of(&token_id), s.beneficiary);
}

#[test]
fn test_revoke_by_issuer() {
    let s = setup();
    let token_id = mint(&s, 1);
    let reason = String::from_str(&s.env, "Fraudulent evidence");

    s.client.revoke(&s.ong, &token_id, &reason);

    let cert = s.client.get_certificate(&token_id);
    assert!(cert.revoked);
    assert_eq!(cert.revocation_reason, Some(reason));
}

#[test]
fn test_revoke_rejects_non_issuer() {
    let s = setup();
    let token_id = mint(&s, 1);
    // Neither the minter nor the admin issued it.
    for caller in [s.minter.clone(), s.admin.clone()] {
        let result = s
            .client
            .try_revoke(&caller, &token_id, &String::from_str(&s.env, "x"));
        assert_eq!(result, Err(Ok(Error::NotIssuer)));
    }
    assert!(!s.client.get_certificate(&token_id).revoked);
}

#[test]
fn test_revoke_twice_fails() {
    let s = setup();
    let token_id = mint(&s, 1);
    s.client
        .revoke(&s.ong, &token_id, &String::from_str(&s.env, "first"));
    let result = s
        .client
        .try_revoke(&s.ong, &token_id, &String::from_str(&s.env, "second"));
    assert_eq!(result, Err(Ok(Error::AlreadyRevoked)));
    assert_eq!(
        s.client.get_certificate(&token_id).revocation_reason,
        Some(String::from_str(&s.env, "first"))
    );
}

#[test]
fn test_unknown_token_fails() {
    let s = setup();
    assert_eq!(
        s.client.try_get_certificate(&7),
        Err(Ok(Error::TokenNotFound))
    );
    assert_eq!(s.client.try_owner_of(&7), Err(Ok(Error::TokenNotFound)));
    assert_eq!(
        s.client
            .try_revoke(&s.ong, &7, &String::from_str(&s.env, "x")),
        Err(Ok(Error::TokenNotFound))
    );
    assert_eq!(
        s.client.try_token_of_package(&hash(&s.env, 3)),
        Err(Ok(Error::TokenNotFound))
    );
}

#[test]
fn test_revoking_issuer_role_stops_minting() {
    let s = setup();
    s.client.revoke_role(&s.admin, &s.minter, &Role::Issuer);
    let result = s.client.try_mint(
        &s.minter,
        &s.beneficiary,
        &hash(&s.env, 1),
        &String::from_str(&s.env, "ipfs://certificate"),
        &s.ong,
    );
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
}

#[test]
fn test_upgrade_keeps_certificates_and_roles() {
    let s = setup();
    let token_id = mint(&s, 1);
    let outsider = Address::generate(&s.env);
    let new_wasm_hash = key_common::testutils::upload_blank_wasm(&s.env);

    assert_eq!(
        s.client.try_upgrade(&outsider, &new_wasm_hash),
        Err(Ok(Error::Unauthorized))
    );
    s.client.upgrade(&s.admin, &new_wasm_hash);

    let cert = s.client.get_certificate(&token_id);
    assert_eq!(cert.owner, s.beneficiary);
    assert_eq!(s.client.token_of_package(&hash(&s.env, 1)), token_id);
    assert_eq!(s.client.total_supply(), 1);
    assert!(s.client.has_role(&s.minter, &Role::Issuer));
    assert_eq!(s.client.version(), 1);
}

// ─────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────

#[test]
fn test_minted_event() {
    let s = setup();
    let token_id = mint(&s, 4);

    let last_event = s.env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, s.client.address);
    let expected_topics = vec![
        &s.env,
        symbol_short!("minted").into_val(&s.env),
        token_id.into_val(&s.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CertificateMinted = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        CertificateMinted {
            token_id,
            owner: s.beneficiary.clone(),
            issuer: s.ong.clone(),
            package_hash: hash(&s.env, 4),
        }
    );
}

#[test]
fn test_revoked_event() {
    let s = setup();
    let token_id = mint(&s, 4);
    let reason = String::from_str(&s.env, "Duplicate beneficiary");
    s.client.revoke(&s.ong, &token_id, &reason);

    let last_event = s.env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &s.env,
        symbol_short!("revoked").into_val(&s.env),
        token_id.into_val(&s.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CertificateRevoked = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        CertificateRevoked {
            token_id,
            issuer: s.ong.clone(),
            reason,
        }
    );
}
