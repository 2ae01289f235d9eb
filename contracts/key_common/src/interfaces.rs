//! Cross-contract client traits.
//!
//! Each registry holds plain `Address` handles to its collaborators and
//! talks to them through these generated clients, so no contract crate
//! links another contract's code.

use soroban_sdk::{contractclient, Address, BytesN, Env, String};

use crate::access::Role;
use crate::error::Error;

#[contractclient(name = "IdentityClient")]
pub trait IdentityInterface {
    fn has_role(env: Env, account: Address, role: Role) -> bool;
    fn is_verified_ong(env: Env, account: Address) -> bool;
}

#[contractclient(name = "ProjectClient")]
pub trait ProjectInterface {
    fn project_owner(env: Env, project_id: u64) -> Address;
    fn link_evidence(env: Env, caller: Address, project_id: u64, evidence_hash: BytesN<32>);
}

#[contractclient(name = "CertificateClient")]
pub trait CertificateInterface {
    fn mint(
        env: Env,
        minter: Address,
        owner: Address,
        package_hash: BytesN<32>,
        metadata_uri: String,
        issuer: Address,
    ) -> u64;
}

/// `account` must hold the ONG role in the identity registry and its ONG
/// record must be verified.
pub fn require_verified_ong(env: &Env, identity: &Address, account: &Address) -> Result<(), Error> {
    let client = IdentityClient::new(env, identity);
    if !client.has_role(account, &Role::Ong) {
        return Err(Error::Unauthorized);
    }
    if !client.is_verified_ong(account) {
        return Err(Error::OngNotVerified);
    }
    Ok(())
}

/// `account` must hold the Professor role in the identity registry.
pub fn require_professor(env: &Env, identity: &Address, account: &Address) -> Result<(), Error> {
    if IdentityClient::new(env, identity).has_role(account, &Role::Professor) {
        Ok(())
    } else {
        Err(Error::NotProfessor)
    }
}
