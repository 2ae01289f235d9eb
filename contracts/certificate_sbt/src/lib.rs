//! # KEY Protocol Certificate SBT
//!
//! Soul-bound certificates minted for verified evidence packages. Every
//! token is bound to its owner for life: both transfer entry points fail
//! unconditionally. A package hash maps to at most one token.
//!
//! Minting is restricted to holders of the `Issuer` role (the KEY registry
//! in a normal deployment). The `issuer` recorded on the certificate is the
//! ONG on whose behalf it was minted, and only that ONG may revoke it.

#![no_std]

use key_common::schema::{self, Migration};
use key_common::{access, upgrade, Error, Role};
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod test;

pub use events::{CertificateMinted, CertificateRevoked};
pub use types::Certificate;

const MIGRATIONS: &[Migration] = &[];

#[contract]
pub struct CertificateSbt;

#[contractimpl]
impl CertificateSbt {
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        schema::init(&env, MIGRATIONS)?;
        access::grant(&env, &admin, Role::Admin);
        Ok(())
    }

    /// Mint a certificate for `package_hash` to `owner` and return its id.
    ///
    /// `minter` must hold the `Issuer` role. Fails with `AlreadyIssued` if
    /// the package already has a certificate.
    pub fn mint(
        env: Env,
        minter: Address,
        owner: Address,
        package_hash: BytesN<32>,
        metadata_uri: String,
        issuer: Address,
    ) -> Result<u64, Error> {
        minter.require_auth();
        schema::require_initialized(&env)?;
        access::require_role(&env, &minter, Role::Issuer)?;
        if storage::token_of_package(&env, &package_hash).is_some() {
            return Err(Error::AlreadyIssued);
        }

        let token_id = storage::next_token_id(&env);
        storage::save_certificate(
            &env,
            &Certificate {
                token_id,
                owner: owner.clone(),
                issuer: issuer.clone(),
                package_hash: package_hash.clone(),
                metadata_uri,
                issued_at: env.ledger().timestamp(),
                revoked: false,
                revocation_reason: None,
            },
        );
        storage::bind_package(&env, &package_hash, token_id);
        storage::push_owner_token(&env, &owner, token_id);

        events::emit_minted(&env, token_id, owner, issuer, package_hash);
        Ok(token_id)
    }

    /// Revoke a certificate. Only its issuer may do so, and only once.
    pub fn revoke(env: Env, issuer: Address, token_id: u64, reason: String) -> Result<(), Error> {
        issuer.require_auth();
        schema::require_initialized(&env)?;

        let mut cert = storage::load_certificate(&env, token_id)?;
        if cert.issuer != issuer {
            return Err(Error::NotIssuer);
        }
        if cert.revoked {
            return Err(Error::AlreadyRevoked);
        }

        cert.revoked = true;
        cert.revocation_reason = Some(reason.clone());
        storage::save_certificate(&env, &cert);

        events::emit_revoked(&env, token_id, issuer, reason);
        Ok(())
    }

    pub fn transfer(_env: Env, _from: Address, _to: Address, _token_id: u64) -> Result<(), Error> {
        Err(Error::NonTransferable)
    }

    pub fn transfer_from(
        _env: Env,
        _spender: Address,
        _from: Address,
        _to: Address,
        _token_id: u64,
    ) -> Result<(), Error> {
        Err(Error::NonTransferable)
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

    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        upgrade::upgrade(&env, &caller, new_wasm_hash)
    }

    pub fn migrate(env: Env, caller: Address) -> Result<u32, Error> {
        schema::migrate(&env, &caller, MIGRATIONS)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_certificate(env: Env, token_id: u64) -> Result<Certificate, Error> {
        storage::load_certificate(&env, token_id)
    }

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        Ok(storage::load_certificate(&env, token_id)?.owner)
    }

    pub fn token_of_package(env: Env, package_hash: BytesN<32>) -> Result<u64, Error> {
        storage::token_of_package(&env, &package_hash).ok_or(Error::TokenNotFound)
    }

    pub fn certificates_of(env: Env, owner: Address) -> Vec<u64> {
        storage::tokens_of(&env, &owner)
    }

    pub fn total_supply(env: Env) -> u64 {
        storage::total_supply(&env)
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
