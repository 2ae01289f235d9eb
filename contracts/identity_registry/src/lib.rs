//! # KEY Protocol Identity Registry
//!
//! Custody of per-wallet identity records and the role grants every other
//! KEY contract relies on.
//!
//! | Phase        | Entry Point(s)                                            |
//! |--------------|-----------------------------------------------------------|
//! | Bootstrap    | [`IdentityRegistry::initialize`]                          |
//! | ONG onboarding | `request_registration_ong`, `approve_ong`               |
//! | Registration | `register_professor`, `register_beneficiary`, `register_investor` |
//! | Association  | `join_ong`, `record_investment`                           |
//! | Admin        | `grant_role`, `revoke_role`, `set_registration_fee`, `set_fee_collector`, `upgrade`, `migrate` |
//! | Queries      | `get_identity`, `is_verified_ong`, `has_role`, `roles_of`, `registration_fee`, `fee_collector`, `version` |
//!
//! ONG onboarding is two-step: the ONG pays the registration fee and files a
//! pending record, then an admin approves it, which flips `verified` and
//! grants the `Ong` role. Every ONG-gated write here requires a *verified*
//! ONG, not just the role.

#![no_std]

use key_common::schema::{self, Migration};
use key_common::{access, upgrade, Error, Role};
use soroban_sdk::{contract, contractimpl, token, Address, BytesN, Env, String, Vec};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod test_events;

pub use events::{IdentityRegistered, OngAssociated, OngRegistrationRequested};
pub use types::{
    BeneficiaryProfile, FeeConfig, Identity, InvestorProfile, OngProfile, ProfessorProfile,
};

/// Storage layout migrations, oldest first.
const MIGRATIONS: &[Migration] = &[];

#[contract]
pub struct IdentityRegistry;

#[contractimpl]
impl IdentityRegistry {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the registry, make `admin` the first Admin and configure
    /// the ONG registration fee.
    pub fn initialize(
        env: Env,
        admin: Address,
        fee_collector: Address,
        fee_token: Address,
        registration_fee: i128,
    ) -> Result<(), Error> {
        admin.require_auth();
        if registration_fee < 0 {
            return Err(Error::InvalidAmount);
        }
        schema::init(&env, MIGRATIONS)?;
        access::grant(&env, &admin, Role::Admin);
        storage::save_fee_config(
            &env,
            &FeeConfig {
                collector: fee_collector,
                token: fee_token,
                amount: registration_fee,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // ONG onboarding
    // ─────────────────────────────────────────────────────────

    /// File (or refile) a pending ONG registration, paying `fee` to the fee
    /// collector.
    ///
    /// A wallet holds at most one pending request: refiling while still
    /// unverified replaces the pending record. Filing after approval, or
    /// from a wallet that already has another identity, fails with
    /// `AlreadyRegistered`.
    pub fn request_registration_ong(
        env: Env,
        ong: Address,
        data: OngProfile,
        fee: i128,
    ) -> Result<(), Error> {
        ong.require_auth();
        schema::require_initialized(&env)?;

        let config = storage::load_fee_config(&env)?;
        if fee < config.amount {
            return Err(Error::InsufficientFee);
        }

        match storage::load_identity(&env, &ong) {
            None => {}
            Some(Identity::Ong(pending)) if !pending.verified => {}
            Some(_) => return Err(Error::AlreadyRegistered),
        }

        let profile = OngProfile {
            wallet: ong.clone(),
            verified: false,
            ..data
        };
        storage::save_identity(&env, &ong, &Identity::Ong(profile.clone()));

        if fee > 0 {
            token::Client::new(&env, &config.token).transfer(&ong, &config.collector, &fee);
        }

        events::emit_ong_registration_requested(&env, ong, profile.name, fee);
        Ok(())
    }

    /// Approve a pending ONG: sets `verified` and grants the `Ong` role.
    pub fn approve_ong(env: Env, admin: Address, ong: Address) -> Result<(), Error> {
        admin.require_auth();
        schema::require_initialized(&env)?;
        access::require_admin(&env, &admin)?;

        let mut profile = match storage::load_identity(&env, &ong) {
            Some(Identity::Ong(profile)) => profile,
            _ => return Err(Error::NoPendingRequest),
        };
        if profile.verified {
            return Err(Error::AlreadyRegistered);
        }

        profile.verified = true;
        storage::save_identity(&env, &ong, &Identity::Ong(profile.clone()));
        if access::grant(&env, &ong, Role::Ong) {
            key_common::events::emit_role_set(&env, ong.clone(), Role::Ong, admin);
        }

        events::emit_identity_registered(&env, ong, Role::Ong, profile.name);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Actor registration
    // ─────────────────────────────────────────────────────────

    /// Register `wallet` as a professor. Caller must be a verified ONG.
    pub fn register_professor(
        env: Env,
        ong: Address,
        wallet: Address,
        data: ProfessorProfile,
    ) -> Result<(), Error> {
        ong.require_auth();
        schema::require_initialized(&env)?;
        Self::require_verified_ong(&env, &ong)?;
        Self::require_unregistered(&env, &wallet)?;

        let profile = ProfessorProfile {
            wallet: wallet.clone(),
            associated_ongs: Vec::new(&env),
            ..data
        };
        Self::finish_registration(&env, &wallet, Identity::Professor(profile.clone()), profile.name);
        Ok(())
    }

    /// Register `wallet` as a beneficiary. Caller must be a verified ONG.
    pub fn register_beneficiary(
        env: Env,
        ong: Address,
        wallet: Address,
        data: BeneficiaryProfile,
    ) -> Result<(), Error> {
        ong.require_auth();
        schema::require_initialized(&env)?;
        Self::require_verified_ong(&env, &ong)?;
        Self::require_unregistered(&env, &wallet)?;

        let profile = BeneficiaryProfile {
            wallet: wallet.clone(),
            ..data
        };
        Self::finish_registration(
            &env,
            &wallet,
            Identity::Beneficiary(profile.clone()),
            profile.community,
        );
        Ok(())
    }

    /// Register `wallet` as an investor. Admin only.
    pub fn register_investor(
        env: Env,
        admin: Address,
        wallet: Address,
        data: InvestorProfile,
    ) -> Result<(), Error> {
        admin.require_auth();
        schema::require_initialized(&env)?;
        access::require_admin(&env, &admin)?;
        Self::require_unregistered(&env, &wallet)?;
        if data.total_invested < 0 {
            return Err(Error::InvalidAmount);
        }

        let profile = InvestorProfile {
            wallet: wallet.clone(),
            ..data
        };
        Self::finish_registration(&env, &wallet, Identity::Investor(profile.clone()), profile.name);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Associations
    // ─────────────────────────────────────────────────────────

    /// Associate the calling professor with a verified ONG.
    pub fn join_ong(env: Env, professor: Address, ong: Address) -> Result<(), Error> {
        professor.require_auth();
        schema::require_initialized(&env)?;

        if !access::has_role(&env, &professor, Role::Professor) {
            return Err(Error::NotProfessor);
        }
        let mut profile = match storage::load_identity(&env, &professor) {
            Some(Identity::Professor(profile)) => profile,
            _ => return Err(Error::NotProfessor),
        };
        match storage::load_identity(&env, &ong) {
            Some(Identity::Ong(target)) if target.verified => {}
            Some(Identity::Ong(_)) => return Err(Error::OngNotVerified),
            _ => return Err(Error::IdentityNotFound),
        }
        if profile.associated_ongs.iter().any(|joined| joined == ong) {
            return Err(Error::AlreadyAssociated);
        }

        profile.associated_ongs.push_back(ong.clone());
        storage::save_identity(&env, &professor, &Identity::Professor(profile));

        events::emit_ong_associated(&env, professor, ong);
        Ok(())
    }

    /// Add `amount` to an investor's cumulative invested total. Admin only.
    pub fn record_investment(
        env: Env,
        admin: Address,
        investor: Address,
        amount: i128,
    ) -> Result<i128, Error> {
        admin.require_auth();
        schema::require_initialized(&env)?;
        access::require_admin(&env, &admin)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let mut profile = match storage::load_identity(&env, &investor) {
            Some(Identity::Investor(profile)) => profile,
            _ => return Err(Error::IdentityNotFound),
        };
        profile.total_invested = profile
            .total_invested
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        let total = profile.total_invested;
        storage::save_identity(&env, &investor, &Identity::Investor(profile));

        events::emit_investment_recorded(&env, investor, amount, total);
        Ok(total)
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

    pub fn set_registration_fee(env: Env, admin: Address, amount: i128) -> Result<(), Error> {
        admin.require_auth();
        schema::require_initialized(&env)?;
        access::require_admin(&env, &admin)?;
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        let mut config = storage::load_fee_config(&env)?;
        config.amount = amount;
        storage::save_fee_config(&env, &config);
        events::emit_fee_updated(&env, config);
        Ok(())
    }

    pub fn set_fee_collector(env: Env, admin: Address, collector: Address) -> Result<(), Error> {
        admin.require_auth();
        schema::require_initialized(&env)?;
        access::require_admin(&env, &admin)?;

        let mut config = storage::load_fee_config(&env)?;
        config.collector = collector;
        storage::save_fee_config(&env, &config);
        events::emit_fee_updated(&env, config);
        Ok(())
    }

    /// Replace this contract's code. Admin only; storage is preserved.
    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
        upgrade::upgrade(&env, &caller, new_wasm_hash)
    }

    /// Bring stored data up to the layout this code expects. Admin only.
    pub fn migrate(env: Env, caller: Address) -> Result<u32, Error> {
        schema::migrate(&env, &caller, MIGRATIONS)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_identity(env: Env, wallet: Address) -> Result<Identity, Error> {
        storage::load_identity(&env, &wallet).ok_or(Error::IdentityNotFound)
    }

    /// `true` only for an ONG record an admin has approved.
    pub fn is_verified_ong(env: Env, account: Address) -> bool {
        matches!(
            storage::load_identity(&env, &account),
            Some(Identity::Ong(profile)) if profile.verified
        )
    }

    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        access::has_role(&env, &account, role)
    }

    pub fn roles_of(env: Env, account: Address) -> Vec<Role> {
        access::roles_of(&env, &account)
    }

    pub fn registration_fee(env: Env) -> Result<i128, Error> {
        Ok(storage::load_fee_config(&env)?.amount)
    }

    pub fn fee_collector(env: Env) -> Result<Address, Error> {
        Ok(storage::load_fee_config(&env)?.collector)
    }

    pub fn version(env: Env) -> u32 {
        schema::version(&env)
    }
}

impl IdentityRegistry {
    fn require_verified_ong(env: &Env, ong: &Address) -> Result<(), Error> {
        if !access::has_role(env, ong, Role::Ong) {
            return Err(Error::Unauthorized);
        }
        match storage::load_identity(env, ong) {
            Some(Identity::Ong(profile)) if profile.verified => Ok(()),
            _ => Err(Error::OngNotVerified),
        }
    }

    fn require_unregistered(env: &Env, wallet: &Address) -> Result<(), Error> {
        if storage::is_registered(env, wallet) {
            return Err(Error::AlreadyRegistered);
        }
        Ok(())
    }

    fn finish_registration(env: &Env, wallet: &Address, identity: Identity, label: String) {
        let role = identity.role();
        storage::save_identity(env, wallet, &identity);
        access::grant(env, wallet, role);
        events::emit_identity_registered(env, wallet.clone(), role, label);
    }
}
