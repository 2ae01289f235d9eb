//! Identity registry events.
//!
//! | Topic                       | Data                       |
//! |-----------------------------|----------------------------|
//! | `("ong_req", ong)`          | `OngRegistrationRequested` |
//! | `("id_reg", wallet)`        | `IdentityRegistered`       |
//! | `("ong_assoc", professor)`  | `OngAssociated`            |
//! | `("invested", investor)`    | `InvestmentRecorded`       |
//! | `("fee_set",)`              | `FeeConfig`                |

use key_common::Role;
use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::FeeConfig;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OngRegistrationRequested {
    pub ong: Address,
    pub name: String,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityRegistered {
    pub wallet: Address,
    pub role: Role,
    /// Display name, or the community label for beneficiaries.
    pub label: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OngAssociated {
    pub professor: Address,
    pub ong: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestmentRecorded {
    pub investor: Address,
    pub amount: i128,
    pub total_invested: i128,
}

pub fn emit_ong_registration_requested(env: &Env, ong: Address, name: String, fee: i128) {
    let topics = (symbol_short!("ong_req"), ong.clone());
    env.events()
        .publish(topics, OngRegistrationRequested { ong, name, fee });
}

pub fn emit_identity_registered(env: &Env, wallet: Address, role: Role, label: String) {
    let topics = (symbol_short!("id_reg"), wallet.clone());
    env.events()
        .publish(topics, IdentityRegistered { wallet, role, label });
}

pub fn emit_ong_associated(env: &Env, professor: Address, ong: Address) {
    let topics = (symbol_short!("ong_assoc"), professor.clone());
    env.events().publish(topics, OngAssociated { professor, ong });
}

pub fn emit_investment_recorded(env: &Env, investor: Address, amount: i128, total_invested: i128) {
    let topics = (symbol_short!("invested"), investor.clone());
    env.events().publish(
        topics,
        InvestmentRecorded {
            investor,
            amount,
            total_invested,
        },
    );
}

pub fn emit_fee_updated(env: &Env, config: FeeConfig) {
    env.events().publish((symbol_short!("fee_set"),), config);
}
