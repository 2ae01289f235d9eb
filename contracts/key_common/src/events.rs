//! Events emitted identically by every KEY contract.
//!
//! | Topic                  | Data          |
//! |------------------------|---------------|
//! | `("role_set", addr)`   | `RoleChanged` |
//! | `("role_del", addr)`   | `RoleChanged` |
//! | `("upgraded",)`        | `Upgraded`    |
//! | `("migrated",)`        | `Migrated`    |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use crate::access::Role;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChanged {
    pub account: Address,
    pub role: Role,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Upgraded {
    pub new_wasm_hash: BytesN<32>,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Migrated {
    pub from: u32,
    pub to: u32,
    pub by: Address,
}

pub fn emit_role_set(env: &Env, account: Address, role: Role, by: Address) {
    let topics = (symbol_short!("role_set"), account.clone());
    env.events().publish(topics, RoleChanged { account, role, by });
}

pub fn emit_role_del(env: &Env, account: Address, role: Role, by: Address) {
    let topics = (symbol_short!("role_del"), account.clone());
    env.events().publish(topics, RoleChanged { account, role, by });
}

pub fn emit_upgraded(env: &Env, new_wasm_hash: BytesN<32>, by: Address) {
    let topics = (symbol_short!("upgraded"),);
    env.events().publish(topics, Upgraded { new_wasm_hash, by });
}

pub fn emit_migrated(env: &Env, from: u32, to: u32, by: Address) {
    let topics = (symbol_short!("migrated"),);
    env.events().publish(topics, Migrated { from, to, by });
}
