//! Admin-gated in-place code upgrade.
//!
//! Soroban keeps a contract's storage across a wasm swap, so the only
//! concern here is who may trigger it. Data layout changes are handled
//! separately by [`crate::schema::migrate`].

use soroban_sdk::{Address, BytesN, Env};

use crate::access;
use crate::error::Error;
use crate::events;
use crate::schema;

/// Authorization check run before any upgrade touches the contract.
pub fn authorize(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    schema::require_initialized(env)?;
    access::require_admin(env, caller)
}

/// Replace the running contract's wasm with `new_wasm_hash`.
pub fn upgrade(env: &Env, caller: &Address, new_wasm_hash: BytesN<32>) -> Result<(), Error> {
    authorize(env, caller)?;
    env.deployer()
        .update_current_contract_wasm(new_wasm_hash.clone());
    events::emit_upgraded(env, new_wasm_hash, caller.clone());
    Ok(())
}
