//! Test helpers shared by the contract crates.

use soroban_sdk::{Bytes, BytesN, Env};

/// Upload a code-free wasm module carrying only the `contractenvmetav0`
/// section and return its hash, for exercising `upgrade` in native tests.
pub fn upload_blank_wasm(env: &Env) -> BytesN<32> {
    let mut module = Bytes::from_slice(env, b"\0asm\x01\0\0\0");
    // Custom section: id, size, name length, name, then the
    // `ScEnvMetaEntry::InterfaceVersion` XDR (kind, protocol, pre-release).
    module.extend_from_slice(&[0x00, 0x1e, 0x11]);
    module.extend_from_slice(b"contractenvmetav0");
    module.extend_from_slice(&[0, 0, 0, 0]);
    module.extend_from_slice(&env.ledger().protocol_version().to_be_bytes());
    module.extend_from_slice(&[0, 0, 0, 0]);
    env.deployer().upload_contract_wasm(module)
}
