use soroban_sdk::{contracttype, Address, BytesN, String};

/// A soul-bound certificate. `owner` is fixed at mint time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Certificate {
    pub token_id: u64,
    pub owner: Address,
    /// The ONG that issued the certificate; the only address that may revoke it.
    pub issuer: Address,
    pub package_hash: BytesN<32>,
    pub metadata_uri: String,
    pub issued_at: u64,
    pub revoked: bool,
    pub revocation_reason: Option<String>,
}
