use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificateMinted {
    pub token_id: u64,
    pub owner: Address,
    pub issuer: Address,
    pub package_hash: BytesN<32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificateRevoked {
    pub token_id: u64,
    pub issuer: Address,
    pub reason: String,
}

pub fn emit_minted(
    env: &Env,
    token_id: u64,
    owner: Address,
    issuer: Address,
    package_hash: BytesN<32>,
) {
    let topics = (symbol_short!("minted"), token_id);
    env.events().publish(
        topics,
        CertificateMinted {
            token_id,
            owner,
            issuer,
            package_hash,
        },
    );
}

pub fn emit_revoked(env: &Env, token_id: u64, issuer: Address, reason: String) {
    let topics = (symbol_short!("revoked"), token_id);
    env.events().publish(
        topics,
        CertificateRevoked {
            token_id,
            issuer,
            reason,
        },
    );
}
