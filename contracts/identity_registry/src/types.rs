//! # Types
//!
//! One [`Identity`] record exists per wallet. The variant is the actor's
//! role; the payload carries the role-specific fields.
//!
//! ```text
//! request_registration_ong ──► Ong { verified: false } ──approve_ong──► Ong { verified: true }
//! register_professor       ──► Professor { associated_ongs: [] } ──join_ong──► [.., ong]
//! register_investor        ──► Investor
//! register_beneficiary     ──► Beneficiary
//! ```

use key_common::Role;
use soroban_sdk::{contracttype, Address, BytesN, String, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OngProfile {
    pub wallet: Address,
    pub name: String,
    pub country: String,
    pub description: String,
    pub metadata_uri: String,
    pub did_hash: Option<BytesN<32>>,
    /// Set only by an admin through `approve_ong`.
    pub verified: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfessorProfile {
    pub wallet: Address,
    pub name: String,
    pub specialty: String,
    pub metadata_uri: String,
    pub did_hash: Option<BytesN<32>>,
    /// Verified ONGs this professor has joined, in join order.
    pub associated_ongs: Vec<Address>,
    pub active: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestorProfile {
    pub wallet: Address,
    pub name: String,
    pub organization: String,
    /// Cumulative amount recorded through `record_investment`.
    pub total_invested: i128,
    pub metadata_uri: String,
    pub did_hash: Option<BytesN<32>>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BeneficiaryProfile {
    pub wallet: Address,
    pub community: String,
    pub metadata_uri: String,
    pub did_hash: Option<BytesN<32>>,
    pub active: bool,
}

/// Role-discriminated identity record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Identity {
    Ong(OngProfile),
    Professor(ProfessorProfile),
    Investor(InvestorProfile),
    Beneficiary(BeneficiaryProfile),
}

impl Identity {
    pub fn role(&self) -> Role {
        match self {
            Identity::Ong(_) => Role::Ong,
            Identity::Professor(_) => Role::Professor,
            Identity::Investor(_) => Role::Investor,
            Identity::Beneficiary(_) => Role::Beneficiary,
        }
    }
}

/// Registration fee settings, written at initialisation and by admin setters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    pub collector: Address,
    /// Stellar asset contract the fee is paid in.
    pub token: Address,
    pub amount: i128,
}
