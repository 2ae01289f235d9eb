//! Error taxonomy shared by all KEY Protocol contracts.
//!
//! Every failure carries a specific, stable code so off-chain callers can
//! assert on the cause. [`Error::kind`] folds the specific reasons into the
//! six coarse kinds used for reporting.

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Authorization
    Unauthorized = 10,
    NotProfessor = 11,
    NotTee = 12,
    NotKeyRegistry = 13,
    NotProjectOwner = 14,
    Unassigned = 15,
    NotIssuer = 16,

    // Missing entities
    IdentityNotFound = 20,
    ProjectNotFound = 21,
    PackageNotFound = 22,
    TokenNotFound = 23,
    NoPendingRequest = 24,
    ActivityNotFound = 25,

    // Unique-key violations
    DuplicatePackage = 30,
    AlreadyIssued = 31,
    AlreadyRegistered = 32,
    AlreadyAssociated = 33,

    // Lifecycle
    PackageNotVerified = 40,
    AlreadyResolved = 41,
    AlreadyRevoked = 42,
    NonTransferable = 43,
    NotConfigured = 44,
    SchemaTooNew = 45,
    SelfRevocation = 46,

    // Malformed parameters
    InvalidDates = 50,
    InsufficientFee = 51,
    InvalidAmount = 52,
    TechnicianMismatch = 53,

    // Actor preconditions
    OngNotVerified = 60,
}

/// Coarse failure kinds reported to off-chain observers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    Duplicate,
    InvalidState,
    InvalidInput,
    NotVerified,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthorized
            | Error::NotProfessor
            | Error::NotTee
            | Error::NotKeyRegistry
            | Error::NotProjectOwner
            | Error::Unassigned
            | Error::NotIssuer => ErrorKind::Unauthorized,

            Error::IdentityNotFound
            | Error::ProjectNotFound
            | Error::PackageNotFound
            | Error::TokenNotFound
            | Error::NoPendingRequest
            | Error::ActivityNotFound => ErrorKind::NotFound,

            Error::DuplicatePackage
            | Error::AlreadyIssued
            | Error::AlreadyRegistered
            | Error::AlreadyAssociated => ErrorKind::Duplicate,

            Error::AlreadyInitialized
            | Error::NotInitialized
            | Error::PackageNotVerified
            | Error::AlreadyResolved
            | Error::AlreadyRevoked
            | Error::NonTransferable
            | Error::NotConfigured
            | Error::SchemaTooNew
            | Error::SelfRevocation => ErrorKind::InvalidState,

            Error::InvalidDates
            | Error::InsufficientFee
            | Error::InvalidAmount
            | Error::TechnicianMismatch => ErrorKind::InvalidInput,

            Error::OngNotVerified => ErrorKind::NotVerified,
        }
    }
}
