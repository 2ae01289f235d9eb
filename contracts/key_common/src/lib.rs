//! # KEY Protocol shared building blocks
//!
//! Everything the four KEY Protocol contracts have in common lives here so
//! that each contract crate only carries its own entry points and records:
//!
//! | Module        | Purpose                                                    |
//! |---------------|------------------------------------------------------------|
//! | [`error`]     | The single `#[contracterror]` enum and its taxonomy        |
//! | [`access`]    | Per-address capability table (`Address -> {Role}`)         |
//! | [`ttl`]       | Instance / persistent TTL extension                        |
//! | [`schema`]    | Initialisation guard, schema version and migrations        |
//! | [`upgrade`]   | Admin-gated wasm upgrade                                   |
//! | [`events`]    | Events shared by every contract (roles, upgrades)          |
//! | [`interfaces`]| Client traits for cross-contract calls                     |
//! | `testutils`   | Test-only helpers, behind the `testutils` feature          |
//!
//! The crate is `rlib` only: it never exports contract entry points itself.

#![no_std]

pub mod access;
pub mod error;
pub mod events;
pub mod interfaces;
pub mod schema;
pub mod ttl;
pub mod upgrade;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;


pub use access::Role;
pub use error::{Error, ErrorKind};
