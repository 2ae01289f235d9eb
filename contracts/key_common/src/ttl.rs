//! TTL management for the two Soroban storage tiers used by every KEY
//! contract.
//!
//! | Tier       | Extended to | When remaining TTL drops below |
//! |------------|-------------|--------------------------------|
//! | Instance   | 7 days      | 1 day                          |
//! | Persistent | 30 days     | 7 days                         |

use soroban_sdk::{Env, IntoVal, Val};

/// Approximate ledgers per day (~5 seconds per ledger).
pub const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

/// Extend instance storage TTL if it falls below the threshold.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Extend the TTL of an existing persistent entry.
///
/// The key must already be present; callers bump right after a `set` or a
/// successful `get`.
pub fn bump_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
