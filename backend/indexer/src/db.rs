//! Database layer: migrations, queries, and cursor management.

use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::{info, warn};

use crate::errors::Result;
use crate::events::{EventKind, EventRecord, KeyEvent};

const EVENT_COLUMNS: &str = "id, event_id, event_type, subject, actor, amount, data, ledger, \
                             timestamp, contract_id, tx_hash, created_at";

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };
    let url = if url.contains('?') || url.contains(":memory:") {
        url
    } else {
        // Create the file on first run.
        format!("{url}?mode=rwc")
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied successfully");
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Cursor helpers
// ─────────────────────────────────────────────────────────

/// Read the last-seen ledger from the cursor row.
/// Returns `0` when no cursor has been persisted yet.
pub async fn get_last_ledger(pool: &SqlitePool) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT last_ledger FROM indexer_cursor WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v).unwrap_or(0))
}

/// Persist the last-seen ledger (and optionally a pagination cursor string).
pub async fn save_cursor(
    pool: &SqlitePool,
    last_ledger: i64,
    last_cursor: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2 WHERE id = 1")
        .bind(last_ledger)
        .bind(last_cursor)
        .execute(pool)
        .await?;
    Ok(())
}

/// Read back the raw cursor string (used to resume pagination mid-ledger).
pub async fn get_cursor_string(pool: &SqlitePool) -> Result<Option<String>> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT last_cursor FROM indexer_cursor WHERE id = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row.and_then(|(v,)| v))
}

// ─────────────────────────────────────────────────────────
// Event writes
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events. Events whose `event_id` is already
/// stored are silently ignored, so re-polling a range is harmless.
pub async fn insert_events(pool: &SqlitePool, events: &[KeyEvent]) -> Result<usize> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;
    for ev in events {
        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_id, event_type, subject, actor, amount, data, ledger, timestamp,
                 contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&ev.event_id)
        .bind(&ev.event_type)
        .bind(&ev.subject)
        .bind(&ev.actor)
        .bind(&ev.amount)
        .bind(&ev.data)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        count += rows_affected as usize;
    }
    tx.commit().await?;
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Event reads
// ─────────────────────────────────────────────────────────

/// Optional narrowing for [`get_all_events`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EventFilter {
    pub event_type: Option<String>,
    pub limit: Option<i64>,
}

/// Fetch all events about one subject (project id, package hash, token id
/// or address), ordered by ledger ascending.
pub async fn get_events_for_subject(pool: &SqlitePool, subject: &str) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE subject = ?1 ORDER BY ledger ASC, id ASC"
    );
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(subject)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Fetch events, ordered by ledger ascending.
pub async fn get_all_events(pool: &SqlitePool, filter: &EventFilter) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM events \
         WHERE (?1 IS NULL OR event_type = ?1) \
         ORDER BY ledger ASC, id ASC LIMIT ?2"
    );
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(&filter.event_type)
        .bind(filter.limit.unwrap_or(-1))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

// ─────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────

/// Aggregate counters for the dashboard overview.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub ong_requests: i64,
    pub identities: i64,
    pub projects: i64,
    pub activities: i64,
    pub evidence_registered: i64,
    pub evidence_verified: i64,
    pub evidence_rejected: i64,
    pub audits: i64,
    pub certificates_issued: i64,
    pub certificates_revoked: i64,
    /// Decimal string; the sum may exceed `i64`.
    pub total_invested: String,
}

pub async fn get_overview(pool: &SqlitePool) -> Result<Overview> {
    let counts: Vec<(String, i64)> =
        sqlx::query_as("SELECT event_type, COUNT(*) FROM events GROUP BY event_type")
            .fetch_all(pool)
            .await?;

    let mut overview = Overview::default();
    for (event_type, count) in counts {
        let slot = match event_type.as_str() {
            t if t == EventKind::OngRegistrationRequested.as_str() => &mut overview.ong_requests,
            t if t == EventKind::IdentityRegistered.as_str() => &mut overview.identities,
            t if t == EventKind::ProjectCreated.as_str() => &mut overview.projects,
            t if t == EventKind::ActivityRegistered.as_str() => &mut overview.activities,
            t if t == EventKind::EvidenceRegistered.as_str() => &mut overview.evidence_registered,
            t if t == EventKind::EvidenceVerified.as_str() => &mut overview.evidence_verified,
            t if t == EventKind::EvidenceRejected.as_str() => &mut overview.evidence_rejected,
            t if t == EventKind::AuditEmitted.as_str() => &mut overview.audits,
            t if t == EventKind::CertificateIssued.as_str() => &mut overview.certificates_issued,
            t if t == EventKind::CertificateRevoked.as_str() => &mut overview.certificates_revoked,
            _ => continue,
        };
        *slot = count;
    }

    // Amounts are i128 stored as decimal text; SQLite's SUM overflows at i64.
    let amounts: Vec<(Option<String>,)> =
        sqlx::query_as("SELECT amount FROM events WHERE event_type = ?1")
            .bind(EventKind::InvestmentRecorded.as_str())
            .fetch_all(pool)
            .await?;
    let total = amounts
        .into_iter()
        .filter_map(|(amount,)| amount)
        .fold(0i128, |acc, amount| match amount.parse::<i128>() {
            Ok(value) => acc.saturating_add(value),
            Err(_) => {
                warn!("Skipping non-numeric investment amount {amount:?}");
                acc
            }
        });
    overview.total_invested = total.to_string();

    Ok(overview)
}
