//! Schema upgrades for the preference database.
//!
//! The applied version lives in SQLite's `user_version` header field, so the
//! database carries no bookkeeping table of its own. Each step runs inside a
//! transaction that also bumps the version.

use anyhow::{bail, Context, Result};
use rusqlite::Connection;

/// Ordered upgrade scripts. Step `n` (1-based) moves the schema to version `n`.
const STEPS: &[(&str, &str)] = &[("ui preferences", include_str!("migrations/001_initial.sql"))];

/// Version a fully upgraded database reports.
pub const SCHEMA_VERSION: u32 = STEPS.len() as u32;

pub fn schema_version(conn: &Connection) -> Result<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .context("Failed to read schema version")
}

/// Bring `conn` up to [`SCHEMA_VERSION`]. Already-applied steps are skipped.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current = schema_version(conn)?;
    if current > SCHEMA_VERSION {
        bail!(
            "preference database is at schema version {}, newer than this build ({})",
            current,
            SCHEMA_VERSION
        );
    }

    for (target, (label, sql)) in (1u32..).zip(STEPS).skip(current as usize) {
        tracing::info!(version = target, step = *label, "upgrading preference schema");
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)
            .with_context(|| format!("Failed to upgrade schema to version {target} ({label})"))?;
        tx.pragma_update(None, "user_version", target)?;
        tx.commit()?;
    }

    Ok(())
}
