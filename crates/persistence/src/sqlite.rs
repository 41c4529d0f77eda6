// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup and schema bootstrap.
//!
//! The schema is created statement by statement on the freshly
//! established connection, so shared in-memory databases are initialized
//! on the very connection that keeps them alive.

use diesel::prelude::*;
use diesel::sql_types::BigInt;
use tracing::info;

use crate::error::PersistenceError;

/// Schema DDL, one statement per entry. All statements are idempotent.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS tour_requests (
        request_id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        destination TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        budget DOUBLE NOT NULL CHECK(budget > 0),
        party_size BIGINT NOT NULL CHECK(party_size > 0),
        tour_type TEXT NOT NULL,
        languages_json TEXT NOT NULL,
        description TEXT NOT NULL,
        requirements TEXT,
        tourist_id TEXT NOT NULL,
        tourist_name TEXT NOT NULL,
        application_count BIGINT NOT NULL DEFAULT 0 CHECK(application_count >= 0),
        status TEXT NOT NULL CHECK(status IN ('open', 'accepted', 'completed', 'cancelled')),
        selected_application_id BIGINT,
        selected_guide_id TEXT,
        selected_guide_name TEXT,
        selected_guide_email TEXT,
        agreed_price DOUBLE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_tour_requests_status
        ON tour_requests(status)",
    "CREATE INDEX IF NOT EXISTS idx_tour_requests_tourist
        ON tour_requests(tourist_id)",
    "CREATE TABLE IF NOT EXISTS applications (
        application_id INTEGER PRIMARY KEY AUTOINCREMENT,
        request_id BIGINT NOT NULL,
        guide_id TEXT NOT NULL,
        guide_name TEXT NOT NULL,
        guide_email TEXT NOT NULL,
        proposed_price DOUBLE NOT NULL,
        cover_letter TEXT NOT NULL,
        status TEXT NOT NULL CHECK(status IN ('pending', 'selected', 'rejected')),
        request_title TEXT NOT NULL,
        request_destination TEXT NOT NULL,
        request_start_date TEXT NOT NULL,
        request_end_date TEXT NOT NULL,
        request_tour_type TEXT NOT NULL,
        tourist_id TEXT NOT NULL,
        tourist_name TEXT NOT NULL,
        agreed_price DOUBLE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE(request_id, guide_id),
        FOREIGN KEY(request_id) REFERENCES tour_requests(request_id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_applications_by_request
        ON applications(request_id)",
    "CREATE TABLE IF NOT EXISTS bookings (
        booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
        request_id BIGINT NOT NULL UNIQUE,
        tourist_id TEXT NOT NULL,
        tourist_name TEXT NOT NULL,
        guide_id TEXT NOT NULL,
        guide_name TEXT NOT NULL,
        title TEXT NOT NULL,
        destination TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        tour_type TEXT NOT NULL,
        party_size BIGINT NOT NULL,
        budget DOUBLE NOT NULL,
        status TEXT NOT NULL CHECK(status IN ('pending', 'upcoming', 'completed', 'cancelled')),
        agreed_price DOUBLE NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY(request_id) REFERENCES tour_requests(request_id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_bookings_tourist
        ON bookings(tourist_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_guide
        ON bookings(guide_id)",
    "CREATE TABLE IF NOT EXISTS audit_events (
        event_id INTEGER PRIMARY KEY AUTOINCREMENT,
        entity_kind TEXT NOT NULL,
        entity_id BIGINT NOT NULL,
        actor_json TEXT NOT NULL,
        cause_json TEXT NOT NULL,
        action_json TEXT NOT NULL,
        before_snapshot_json TEXT NOT NULL,
        after_snapshot_json TEXT NOT NULL,
        created_at TEXT DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE INDEX IF NOT EXISTS idx_audit_events_scope
        ON audit_events(entity_kind, entity_id, event_id)",
];

/// Establishes a connection and initializes the schema.
///
/// # Arguments
///
/// * `database_url` - The `SQLite` database URL or file path
///
/// # Errors
///
/// Returns an error if the connection or schema creation fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    // Enable foreign key enforcement before any table exists.
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    info!(database_url, "Initializing database schema");
    for statement in SCHEMA_STATEMENTS {
        diesel::sql_query(*statement)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;
    }

    Ok(conn)
}

/// Enables WAL journaling for better read concurrency on file databases.
///
/// # Errors
///
/// Returns an error if the pragma cannot be applied.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    #[derive(QueryableByName)]
    struct JournalModeRow {
        #[diesel(sql_type = diesel::sql_types::Text)]
        #[allow(dead_code)]
        journal_mode: String,
    }

    diesel::sql_query("PRAGMA journal_mode = WAL")
        .get_result::<JournalModeRow>(conn)
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;
    Ok(())
}

/// Verifies that foreign key enforcement is enabled on the connection.
///
/// This is a startup-time check required to ensure referential integrity
/// constraints are enforced.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` otherwise.
pub fn verify_foreign_key_enforcement(
    conn: &mut SqliteConnection,
) -> Result<(), PersistenceError> {
    #[derive(QueryableByName)]
    struct ForeignKeysRow {
        #[diesel(sql_type = BigInt)]
        foreign_keys: i64,
    }

    let row: ForeignKeysRow = diesel::sql_query("PRAGMA foreign_keys")
        .get_result(conn)
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    if row.foreign_keys == 1 {
        Ok(())
    } else {
        Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
    }
}
