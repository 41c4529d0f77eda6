// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the TourMatch marketplace.
//!
//! This crate persists the matching lifecycle: tour requests, their child
//! applications, bookings, and the audit trail. It is built on Diesel
//! over `SQLite`.
//!
//! ## Atomicity
//!
//! Every transition commits inside a single immediate transaction, and
//! status preconditions are re-asserted by the writes themselves
//! (`UPDATE ... WHERE status = <observed>`). The acceptance batch relies
//! on this: two concurrent acceptance attempts serialize on the write
//! transaction, and the loser's guard matches zero rows, rolling its
//! whole batch back. The booking insert rides inside the same
//! transaction, so an accepted request without a booking cannot be
//! observed.
//!
//! ## Testing
//!
//! In-memory databases get a unique shared-cache name per instance, so
//! tests are isolated without external infrastructure.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tour_match::{BookingTransitionResult, CreateResult, RequestState, TransitionKind, TransitionResult};
use tour_match_audit::{AuditEvent, EntityKind};
use tour_match_domain::{Application, Booking, TourRequest};
use tracing::error;

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::{PersistCreateResult, PersistTransitionResult};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the matching lifecycle.
///
/// Owns a single `SQLite` connection; callers serialize access to it.
pub struct Persistence {
    conn: SqliteConnection,
}

/// Type alias kept for call sites that name the backend explicitly.
pub type SqlitePersistence = Persistence;

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Persists a request creation and returns the assigned identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; nothing is committed then.
    pub fn persist_create(
        &mut self,
        result: &CreateResult,
    ) -> Result<PersistCreateResult, PersistenceError> {
        mutations::persist_create(&mut self.conn, result)
    }

    /// Persists a request-scoped transition and returns the assigned
    /// identifiers.
    ///
    /// An acceptance that fails here failed after its preconditions were
    /// validated; that is logged distinctly because it is the one spot
    /// where a caller-observed success path dies inside the commit. The
    /// transaction has rolled back, so no partial resolution is left
    /// behind either way.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` when a concurrent writer won
    /// the race for the entity's status, and other variants for I/O or
    /// encoding failures.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        let persisted = mutations::persist_transition(&mut self.conn, result);

        if let Err(e) = &persisted {
            if let TransitionKind::AcceptApplication { application_id } = &result.kind {
                error!(
                    request_id = result.new_state.request.request_id,
                    application_id = *application_id,
                    error = %e,
                    "Acceptance commit failed after validation; batch rolled back, no booking created"
                );
            }
        }

        persisted
    }

    /// Persists a booking-scoped transition and returns the event
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; nothing is committed then.
    pub fn persist_booking_transition(
        &mut self,
        result: &BookingTransitionResult,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_booking_transition(&mut self.conn, result)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Loads a single request.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the request does not exist.
    pub fn get_request(&mut self, request_id: i64) -> Result<TourRequest, PersistenceError> {
        queries::requests::get_request(&mut self.conn, request_id)
    }

    /// Loads a request together with every application it owns.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the request does not exist.
    pub fn load_request_state(
        &mut self,
        request_id: i64,
    ) -> Result<RequestState, PersistenceError> {
        let request: TourRequest = queries::requests::get_request(&mut self.conn, request_id)?;
        let applications: Vec<Application> =
            queries::applications::list_applications_for_request(&mut self.conn, request_id)?;
        Ok(RequestState::new(request, applications))
    }

    /// Loads every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_requests(&mut self) -> Result<Vec<TourRequest>, PersistenceError> {
        queries::requests::list_requests(&mut self.conn)
    }

    /// Loads every application owned by a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_applications(
        &mut self,
        request_id: i64,
    ) -> Result<Vec<Application>, PersistenceError> {
        queries::applications::list_applications_for_request(&mut self.conn, request_id)
    }

    /// Finds the identifier of a guide's application on a request.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the guide has no
    /// application on the request.
    pub fn find_application_id(
        &mut self,
        request_id: i64,
        guide_id: &str,
    ) -> Result<i64, PersistenceError> {
        queries::applications::find_application_id(&mut self.conn, request_id, guide_id)
    }

    /// Loads a single booking.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the booking does not exist.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Booking, PersistenceError> {
        queries::bookings::get_booking(&mut self.conn, booking_id)
    }

    /// Loads every booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings(&mut self) -> Result<Vec<Booking>, PersistenceError> {
        queries::bookings::list_bookings(&mut self.conn)
    }

    /// Finds the booking created for a request, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_booking_for_request(
        &mut self,
        request_id: i64,
    ) -> Result<Option<Booking>, PersistenceError> {
        queries::bookings::find_booking_for_request(&mut self.conn, request_id)
    }

    /// Loads the audit timeline of one entity, oldest event first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events(
        &mut self,
        entity_kind: EntityKind,
        entity_id: i64,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::list_events_for_entity(&mut self.conn, entity_kind, entity_id)
    }
}
