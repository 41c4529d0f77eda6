// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tour request row mutations.

use diesel::prelude::*;

use crate::data_models::{NewTourRequestRow, TourRequestChangeset};
use crate::diesel_schema::tour_requests;
use crate::error::PersistenceError;

/// Inserts a fresh request row and returns the assigned identifier.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_request(
    conn: &mut SqliteConnection,
    row: &NewTourRequestRow,
) -> Result<i64, PersistenceError> {
    let request_id: i64 = diesel::insert_into(tour_requests::table)
        .values(row)
        .returning(tour_requests::request_id)
        .get_result(conn)?;
    Ok(request_id)
}

/// Rewrites a request row unconditionally.
///
/// Used by soft cancellation, which is permitted from any status.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the row does not exist.
pub fn update_request_row(
    conn: &mut SqliteConnection,
    request_id: i64,
    changeset: &TourRequestChangeset,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        tour_requests::table.filter(tour_requests::request_id.eq(request_id)),
    )
    .set(changeset)
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("Request {request_id}")));
    }
    Ok(())
}

/// Rewrites a request row only while it still holds the expected status.
///
/// This is the compare-and-swap half of the concurrency contract: the
/// status precondition the caller validated in memory is re-asserted as
/// part of the write itself. Zero affected rows means a concurrent writer
/// got there first (or the row is gone), and the surrounding transaction
/// must roll back.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the guard matched no rows.
pub fn update_request_row_guarded(
    conn: &mut SqliteConnection,
    request_id: i64,
    changeset: &TourRequestChangeset,
    expected_status: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        tour_requests::table
            .filter(tour_requests::request_id.eq(request_id))
            .filter(tour_requests::status.eq(expected_status)),
    )
    .set(changeset)
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::Conflict(format!(
            "Request {request_id} is no longer '{expected_status}'"
        )));
    }
    Ok(())
}
