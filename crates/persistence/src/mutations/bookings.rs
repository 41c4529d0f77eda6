// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking row mutations.

use diesel::prelude::*;

use crate::data_models::NewBookingRow;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

/// Inserts a fresh booking row and returns the assigned identifier.
///
/// The table carries a unique constraint on `request_id`, so a second
/// booking for the same request is rejected by the store itself.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    row: &NewBookingRow,
) -> Result<i64, PersistenceError> {
    let booking_id: i64 = diesel::insert_into(bookings::table)
        .values(row)
        .returning(bookings::booking_id)
        .get_result(conn)?;
    Ok(booking_id)
}

/// Transitions a booking's status while it still holds the expected one.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the guard matched no rows.
pub fn update_booking_status_guarded(
    conn: &mut SqliteConnection,
    booking_id: i64,
    new_status: &str,
    updated_at: &str,
    expected_status: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        bookings::table
            .filter(bookings::booking_id.eq(booking_id))
            .filter(bookings::status.eq(expected_status)),
    )
    .set((
        bookings::status.eq(new_status),
        bookings::updated_at.eq(updated_at),
    ))
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::Conflict(format!(
            "Booking {booking_id} is no longer '{expected_status}'"
        )));
    }
    Ok(())
}
