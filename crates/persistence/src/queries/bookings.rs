// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.

use diesel::prelude::*;
use tour_match_domain::Booking;

use crate::data_models::BookingRow;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

/// Loads a single booking by identifier.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the booking does not exist.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Booking, PersistenceError> {
    let row: BookingRow = bookings::table
        .find(booking_id)
        .first::<BookingRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Booking {booking_id}")))?;
    row.into_domain()
}

/// Loads every booking, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_bookings(conn: &mut SqliteConnection) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .order(bookings::booking_id.asc())
        .load::<BookingRow>(conn)?;
    rows.into_iter().map(BookingRow::into_domain).collect()
}

/// Finds the booking created for a request, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_booking_for_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    let row: Option<BookingRow> = bookings::table
        .filter(bookings::request_id.eq(request_id))
        .first::<BookingRow>(conn)
        .optional()?;
    row.map(BookingRow::into_domain).transpose()
}
