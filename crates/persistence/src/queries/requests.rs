// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tour request queries.

use diesel::prelude::*;
use tour_match_domain::TourRequest;

use crate::data_models::TourRequestRow;
use crate::diesel_schema::tour_requests;
use crate::error::PersistenceError;

/// Loads a single request by identifier.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the request does not exist.
pub fn get_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<TourRequest, PersistenceError> {
    let row: TourRequestRow = tour_requests::table
        .find(request_id)
        .first::<TourRequestRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Request {request_id}")))?;
    row.into_domain()
}

/// Loads every request, oldest first.
///
/// Listing search, filtering, sorting, and pagination run in memory on
/// top of this.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_requests(conn: &mut SqliteConnection) -> Result<Vec<TourRequest>, PersistenceError> {
    let rows: Vec<TourRequestRow> = tour_requests::table
        .order(tour_requests::request_id.asc())
        .load::<TourRequestRow>(conn)?;
    rows.into_iter().map(TourRequestRow::into_domain).collect()
}
