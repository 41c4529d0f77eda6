// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application queries, always scoped to a parent request.

use diesel::prelude::*;
use tour_match_domain::Application;

use crate::data_models::ApplicationRow;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;

/// Loads every application owned by a request, in creation order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_applications_for_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Vec<Application>, PersistenceError> {
    let rows: Vec<ApplicationRow> = applications::table
        .filter(applications::request_id.eq(request_id))
        .order(applications::application_id.asc())
        .load::<ApplicationRow>(conn)?;
    rows.into_iter().map(ApplicationRow::into_domain).collect()
}

/// Finds the identifier of a guide's application on a request.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the guide has no application
/// on the request.
pub fn find_application_id(
    conn: &mut SqliteConnection,
    request_id: i64,
    guide_id: &str,
) -> Result<i64, PersistenceError> {
    applications::table
        .filter(applications::request_id.eq(request_id))
        .filter(applications::guide_id.eq(guide_id))
        .select(applications::application_id)
        .first::<i64>(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::NotFound(format!(
                "Application of guide '{guide_id}' on request {request_id}"
            ))
        })
}
