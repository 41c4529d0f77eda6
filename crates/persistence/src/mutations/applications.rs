// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application row mutations.
//!
//! Submission is an upsert keyed by `(request_id, guide_id)`: a guide's
//! first submission inserts the row, a resubmission overwrites the bid
//! fields while the creation timestamp and status survive untouched.

use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::data_models::NewApplicationRow;
use crate::diesel_schema::applications;
use crate::error::PersistenceError;

/// Upserts an application row by its natural key.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert_application(
    conn: &mut SqliteConnection,
    row: &NewApplicationRow,
) -> Result<(), PersistenceError> {
    diesel::insert_into(applications::table)
        .values(row)
        .on_conflict((applications::request_id, applications::guide_id))
        .do_update()
        .set((
            applications::proposed_price.eq(excluded(applications::proposed_price)),
            applications::cover_letter.eq(excluded(applications::cover_letter)),
            applications::updated_at.eq(excluded(applications::updated_at)),
        ))
        .execute(conn)?;
    Ok(())
}

/// Updates a pending application's bid fields.
///
/// Guarded on the row still being pending; an edit racing a resolution
/// loses and the surrounding transaction rolls back.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the guard matched no rows.
pub fn update_application_guarded(
    conn: &mut SqliteConnection,
    application_id: i64,
    proposed_price: f64,
    cover_letter: &str,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        applications::table
            .filter(applications::application_id.eq(application_id))
            .filter(applications::status.eq("pending")),
    )
    .set((
        applications::proposed_price.eq(proposed_price),
        applications::cover_letter.eq(cover_letter),
        applications::updated_at.eq(updated_at),
    ))
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::Conflict(format!(
            "Application {application_id} is no longer pending"
        )));
    }
    Ok(())
}

/// Marks the accepted application selected and stamps its agreed price.
///
/// Guarded on the row still being pending. This is the second half of the
/// acceptance compare-and-swap: of two racing acceptance attempts, only
/// one can observe the pending status at write time.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the guard matched no rows.
pub fn select_application_guarded(
    conn: &mut SqliteConnection,
    application_id: i64,
    agreed_price: f64,
    updated_at: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        applications::table
            .filter(applications::application_id.eq(application_id))
            .filter(applications::status.eq("pending")),
    )
    .set((
        applications::status.eq("selected"),
        applications::agreed_price.eq(agreed_price),
        applications::updated_at.eq(updated_at),
    ))
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::Conflict(format!(
            "Application {application_id} is no longer pending"
        )));
    }
    Ok(())
}

/// Rejects every sibling of the selected application.
///
/// Unguarded: sibling rows are rewritten whatever their status, so the
/// resolved request ends with exactly one selected child and the rest
/// rejected.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn reject_siblings(
    conn: &mut SqliteConnection,
    request_id: i64,
    selected_application_id: i64,
    updated_at: &str,
) -> Result<usize, PersistenceError> {
    let affected: usize = diesel::update(
        applications::table
            .filter(applications::request_id.eq(request_id))
            .filter(applications::application_id.ne(selected_application_id)),
    )
    .set((
        applications::status.eq("rejected"),
        applications::updated_at.eq(updated_at),
    ))
    .execute(conn)?;
    Ok(affected)
}
