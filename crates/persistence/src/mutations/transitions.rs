// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! High-level transition orchestration.
//!
//! Each function commits one transition result inside a single immediate
//! transaction: the entity writes, the booking insert where an acceptance
//! produced one, and the audit event all land atomically or not at all.
//! Guarded mutations re-assert the status preconditions the engine
//! validated in memory, so racing writers serialize on the write
//! transaction and the loser rolls back with a conflict.

use diesel::prelude::*;
use tour_match::{
    BookingTransitionResult, CreateResult, TransitionKind, TransitionResult,
};
use tour_match_domain::{Application, RequestStatus};
use tracing::{debug, info};

use crate::data_models::{
    NewApplicationRow, NewBookingRow, NewTourRequestRow, TourRequestChangeset, format_timestamp,
};
use crate::error::PersistenceError;
use crate::mutations::applications::{
    reject_siblings, select_application_guarded, update_application_guarded, upsert_application,
};
use crate::mutations::audit::persist_audit_event;
use crate::mutations::bookings::{insert_booking, update_booking_status_guarded};
use crate::mutations::requests::{
    insert_request, update_request_row, update_request_row_guarded,
};

/// The identifiers assigned while persisting a request creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistCreateResult {
    /// The identifier assigned to the new request.
    pub request_id: i64,
    /// The identifier assigned to the audit event.
    pub event_id: i64,
}

/// The identifiers assigned while persisting a request-scoped transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The identifier assigned to the audit event.
    pub event_id: i64,
    /// The identifier assigned to the booking an acceptance created.
    pub booking_id: Option<i64>,
}

/// Persists a request creation: the request row plus its audit event.
///
/// # Errors
///
/// Returns an error if any write fails; nothing is committed in that case.
pub fn persist_create(
    conn: &mut SqliteConnection,
    result: &CreateResult,
) -> Result<PersistCreateResult, PersistenceError> {
    let row: NewTourRequestRow = NewTourRequestRow::from_draft(&result.draft)?;

    let persisted: PersistCreateResult = conn.immediate_transaction(|conn| {
        let request_id: i64 = insert_request(conn, &row)?;
        let event_id: i64 = persist_audit_event(conn, &result.audit_event, request_id)?;
        Ok::<PersistCreateResult, PersistenceError>(PersistCreateResult {
            request_id,
            event_id,
        })
    })?;

    info!(
        request_id = persisted.request_id,
        event_id = persisted.event_id,
        "Persisted request creation"
    );
    Ok(persisted)
}

/// Persists a request-scoped transition.
///
/// The write set is selected by the transition kind; the engine decides
/// what changed, this function decides how the change is guarded and
/// committed.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` when a guarded write observes that
/// a concurrent writer already changed the entity's status; nothing is
/// committed in that case. Any other error likewise rolls the whole
/// transaction back.
#[allow(clippy::too_many_lines)]
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    let request_id: i64 = result.new_state.request.request_id;
    let changeset: TourRequestChangeset =
        TourRequestChangeset::from_domain(&result.new_state.request)?;

    let persisted: PersistTransitionResult = conn.immediate_transaction(|conn| {
        let booking_id: Option<i64> = match &result.kind {
            TransitionKind::UpdateRequest => {
                // The edit was validated against an open request; the
                // guard re-asserts openness at write time.
                update_request_row_guarded(
                    conn,
                    request_id,
                    &changeset,
                    RequestStatus::Open.as_str(),
                )?;
                None
            }
            TransitionKind::CancelRequest => {
                // Soft cancel is permitted from any status.
                update_request_row(conn, request_id, &changeset)?;
                None
            }
            TransitionKind::SubmitApplication { guide_id } => {
                update_request_row_guarded(
                    conn,
                    request_id,
                    &changeset,
                    RequestStatus::Open.as_str(),
                )?;

                let application: &Application = result
                    .new_state
                    .find_application_by_guide(guide_id)
                    .ok_or_else(|| {
                        PersistenceError::Other(format!(
                            "Transition result lost application for guide '{guide_id}'"
                        ))
                    })?;
                let row: NewApplicationRow = NewApplicationRow::from_domain(application)?;
                upsert_application(conn, &row)?;
                debug!(request_id, guide_id = %guide_id, "Upserted application");
                None
            }
            TransitionKind::EditApplication { application_id } => {
                let application: &Application = result
                    .new_state
                    .find_application(*application_id)
                    .ok_or_else(|| {
                        PersistenceError::Other(format!(
                            "Transition result lost application {application_id}"
                        ))
                    })?;
                let updated_at: String = format_timestamp(application.updated_at)?;
                update_application_guarded(
                    conn,
                    *application_id,
                    application.proposed_price,
                    &application.cover_letter,
                    &updated_at,
                )?;
                None
            }
            TransitionKind::AcceptApplication { application_id } => {
                let selected: &Application = result
                    .new_state
                    .find_application(*application_id)
                    .ok_or_else(|| {
                        PersistenceError::Other(format!(
                            "Transition result lost application {application_id}"
                        ))
                    })?;
                let agreed_price: f64 = selected.agreed_price.ok_or_else(|| {
                    PersistenceError::Other(format!(
                        "Selected application {application_id} carries no agreed price"
                    ))
                })?;
                let updated_at: String = format_timestamp(selected.updated_at)?;

                // The acceptance batch. Both guards must hold at write
                // time; of two racing acceptance attempts exactly one
                // commits.
                update_request_row_guarded(
                    conn,
                    request_id,
                    &changeset,
                    RequestStatus::Open.as_str(),
                )?;
                select_application_guarded(conn, *application_id, agreed_price, &updated_at)?;
                let rejected: usize =
                    reject_siblings(conn, request_id, *application_id, &updated_at)?;
                debug!(
                    request_id,
                    application_id = *application_id,
                    rejected,
                    "Resolved applications"
                );

                let draft = result.booking_draft.as_ref().ok_or_else(|| {
                    PersistenceError::Other(String::from(
                        "Acceptance transition carries no booking draft",
                    ))
                })?;
                let booking_row: NewBookingRow = NewBookingRow::from_draft(draft)?;
                Some(insert_booking(conn, &booking_row)?)
            }
        };

        let event_id: i64 = persist_audit_event(conn, &result.audit_event, request_id)?;
        Ok::<PersistTransitionResult, PersistenceError>(PersistTransitionResult {
            event_id,
            booking_id,
        })
    })?;

    info!(
        request_id,
        event_id = persisted.event_id,
        action = %result.audit_event.action.name,
        "Persisted transition"
    );
    Ok(persisted)
}

/// Persists a booking-scoped transition: the guarded status update plus
/// its audit event.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` when the booking no longer holds
/// the status the caller observed; nothing is committed in that case.
pub fn persist_booking_transition(
    conn: &mut SqliteConnection,
    result: &BookingTransitionResult,
) -> Result<i64, PersistenceError> {
    let booking_id: i64 = result.new_booking.booking_id;
    let updated_at: String = format_timestamp(result.new_booking.updated_at)?;

    let event_id: i64 = conn.immediate_transaction(|conn| {
        update_booking_status_guarded(
            conn,
            booking_id,
            result.new_booking.status.as_str(),
            &updated_at,
            result.previous_status.as_str(),
        )?;
        persist_audit_event(conn, &result.audit_event, booking_id)
    })?;

    info!(
        booking_id,
        event_id,
        action = %result.audit_event.action.name,
        "Persisted booking transition"
    );
    Ok(event_id)
}
