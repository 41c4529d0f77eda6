// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::prelude::*;
use tour_match_audit::AuditEvent;

use crate::data_models::NewAuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event scoped to the given entity identifier and
/// returns the assigned event identifier.
///
/// The explicit `entity_id` lets creation flows stamp the identifier the
/// insert just assigned, which the event itself could not know yet.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    entity_id: i64,
) -> Result<i64, PersistenceError> {
    let row: NewAuditEventRow = NewAuditEventRow::from_event(event, entity_id)?;
    let event_id: i64 = diesel::insert_into(audit_events::table)
        .values(&row)
        .returning(audit_events::event_id)
        .get_result(conn)?;
    Ok(event_id)
}
