// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail queries.

use diesel::prelude::*;
use tour_match_audit::{AuditEvent, EntityKind};

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Loads the audit timeline of one entity, oldest event first.
///
/// # Errors
///
/// Returns an error if the query or row decoding fails.
pub fn list_events_for_entity(
    conn: &mut SqliteConnection,
    entity_kind: EntityKind,
    entity_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::entity_kind.eq(entity_kind.as_str()))
        .filter(audit_events::entity_id.eq(entity_id))
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)?;
    rows.into_iter().map(AuditEventRow::into_domain).collect()
}
