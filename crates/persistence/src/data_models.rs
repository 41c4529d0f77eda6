// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row models and domain conversions.
//!
//! Rows mirror the table layouts exactly; conversions to and from the
//! domain types own all date, timestamp, status, and JSON encoding. Trip
//! dates are stored as `YYYY-MM-DD` text so range filters can compare
//! lexicographically; timestamps are RFC 3339 text.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tour_match_audit::{Action, Actor, AuditEvent, Cause, EntityKind, StateSnapshot};
use tour_match_domain::{
    Application, ApplicationStatus, Booking, BookingDraft, BookingStatus, RequestStatus,
    TourRequest, TourRequestDraft,
};

use crate::diesel_schema::{applications, audit_events, bookings, tour_requests};
use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a trip date as `YYYY-MM-DD` storage text.
pub(crate) fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("Failed to format date: {e}")))
}

/// Parses a trip date from its `YYYY-MM-DD` storage text.
pub(crate) fn parse_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, &DATE_FORMAT).map_err(|e| {
        PersistenceError::SerializationError(format!("Failed to parse date '{text}': {e}"))
    })
}

/// Formats a timestamp as RFC 3339 storage text.
pub(crate) fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, PersistenceError> {
    timestamp.format(&Rfc3339).map_err(|e| {
        PersistenceError::SerializationError(format!("Failed to format timestamp: {e}"))
    })
}

/// Parses a timestamp from its RFC 3339 storage text.
pub(crate) fn parse_timestamp(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(text, &Rfc3339).map_err(|e| {
        PersistenceError::SerializationError(format!("Failed to parse timestamp '{text}': {e}"))
    })
}

fn parse_party_size(value: i64) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| {
        PersistenceError::SerializationError(format!("Party size {value} out of range"))
    })
}

fn parse_count(value: i64) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| {
        PersistenceError::SerializationError(format!("Application count {value} out of range"))
    })
}

fn parse_languages(json: &str) -> Result<Vec<String>, PersistenceError> {
    serde_json::from_str(json).map_err(|e| {
        PersistenceError::SerializationError(format!("Failed to parse languages: {e}"))
    })
}

fn format_languages(languages: &[String]) -> Result<String, PersistenceError> {
    serde_json::to_string(languages).map_err(|e| {
        PersistenceError::SerializationError(format!("Failed to serialize languages: {e}"))
    })
}

fn parse_entity_kind(text: &str) -> Result<EntityKind, PersistenceError> {
    match text {
        "request" => Ok(EntityKind::Request),
        "booking" => Ok(EntityKind::Booking),
        other => Err(PersistenceError::SerializationError(format!(
            "Unknown audit entity kind '{other}'"
        ))),
    }
}

// ============================================================================
// Tour requests
// ============================================================================

/// A full `tour_requests` row.
#[derive(Debug, Clone, Queryable)]
pub struct TourRequestRow {
    pub request_id: i64,
    pub title: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub party_size: i64,
    pub tour_type: String,
    pub languages_json: String,
    pub description: String,
    pub requirements: Option<String>,
    pub tourist_id: String,
    pub tourist_name: String,
    pub application_count: i64,
    pub status: String,
    pub selected_application_id: Option<i64>,
    pub selected_guide_id: Option<String>,
    pub selected_guide_name: Option<String>,
    pub selected_guide_email: Option<String>,
    pub agreed_price: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl TourRequestRow {
    /// Converts the row into the domain type.
    pub(crate) fn into_domain(self) -> Result<TourRequest, PersistenceError> {
        Ok(TourRequest {
            request_id: self.request_id,
            title: self.title,
            destination: self.destination,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            budget: self.budget,
            party_size: parse_party_size(self.party_size)?,
            tour_type: self.tour_type,
            languages: parse_languages(&self.languages_json)?,
            description: self.description,
            requirements: self.requirements,
            tourist_id: self.tourist_id,
            tourist_name: self.tourist_name,
            application_count: parse_count(self.application_count)?,
            status: RequestStatus::from_str(&self.status)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            selected_application_id: self.selected_application_id,
            selected_guide_id: self.selected_guide_id,
            selected_guide_name: self.selected_guide_name,
            selected_guide_email: self.selected_guide_email,
            agreed_price: self.agreed_price,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// An insertable `tour_requests` row for a fresh draft.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tour_requests)]
pub struct NewTourRequestRow {
    pub title: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub party_size: i64,
    pub tour_type: String,
    pub languages_json: String,
    pub description: String,
    pub requirements: Option<String>,
    pub tourist_id: String,
    pub tourist_name: String,
    pub application_count: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl NewTourRequestRow {
    /// Builds an insertable row from a validated draft.
    pub(crate) fn from_draft(draft: &TourRequestDraft) -> Result<Self, PersistenceError> {
        Ok(Self {
            title: draft.title.clone(),
            destination: draft.destination.clone(),
            start_date: format_date(draft.start_date)?,
            end_date: format_date(draft.end_date)?,
            budget: draft.budget,
            party_size: i64::from(draft.party_size),
            tour_type: draft.tour_type.clone(),
            languages_json: format_languages(&draft.languages)?,
            description: draft.description.clone(),
            requirements: draft.requirements.clone(),
            tourist_id: draft.tourist.tourist_id.clone(),
            tourist_name: draft.tourist.tourist_name.clone(),
            application_count: i64::from(draft.application_count),
            status: draft.status.as_str().to_string(),
            created_at: format_timestamp(draft.created_at)?,
            updated_at: format_timestamp(draft.updated_at)?,
        })
    }
}

/// A full rewrite of a `tour_requests` row, minus identity and creation
/// timestamp.
///
/// `None` fields clear their columns: acceptance stamps are genuinely
/// nullable, not skippable.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tour_requests, treat_none_as_null = true)]
pub struct TourRequestChangeset {
    pub title: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub party_size: i64,
    pub tour_type: String,
    pub languages_json: String,
    pub description: String,
    pub requirements: Option<String>,
    pub application_count: i64,
    pub status: String,
    pub selected_application_id: Option<i64>,
    pub selected_guide_id: Option<String>,
    pub selected_guide_name: Option<String>,
    pub selected_guide_email: Option<String>,
    pub agreed_price: Option<f64>,
    pub updated_at: String,
}

impl TourRequestChangeset {
    /// Builds the rewrite changeset from the transitioned request.
    pub(crate) fn from_domain(request: &TourRequest) -> Result<Self, PersistenceError> {
        Ok(Self {
            title: request.title.clone(),
            destination: request.destination.clone(),
            start_date: format_date(request.start_date)?,
            end_date: format_date(request.end_date)?,
            budget: request.budget,
            party_size: i64::from(request.party_size),
            tour_type: request.tour_type.clone(),
            languages_json: format_languages(&request.languages)?,
            description: request.description.clone(),
            requirements: request.requirements.clone(),
            application_count: i64::from(request.application_count),
            status: request.status.as_str().to_string(),
            selected_application_id: request.selected_application_id,
            selected_guide_id: request.selected_guide_id.clone(),
            selected_guide_name: request.selected_guide_name.clone(),
            selected_guide_email: request.selected_guide_email.clone(),
            agreed_price: request.agreed_price,
            updated_at: format_timestamp(request.updated_at)?,
        })
    }
}

// ============================================================================
// Applications
// ============================================================================

/// A full `applications` row.
#[derive(Debug, Clone, Queryable)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub request_id: i64,
    pub guide_id: String,
    pub guide_name: String,
    pub guide_email: String,
    pub proposed_price: f64,
    pub cover_letter: String,
    pub status: String,
    pub request_title: String,
    pub request_destination: String,
    pub request_start_date: String,
    pub request_end_date: String,
    pub request_tour_type: String,
    pub tourist_id: String,
    pub tourist_name: String,
    pub agreed_price: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl ApplicationRow {
    /// Converts the row into the domain type.
    pub(crate) fn into_domain(self) -> Result<Application, PersistenceError> {
        Ok(Application {
            application_id: Some(self.application_id),
            request_id: self.request_id,
            guide_id: self.guide_id,
            guide_name: self.guide_name,
            guide_email: self.guide_email,
            proposed_price: self.proposed_price,
            cover_letter: self.cover_letter,
            status: ApplicationStatus::from_str(&self.status)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            request_title: self.request_title,
            request_destination: self.request_destination,
            request_start_date: parse_date(&self.request_start_date)?,
            request_end_date: parse_date(&self.request_end_date)?,
            request_tour_type: self.request_tour_type,
            tourist_id: self.tourist_id,
            tourist_name: self.tourist_name,
            agreed_price: self.agreed_price,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// An insertable `applications` row.
///
/// Used by the submission upsert: on first submission the whole row is
/// inserted, on resubmission the conflict target updates only the bid
/// fields and the update timestamp.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub struct NewApplicationRow {
    pub request_id: i64,
    pub guide_id: String,
    pub guide_name: String,
    pub guide_email: String,
    pub proposed_price: f64,
    pub cover_letter: String,
    pub status: String,
    pub request_title: String,
    pub request_destination: String,
    pub request_start_date: String,
    pub request_end_date: String,
    pub request_tour_type: String,
    pub tourist_id: String,
    pub tourist_name: String,
    pub agreed_price: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl NewApplicationRow {
    /// Builds an insertable row from the transitioned application.
    pub(crate) fn from_domain(application: &Application) -> Result<Self, PersistenceError> {
        Ok(Self {
            request_id: application.request_id,
            guide_id: application.guide_id.clone(),
            guide_name: application.guide_name.clone(),
            guide_email: application.guide_email.clone(),
            proposed_price: application.proposed_price,
            cover_letter: application.cover_letter.clone(),
            status: application.status.as_str().to_string(),
            request_title: application.request_title.clone(),
            request_destination: application.request_destination.clone(),
            request_start_date: format_date(application.request_start_date)?,
            request_end_date: format_date(application.request_end_date)?,
            request_tour_type: application.request_tour_type.clone(),
            tourist_id: application.tourist_id.clone(),
            tourist_name: application.tourist_name.clone(),
            agreed_price: application.agreed_price,
            created_at: format_timestamp(application.created_at)?,
            updated_at: format_timestamp(application.updated_at)?,
        })
    }
}

// ============================================================================
// Bookings
// ============================================================================

/// A full `bookings` row.
#[derive(Debug, Clone, Queryable)]
pub struct BookingRow {
    pub booking_id: i64,
    pub request_id: i64,
    pub tourist_id: String,
    pub tourist_name: String,
    pub guide_id: String,
    pub guide_name: String,
    pub title: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub tour_type: String,
    pub party_size: i64,
    pub budget: f64,
    pub status: String,
    pub agreed_price: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl BookingRow {
    /// Converts the row into the domain type.
    pub(crate) fn into_domain(self) -> Result<Booking, PersistenceError> {
        Ok(Booking {
            booking_id: self.booking_id,
            request_id: self.request_id,
            tourist_id: self.tourist_id,
            tourist_name: self.tourist_name,
            guide_id: self.guide_id,
            guide_name: self.guide_name,
            title: self.title,
            destination: self.destination,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            tour_type: self.tour_type,
            party_size: parse_party_size(self.party_size)?,
            budget: self.budget,
            status: BookingStatus::from_str(&self.status)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            agreed_price: self.agreed_price,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// An insertable `bookings` row for a fresh draft.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow {
    pub request_id: i64,
    pub tourist_id: String,
    pub tourist_name: String,
    pub guide_id: String,
    pub guide_name: String,
    pub title: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub tour_type: String,
    pub party_size: i64,
    pub budget: f64,
    pub status: String,
    pub agreed_price: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl NewBookingRow {
    /// Builds an insertable row from a booking draft.
    pub(crate) fn from_draft(draft: &BookingDraft) -> Result<Self, PersistenceError> {
        Ok(Self {
            request_id: draft.request_id,
            tourist_id: draft.tourist_id.clone(),
            tourist_name: draft.tourist_name.clone(),
            guide_id: draft.guide_id.clone(),
            guide_name: draft.guide_name.clone(),
            title: draft.title.clone(),
            destination: draft.destination.clone(),
            start_date: format_date(draft.start_date)?,
            end_date: format_date(draft.end_date)?,
            tour_type: draft.tour_type.clone(),
            party_size: i64::from(draft.party_size),
            budget: draft.budget,
            status: draft.status.as_str().to_string(),
            agreed_price: draft.agreed_price,
            created_at: format_timestamp(draft.created_at)?,
            updated_at: format_timestamp(draft.updated_at)?,
        })
    }
}

// ============================================================================
// Audit events
// ============================================================================

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// A full `audit_events` row.
#[derive(Debug, Clone, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub entity_kind: String,
    pub entity_id: i64,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: Option<String>,
}

impl AuditEventRow {
    /// Converts the row back into an audit event.
    pub(crate) fn into_domain(self) -> Result<AuditEvent, PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let action: ActionData = serde_json::from_str(&self.action_json)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let before: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let after: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        let mut event: AuditEvent = AuditEvent::new(
            Actor::new(actor.id, actor.actor_type),
            Cause::new(cause.id, cause.description),
            Action::new(action.name, action.details),
            StateSnapshot::new(before.data),
            StateSnapshot::new(after.data),
            parse_entity_kind(&self.entity_kind)?,
            self.entity_id,
        );
        event.event_id = Some(self.event_id);
        Ok(event)
    }
}

/// An insertable `audit_events` row. The store stamps `created_at`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEventRow {
    pub entity_kind: String,
    pub entity_id: i64,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
}

impl NewAuditEventRow {
    /// Builds an insertable row from an audit event.
    ///
    /// `entity_id` overrides the event's own scope identifier; creation
    /// events carry a placeholder until the insert has assigned one.
    pub(crate) fn from_event(
        event: &AuditEvent,
        entity_id: i64,
    ) -> Result<Self, PersistenceError> {
        let actor_json: String = serde_json::to_string(&ActorData {
            id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
        })
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let cause_json: String = serde_json::to_string(&CauseData {
            id: event.cause.id.clone(),
            description: event.cause.description.clone(),
        })
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let action_json: String = serde_json::to_string(&ActionData {
            name: event.action.name.clone(),
            details: event.action.details.clone(),
        })
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let before_snapshot_json: String = serde_json::to_string(&StateSnapshotData {
            data: event.before.data.clone(),
        })
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let after_snapshot_json: String = serde_json::to_string(&StateSnapshotData {
            data: event.after.data.clone(),
        })
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        Ok(Self {
            entity_kind: event.entity_kind.as_str().to_string(),
            entity_id,
            actor_json,
            cause_json,
            action_json,
            before_snapshot_json,
            after_snapshot_json,
        })
    }
}
