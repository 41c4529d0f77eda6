// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core entity types for the matching lifecycle.
//!
//! A `TourRequest` exclusively owns its `Application`s: an application is
//! never created, stored, or queried outside the scope of its parent
//! request identifier. A `Booking` is materialized exactly once per
//! accepted request by the acceptance transaction.

use time::{Date, OffsetDateTime};

use crate::application_status::ApplicationStatus;
use crate::booking_status::BookingStatus;
use crate::request_status::RequestStatus;

/// A tourist identity as resolved by the upstream identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouristProfile {
    /// The tourist's opaque user identifier.
    pub tourist_id: String,
    /// The tourist's display name, denormalized onto owned entities.
    pub tourist_name: String,
}

impl TouristProfile {
    /// Creates a new tourist profile.
    #[must_use]
    pub const fn new(tourist_id: String, tourist_name: String) -> Self {
        Self {
            tourist_id,
            tourist_name,
        }
    }
}

/// A guide identity as resolved by the upstream identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideProfile {
    /// The guide's opaque user identifier.
    pub guide_id: String,
    /// The guide's display name.
    pub guide_name: String,
    /// The guide's contact email, denormalized for accepted requests.
    pub guide_email: String,
}

impl GuideProfile {
    /// Creates a new guide profile.
    #[must_use]
    pub const fn new(guide_id: String, guide_name: String, guide_email: String) -> Self {
        Self {
            guide_id,
            guide_name,
            guide_email,
        }
    }
}

/// A tourist's posted trip brief.
#[derive(Debug, Clone, PartialEq)]
pub struct TourRequest {
    /// The canonical identifier assigned by the store.
    pub request_id: i64,
    /// Short human-readable trip title.
    pub title: String,
    /// Destination the tourist wants to visit.
    pub destination: String,
    /// First day of the trip.
    pub start_date: Date,
    /// Last day of the trip (inclusive). Never before `start_date`.
    pub end_date: Date,
    /// The tourist's budget. Always positive.
    pub budget: f64,
    /// Number of travellers. Always at least one.
    pub party_size: u32,
    /// Free-form tour type label (e.g., "cultural", "hiking").
    pub tour_type: String,
    /// Languages the tourist wants the guide to speak.
    pub languages: Vec<String>,
    /// Free-text trip description.
    pub description: String,
    /// Optional special requirements.
    pub requirements: Option<String>,
    /// The owning tourist's identifier.
    pub tourist_id: String,
    /// The owning tourist's display name.
    pub tourist_name: String,
    /// Advisory count of child applications. Eventually consistent;
    /// never trusted for invariant enforcement.
    pub application_count: u32,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Identifier of the winning application, set on acceptance.
    pub selected_application_id: Option<i64>,
    /// Identifier of the selected guide, set on acceptance.
    pub selected_guide_id: Option<String>,
    /// Display name of the selected guide, set on acceptance.
    pub selected_guide_name: Option<String>,
    /// Contact email of the selected guide, set on acceptance.
    pub selected_guide_email: Option<String>,
    /// The price agreed at acceptance time.
    pub agreed_price: Option<f64>,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Last update timestamp.
    pub updated_at: OffsetDateTime,
}

impl TourRequest {
    /// Returns true while the request accepts applications and edits.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// A tour request that has not yet been assigned an identifier.
///
/// Drafts exist between validation and the store insert that assigns the
/// canonical identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct TourRequestDraft {
    /// Short human-readable trip title.
    pub title: String,
    /// Destination the tourist wants to visit.
    pub destination: String,
    /// First day of the trip.
    pub start_date: Date,
    /// Last day of the trip (inclusive).
    pub end_date: Date,
    /// The tourist's budget.
    pub budget: f64,
    /// Number of travellers.
    pub party_size: u32,
    /// Free-form tour type label.
    pub tour_type: String,
    /// Languages the tourist wants the guide to speak.
    pub languages: Vec<String>,
    /// Free-text trip description.
    pub description: String,
    /// Optional special requirements.
    pub requirements: Option<String>,
    /// The owning tourist.
    pub tourist: TouristProfile,
    /// Lifecycle status. Always `Open` for a fresh draft.
    pub status: RequestStatus,
    /// Advisory count of child applications. Zero for a fresh draft.
    pub application_count: u32,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Last update timestamp.
    pub updated_at: OffsetDateTime,
}

/// A partial update to an open tour request.
///
/// Only the fields present are applied; everything else keeps its stored
/// value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestPatch {
    /// New title, if provided.
    pub title: Option<String>,
    /// New destination, if provided.
    pub destination: Option<String>,
    /// New start date, if provided.
    pub start_date: Option<Date>,
    /// New end date, if provided.
    pub end_date: Option<Date>,
    /// New budget, if provided.
    pub budget: Option<f64>,
    /// New party size, if provided.
    pub party_size: Option<u32>,
    /// New tour type, if provided.
    pub tour_type: Option<String>,
    /// New language list, if provided.
    pub languages: Option<Vec<String>>,
    /// New description, if provided.
    pub description: Option<String>,
    /// New requirements text, if provided.
    pub requirements: Option<String>,
}

impl RequestPatch {
    /// Returns true when the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.destination.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.budget.is_none()
            && self.party_size.is_none()
            && self.tour_type.is_none()
            && self.languages.is_none()
            && self.description.is_none()
            && self.requirements.is_none()
    }
}

/// One guide's bid on a specific request.
///
/// Stored strictly as a child of its request. The `(request_id, guide_id)`
/// pair is the natural key: resubmission by the same guide upserts rather
/// than duplicating.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    /// The canonical identifier assigned by the store. `None` until the
    /// application has been persisted for the first time.
    pub application_id: Option<i64>,
    /// The parent request's identifier.
    pub request_id: i64,
    /// The bidding guide's identifier.
    pub guide_id: String,
    /// The bidding guide's display name.
    pub guide_name: String,
    /// The bidding guide's contact email.
    pub guide_email: String,
    /// The guide's proposed price.
    pub proposed_price: f64,
    /// The guide's pitch. Never blank.
    pub cover_letter: String,
    /// Lifecycle status.
    pub status: ApplicationStatus,
    /// Denormalized parent title for guide-facing listings.
    pub request_title: String,
    /// Denormalized parent destination.
    pub request_destination: String,
    /// Denormalized parent start date.
    pub request_start_date: Date,
    /// Denormalized parent end date.
    pub request_end_date: Date,
    /// Denormalized parent tour type.
    pub request_tour_type: String,
    /// Denormalized owning tourist identifier.
    pub tourist_id: String,
    /// Denormalized owning tourist display name.
    pub tourist_name: String,
    /// The price agreed at acceptance time. Equals `proposed_price` on the
    /// selected application, `None` everywhere else.
    pub agreed_price: Option<f64>,
    /// Creation timestamp. Preserved across resubmissions.
    pub created_at: OffsetDateTime,
    /// Last update timestamp.
    pub updated_at: OffsetDateTime,
}

impl Application {
    /// Creates a fresh pending application against an open request,
    /// copying the parent projection the guide-facing listings read.
    #[must_use]
    pub fn new_pending(
        request: &TourRequest,
        guide: GuideProfile,
        proposed_price: f64,
        cover_letter: String,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            application_id: None,
            request_id: request.request_id,
            guide_id: guide.guide_id,
            guide_name: guide.guide_name,
            guide_email: guide.guide_email,
            proposed_price,
            cover_letter,
            status: ApplicationStatus::Pending,
            request_title: request.title.clone(),
            request_destination: request.destination.clone(),
            request_start_date: request.start_date,
            request_end_date: request.end_date,
            request_tour_type: request.tour_type.clone(),
            tourist_id: request.tourist_id.clone(),
            tourist_name: request.tourist_name.clone(),
            agreed_price: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true while the application is still competing.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

/// A partial update to a pending application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationPatch {
    /// New proposed price, if provided.
    pub proposed_price: Option<f64>,
    /// New cover letter, if provided.
    pub cover_letter: Option<String>,
}

impl ApplicationPatch {
    /// Returns true when the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.proposed_price.is_none() && self.cover_letter.is_none()
    }
}

/// The confirmed engagement created when an application is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// The canonical identifier assigned by the store.
    pub booking_id: i64,
    /// The originating request's identifier.
    pub request_id: i64,
    /// The tourist's identifier.
    pub tourist_id: String,
    /// The tourist's display name.
    pub tourist_name: String,
    /// The selected guide's identifier.
    pub guide_id: String,
    /// The selected guide's display name.
    pub guide_name: String,
    /// Denormalized trip title.
    pub title: String,
    /// Denormalized trip destination.
    pub destination: String,
    /// Denormalized trip start date.
    pub start_date: Date,
    /// Denormalized trip end date.
    pub end_date: Date,
    /// Denormalized tour type.
    pub tour_type: String,
    /// Denormalized party size.
    pub party_size: u32,
    /// The request's original budget, kept for reference.
    pub budget: f64,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// The price copied from the accepted application at the moment of
    /// acceptance. Never re-derived afterwards.
    pub agreed_price: f64,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Last update timestamp.
    pub updated_at: OffsetDateTime,
}

/// A booking that has not yet been assigned an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    /// The originating request's identifier.
    pub request_id: i64,
    /// The tourist's identifier.
    pub tourist_id: String,
    /// The tourist's display name.
    pub tourist_name: String,
    /// The selected guide's identifier.
    pub guide_id: String,
    /// The selected guide's display name.
    pub guide_name: String,
    /// Denormalized trip title.
    pub title: String,
    /// Denormalized trip destination.
    pub destination: String,
    /// Denormalized trip start date.
    pub start_date: Date,
    /// Denormalized trip end date.
    pub end_date: Date,
    /// Denormalized tour type.
    pub tour_type: String,
    /// Denormalized party size.
    pub party_size: u32,
    /// The request's original budget.
    pub budget: f64,
    /// Lifecycle status. Always `Pending` for a fresh draft.
    pub status: BookingStatus,
    /// The price agreed at acceptance time.
    pub agreed_price: f64,
    /// Creation timestamp.
    pub created_at: OffsetDateTime,
    /// Last update timestamp.
    pub updated_at: OffsetDateTime,
}

impl BookingDraft {
    /// Materializes the booking draft for an accepted application.
    ///
    /// The agreed price is copied from the application's proposal at this
    /// moment and is never re-derived later.
    #[must_use]
    pub fn from_acceptance(
        request: &TourRequest,
        application: &Application,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            request_id: request.request_id,
            tourist_id: request.tourist_id.clone(),
            tourist_name: request.tourist_name.clone(),
            guide_id: application.guide_id.clone(),
            guide_name: application.guide_name.clone(),
            title: request.title.clone(),
            destination: request.destination.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            tour_type: request.tour_type.clone(),
            party_size: request.party_size,
            budget: request.budget,
            status: BookingStatus::Pending,
            agreed_price: application.proposed_price,
            created_at: now,
            updated_at: now,
        }
    }
}
