// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! DTOs are distinct from domain types and represent the API contract.

use time::{Date, OffsetDateTime};
use tour_match_domain::{
    Application, ApplicationPatch, Booking, RequestPatch, TourRequest,
};

use crate::listing::Page;

/// API request to create a tour request.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateRequestRequest {
    /// Trip title.
    pub title: String,
    /// Trip destination.
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
    /// Languages the guide should speak.
    pub languages: Vec<String>,
    /// Free-text trip description.
    pub description: String,
    /// Optional special requirements.
    pub requirements: Option<String>,
    /// The caller's display name, denormalized onto owned entities.
    pub tourist_name: String,
}

/// API response for a successful request creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateRequestResponse {
    /// The identifier assigned to the new request.
    pub request_id: i64,
    /// The request's status (`open`).
    pub status: String,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// Tour request information for listings and read-backs.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RequestInfo {
    /// The request identifier.
    pub request_id: i64,
    /// Trip title.
    pub title: String,
    /// Trip destination.
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
    /// Languages the guide should speak.
    pub languages: Vec<String>,
    /// Free-text trip description.
    pub description: String,
    /// Optional special requirements.
    pub requirements: Option<String>,
    /// The owning tourist's identifier.
    pub tourist_id: String,
    /// The owning tourist's display name.
    pub tourist_name: String,
    /// Advisory count of child applications.
    pub application_count: u32,
    /// Lifecycle status.
    pub status: String,
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
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&TourRequest> for RequestInfo {
    fn from(request: &TourRequest) -> Self {
        Self {
            request_id: request.request_id,
            title: request.title.clone(),
            destination: request.destination.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            budget: request.budget,
            party_size: request.party_size,
            tour_type: request.tour_type.clone(),
            languages: request.languages.clone(),
            description: request.description.clone(),
            requirements: request.requirements.clone(),
            tourist_id: request.tourist_id.clone(),
            tourist_name: request.tourist_name.clone(),
            application_count: request.application_count,
            status: request.status.as_str().to_string(),
            selected_application_id: request.selected_application_id,
            selected_guide_id: request.selected_guide_id.clone(),
            selected_guide_name: request.selected_guide_name.clone(),
            selected_guide_email: request.selected_guide_email.clone(),
            agreed_price: request.agreed_price,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

/// API request to edit an open tour request. Only the provided fields are
/// applied.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpdateRequestRequest {
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

impl UpdateRequestRequest {
    /// Converts the DTO into the domain patch.
    #[must_use]
    pub fn to_patch(&self) -> RequestPatch {
        RequestPatch {
            title: self.title.clone(),
            destination: self.destination.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            budget: self.budget,
            party_size: self.party_size,
            tour_type: self.tour_type.clone(),
            languages: self.languages.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
        }
    }
}

/// API response for a successful request update.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpdateRequestResponse {
    /// The request after the update.
    pub request: RequestInfo,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// API response for a successful request cancellation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelRequestResponse {
    /// The cancelled request's identifier.
    pub request_id: i64,
    /// The request's status (`cancelled`).
    pub status: String,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// API request to submit (or resubmit) a guide application.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubmitApplicationRequest {
    /// The caller's display name.
    pub guide_name: String,
    /// The caller's contact email.
    pub guide_email: String,
    /// The proposed price.
    pub proposed_price: f64,
    /// The guide's pitch.
    pub cover_letter: String,
}

/// API response for a successful application submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitApplicationResponse {
    /// The application's identifier. Stable across resubmissions.
    pub application_id: i64,
    /// The parent request's identifier.
    pub request_id: i64,
    /// The application's status (`pending`).
    pub status: String,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// Application information for listings and read-backs.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApplicationInfo {
    /// The application identifier.
    pub application_id: i64,
    /// The parent request's identifier.
    pub request_id: i64,
    /// The bidding guide's identifier.
    pub guide_id: String,
    /// The bidding guide's display name.
    pub guide_name: String,
    /// The bidding guide's contact email.
    pub guide_email: String,
    /// The proposed price.
    pub proposed_price: f64,
    /// The guide's pitch.
    pub cover_letter: String,
    /// Lifecycle status.
    pub status: String,
    /// Denormalized parent title.
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
    /// The price agreed at acceptance time, on the selected application.
    pub agreed_price: Option<f64>,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl ApplicationInfo {
    /// Converts a persisted application into its DTO.
    ///
    /// Returns `None` for an application that has not been assigned an
    /// identifier yet; listings only ever see persisted rows.
    #[must_use]
    pub fn from_domain(application: &Application) -> Option<Self> {
        Some(Self {
            application_id: application.application_id?,
            request_id: application.request_id,
            guide_id: application.guide_id.clone(),
            guide_name: application.guide_name.clone(),
            guide_email: application.guide_email.clone(),
            proposed_price: application.proposed_price,
            cover_letter: application.cover_letter.clone(),
            status: application.status.as_str().to_string(),
            request_title: application.request_title.clone(),
            request_destination: application.request_destination.clone(),
            request_start_date: application.request_start_date,
            request_end_date: application.request_end_date,
            request_tour_type: application.request_tour_type.clone(),
            tourist_id: application.tourist_id.clone(),
            tourist_name: application.tourist_name.clone(),
            agreed_price: application.agreed_price,
            created_at: application.created_at,
            updated_at: application.updated_at,
        })
    }
}

/// API request to edit a pending application.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditApplicationRequest {
    /// New proposed price, if provided.
    pub proposed_price: Option<f64>,
    /// New cover letter, if provided.
    pub cover_letter: Option<String>,
}

impl EditApplicationRequest {
    /// Converts the DTO into the domain patch.
    #[must_use]
    pub fn to_patch(&self) -> ApplicationPatch {
        ApplicationPatch {
            proposed_price: self.proposed_price,
            cover_letter: self.cover_letter.clone(),
        }
    }
}

/// API response for a successful application edit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditApplicationResponse {
    /// The application after the edit.
    pub application: ApplicationInfo,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// API response for a successful acceptance.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AcceptApplicationResponse {
    /// The identifier of the booking the acceptance created.
    pub booking_id: i64,
    /// The resolved request's identifier.
    pub request_id: i64,
    /// The accepted application's identifier.
    pub application_id: i64,
    /// The price agreed at acceptance time.
    pub agreed_price: f64,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// Booking information for listings and read-backs.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BookingInfo {
    /// The booking identifier.
    pub booking_id: i64,
    /// The originating request's identifier.
    pub request_id: i64,
    /// The tourist's identifier.
    pub tourist_id: String,
    /// The tourist's display name.
    pub tourist_name: String,
    /// The guide's identifier.
    pub guide_id: String,
    /// The guide's display name.
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
    /// Lifecycle status.
    pub status: String,
    /// The price agreed at acceptance time.
    pub agreed_price: f64,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last update timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&Booking> for BookingInfo {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.booking_id,
            request_id: booking.request_id,
            tourist_id: booking.tourist_id.clone(),
            tourist_name: booking.tourist_name.clone(),
            guide_id: booking.guide_id.clone(),
            guide_name: booking.guide_name.clone(),
            title: booking.title.clone(),
            destination: booking.destination.clone(),
            start_date: booking.start_date,
            end_date: booking.end_date,
            tour_type: booking.tour_type.clone(),
            party_size: booking.party_size,
            budget: booking.budget,
            status: booking.status.as_str().to_string(),
            agreed_price: booking.agreed_price,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// API request carrying a guide's response to a pending booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GuideRespondBookingRequest {
    /// The decision: `upcoming` (confirm) or `cancelled` (decline).
    pub decision: String,
}

/// API response for a successful guide response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GuideRespondBookingResponse {
    /// The booking identifier.
    pub booking_id: i64,
    /// The booking's status after the response.
    pub status: String,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// API response for a successful tourist cancellation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TouristCancelBookingResponse {
    /// The booking identifier.
    pub booking_id: i64,
    /// The booking's status (`cancelled`).
    pub status: String,
    /// A success message.
    pub message: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
}

/// Pagination metadata reported alongside every listing page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageInfo {
    /// Total items across all pages.
    pub total_count: usize,
    /// The clamped 1-indexed page number.
    pub page: u32,
    /// The clamped page size.
    pub page_size: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_previous_page: bool,
}

impl PageInfo {
    pub(crate) fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            total_count: page.total_count,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            has_next_page: page.has_next_page,
            has_previous_page: page.has_previous_page,
        }
    }
}

/// API response for a request listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListRequestsResponse {
    /// The requests on this page.
    pub requests: Vec<RequestInfo>,
    /// Pagination metadata.
    pub pagination: PageInfo,
}

/// API response for an application listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListApplicationsResponse {
    /// The parent request's identifier.
    pub request_id: i64,
    /// The applications on this page.
    pub applications: Vec<ApplicationInfo>,
    /// Pagination metadata.
    pub pagination: PageInfo,
}

/// API response for a booking listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListBookingsResponse {
    /// The bookings on this page.
    pub bookings: Vec<BookingInfo>,
    /// Pagination metadata.
    pub pagination: PageInfo,
}
