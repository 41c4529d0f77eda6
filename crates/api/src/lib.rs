// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod listing;
mod request_response;

#[cfg(test)]
mod tests;

use std::str::FromStr;

use thiserror::Error;
use tour_match_audit::Actor;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    accept_application, cancel_request, create_request, edit_application, guide_respond_booking,
    list_applications, list_bookings, list_requests, submit_application, tourist_cancel_booking,
    update_request,
};
pub use listing::{
    ApplicationListParams, ApplicationSortKey, BookingListParams, BookingSortKey,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageParams, RequestListParams, RequestSortKey,
    SortDirection, paginate,
};
pub use request_response::{
    AcceptApplicationResponse, ApplicationInfo, BookingInfo, CancelRequestResponse,
    CreateRequestRequest, CreateRequestResponse, EditApplicationRequest, EditApplicationResponse,
    GuideRespondBookingRequest, GuideRespondBookingResponse, ListApplicationsResponse,
    ListBookingsResponse, ListRequestsResponse, PageInfo, RequestInfo, SubmitApplicationRequest,
    SubmitApplicationResponse, TouristCancelBookingResponse, UpdateRequestRequest,
    UpdateRequestResponse,
};

/// Actor roles at the API boundary.
///
/// Identity is resolved upstream; the role only attributes actions to the
/// marketplace side performing them. Ownership checks inside the engine
/// compare identifiers, not roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A tourist: posts requests, accepts applications, cancels bookings.
    Tourist,
    /// A guide: applies to requests and responds to bookings.
    Guide,
}

impl Role {
    /// Returns the string representation used for audit attribution.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tourist => "tourist",
            Self::Guide => "guide",
        }
    }
}

/// Error returned when an actor role string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid actor role '{0}'. Must be 'tourist' or 'guide'")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tourist" => Ok(Self::Tourist),
            "guide" => Ok(Self::Guide),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// An authenticated actor with an associated role.
///
/// The caller's identity has already been resolved to a user id by the
/// identity collaborator before reaching the core; this type only carries
/// that resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions to
    /// the caller.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }
}

/// Resolves an upstream identity into an authenticated actor.
///
/// Real authentication lives outside this system; this boundary only
/// refuses obviously unusable identities.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor, resolved upstream
/// * `role` - The role to assign to the actor
///
/// # Errors
///
/// Returns an error if the identifier is empty.
pub fn resolve_actor(actor_id: String, role: Role) -> Result<AuthenticatedActor, ApiError> {
    if actor_id.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("actor_id"),
            message: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}
