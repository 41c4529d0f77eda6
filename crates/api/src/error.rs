// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use tour_match::CoreError;
use tour_match_domain::DomainError;
use tour_match_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract: callers receive a stable error kind plus a human-readable
/// message, and internal store details are never leaked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The caller is not the owning actor of the targeted entity.
    Forbidden {
        /// A human-readable description of the ownership violation.
        message: String,
    },
    /// The operation is not legal for the entity's current lifecycle
    /// state.
    InvalidState {
        /// A human-readable description of the violation.
        message: String,
    },
    /// A business rule rejected the operation.
    PolicyViolation {
        /// A human-readable description of the violated policy.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The stable error kind exposed to callers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Forbidden { .. } => "forbidden",
            Self::InvalidState { .. } => "invalid_state",
            Self::PolicyViolation { .. } => "policy_violation",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Forbidden { message } => write!(f, "Forbidden: {message}"),
            Self::InvalidState { message } => write!(f, "Invalid state: {message}"),
            Self::PolicyViolation { message } => {
                write!(f, "Policy violation: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidDestination(msg) => ApiError::InvalidInput {
            field: String::from("destination"),
            message: msg,
        },
        DomainError::InvalidTripDates {
            start_date,
            end_date,
        } => ApiError::InvalidInput {
            field: String::from("start_date"),
            message: format!(
                "Trip start date {start_date} must not be after end date {end_date}"
            ),
        },
        DomainError::InvalidBudget { budget } => ApiError::InvalidInput {
            field: String::from("budget"),
            message: format!("Invalid budget: {budget}. Must be greater than 0"),
        },
        DomainError::InvalidPartySize { party_size } => ApiError::InvalidInput {
            field: String::from("party_size"),
            message: format!("Invalid party size: {party_size}. Must be at least 1 person"),
        },
        DomainError::InvalidProposedPrice { price } => ApiError::InvalidInput {
            field: String::from("proposed_price"),
            message: format!("Invalid proposed price: {price}"),
        },
        DomainError::InvalidCoverLetter(msg) => ApiError::InvalidInput {
            field: String::from("cover_letter"),
            message: msg,
        },
        DomainError::InvalidRequestStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid request status: '{status}'"),
        },
        DomainError::InvalidApplicationStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid application status: '{status}'"),
        },
        DomainError::InvalidBookingStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid booking status: '{status}'"),
        },
        DomainError::InvalidBookingDecision { decision } => ApiError::InvalidInput {
            field: String::from("decision"),
            message: format!(
                "Invalid booking decision: '{decision}'. Must be 'upcoming' or 'cancelled'"
            ),
        },
        DomainError::InvalidStatusTransition {
            entity,
            from,
            to,
            reason,
        } => ApiError::InvalidState {
            message: format!(
                "Invalid {entity} status transition from '{from}' to '{to}': {reason}"
            ),
        },
        DomainError::RequestNotOpen { request_id, status } => ApiError::InvalidState {
            message: format!("Request {request_id} is not open (current status: {status})"),
        },
        DomainError::ApplicationNotPending {
            application_id,
            status,
        } => ApiError::InvalidState {
            message: format!(
                "Application {application_id} is not pending (current status: {status})"
            ),
        },
        DomainError::ApplicationNotFound {
            request_id,
            application_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Application"),
            message: format!(
                "Application {application_id} does not exist under request {request_id}"
            ),
        },
        DomainError::NotApplicationOwner {
            application_id,
            guide_id,
        } => ApiError::Forbidden {
            message: format!("Guide '{guide_id}' does not own application {application_id}"),
        },
        DomainError::NotBookingTourist {
            booking_id,
            tourist_id,
        } => ApiError::Forbidden {
            message: format!("Tourist '{tourist_id}' does not own booking {booking_id}"),
        },
        DomainError::BookingNotPending { booking_id, status } => ApiError::InvalidState {
            message: format!(
                "Booking {booking_id} is not awaiting a guide response (current status: {status})"
            ),
        },
        DomainError::BookingAlreadyClosed { booking_id, status } => ApiError::InvalidState {
            message: format!("Booking {booking_id} is already {status} and cannot be cancelled"),
        },
        DomainError::CancellationWindowClosed {
            start_date,
            hours_of_notice,
        } => ApiError::PolicyViolation {
            message: format!(
                "Bookings starting {start_date} can no longer be cancelled: {hours_of_notice} hours of notice given, at least 24 required"
            ),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Row-level absences surface as not-found, a lost status race surfaces
/// as an invalid state (the entity moved on before the commit), and
/// everything else collapses into an internal error so store details do
/// not leak.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(what) => ApiError::ResourceNotFound {
            resource_type: what.clone(),
            message: format!("{what} does not exist"),
        },
        PersistenceError::Conflict(msg) => ApiError::InvalidState { message: msg },
        other => ApiError::Internal {
            message: format!("Storage failure: {other}"),
        },
    }
}
