// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::application_status::ApplicationStatus;
use crate::booking_status::BookingStatus;
use crate::request_status::RequestStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Request title is empty or invalid.
    InvalidTitle(String),
    /// Destination is empty or invalid.
    InvalidDestination(String),
    /// Trip start date is after the end date.
    InvalidTripDates {
        /// The requested start date.
        start_date: time::Date,
        /// The requested end date.
        end_date: time::Date,
    },
    /// Budget must be a positive amount.
    InvalidBudget {
        /// The rejected budget value.
        budget: f64,
    },
    /// Party size must be at least one person.
    InvalidPartySize {
        /// The rejected party size.
        party_size: u32,
    },
    /// Proposed price is out of range.
    InvalidProposedPrice {
        /// The rejected price value.
        price: f64,
    },
    /// Cover letter is blank or invalid.
    InvalidCoverLetter(String),
    /// Request status string is not recognized.
    InvalidRequestStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Application status string is not recognized.
    InvalidApplicationStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Booking status string is not recognized.
    InvalidBookingStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Booking decision string is not recognized.
    InvalidBookingDecision {
        /// The unrecognized decision string.
        decision: String,
    },
    /// A status transition is not permitted by lifecycle rules.
    InvalidStatusTransition {
        /// The entity kind the transition was attempted on.
        entity: &'static str,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is rejected.
        reason: String,
    },
    /// The operation requires the request to be open.
    RequestNotOpen {
        /// The request identifier.
        request_id: i64,
        /// The request's current status.
        status: RequestStatus,
    },
    /// The operation requires the application to be pending.
    ApplicationNotPending {
        /// The application identifier.
        application_id: i64,
        /// The application's current status.
        status: ApplicationStatus,
    },
    /// The application does not exist under the given request.
    ApplicationNotFound {
        /// The parent request identifier.
        request_id: i64,
        /// The missing application identifier.
        application_id: i64,
    },
    /// The caller is not the guide who owns the application.
    NotApplicationOwner {
        /// The application identifier.
        application_id: i64,
        /// The caller's guide identifier.
        guide_id: String,
    },
    /// The caller is not the tourist who owns the booking.
    NotBookingTourist {
        /// The booking identifier.
        booking_id: i64,
        /// The caller's tourist identifier.
        tourist_id: String,
    },
    /// The guide may only respond while the booking is pending.
    BookingNotPending {
        /// The booking identifier.
        booking_id: i64,
        /// The booking's current status.
        status: BookingStatus,
    },
    /// The booking is already cancelled or completed.
    BookingAlreadyClosed {
        /// The booking identifier.
        booking_id: i64,
        /// The booking's current status.
        status: BookingStatus,
    },
    /// Tourist cancellation requires at least 24 hours of notice.
    CancellationWindowClosed {
        /// The trip start date.
        start_date: time::Date,
        /// Whole hours of notice the caller actually has.
        hours_of_notice: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidDestination(msg) => write!(f, "Invalid destination: {msg}"),
            Self::InvalidTripDates {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Trip start date {start_date} must not be after end date {end_date}"
                )
            }
            Self::InvalidBudget { budget } => {
                write!(f, "Invalid budget: {budget}. Must be greater than 0")
            }
            Self::InvalidPartySize { party_size } => {
                write!(
                    f,
                    "Invalid party size: {party_size}. Must be at least 1 person"
                )
            }
            Self::InvalidProposedPrice { price } => {
                write!(f, "Invalid proposed price: {price}")
            }
            Self::InvalidCoverLetter(msg) => write!(f, "Invalid cover letter: {msg}"),
            Self::InvalidRequestStatus { status } => {
                write!(f, "Invalid request status: '{status}'")
            }
            Self::InvalidApplicationStatus { status } => {
                write!(f, "Invalid application status: '{status}'")
            }
            Self::InvalidBookingStatus { status } => {
                write!(f, "Invalid booking status: '{status}'")
            }
            Self::InvalidBookingDecision { decision } => {
                write!(
                    f,
                    "Invalid booking decision: '{decision}'. Must be 'upcoming' or 'cancelled'"
                )
            }
            Self::InvalidStatusTransition {
                entity,
                from,
                to,
                reason,
            } => {
                write!(
                    f,
                    "Invalid {entity} status transition from '{from}' to '{to}': {reason}"
                )
            }
            Self::RequestNotOpen { request_id, status } => {
                write!(
                    f,
                    "Request {request_id} is not open (current status: {status})"
                )
            }
            Self::ApplicationNotPending {
                application_id,
                status,
            } => {
                write!(
                    f,
                    "Application {application_id} is not pending (current status: {status})"
                )
            }
            Self::ApplicationNotFound {
                request_id,
                application_id,
            } => {
                write!(
                    f,
                    "Application {application_id} not found under request {request_id}"
                )
            }
            Self::NotApplicationOwner {
                application_id,
                guide_id,
            } => {
                write!(
                    f,
                    "Guide '{guide_id}' does not own application {application_id}"
                )
            }
            Self::NotBookingTourist {
                booking_id,
                tourist_id,
            } => {
                write!(
                    f,
                    "Tourist '{tourist_id}' does not own booking {booking_id}"
                )
            }
            Self::BookingNotPending { booking_id, status } => {
                write!(
                    f,
                    "Booking {booking_id} is not awaiting a guide response (current status: {status})"
                )
            }
            Self::BookingAlreadyClosed { booking_id, status } => {
                write!(
                    f,
                    "Booking {booking_id} is already {status} and cannot be cancelled"
                )
            }
            Self::CancellationWindowClosed {
                start_date,
                hours_of_notice,
            } => {
                write!(
                    f,
                    "Bookings starting {start_date} can no longer be cancelled: {hours_of_notice} hours of notice given, at least 24 required"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
