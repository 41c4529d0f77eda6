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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod application_status;
mod booking_status;
mod cancellation;
mod error;
mod request_status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use application_status::ApplicationStatus;
pub use booking_status::{BookingDecision, BookingStatus};
pub use cancellation::{
    MIN_CANCELLATION_NOTICE, trip_start_moment, validate_cancellation_notice,
};
pub use error::DomainError;
pub use request_status::RequestStatus;
pub use types::{
    Application, ApplicationPatch, Booking, BookingDraft, GuideProfile, RequestPatch,
    TourRequest, TourRequestDraft, TouristProfile,
};
pub use validation::{
    validate_budget, validate_cover_letter, validate_destination, validate_edited_price,
    validate_party_size, validate_proposed_price, validate_request_patch, validate_title,
    validate_trip_dates,
};
