// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the booking lifecycle: guide response and tourist
//! cancellation, including the 24-hour notice boundary.

use time::Duration;
use time::macros::datetime;
use tour_match_domain::{BookingDecision, BookingStatus, DomainError, trip_start_moment};

use crate::{Command, CoreError, apply_booking};

use super::helpers::{create_test_booking, create_test_cause, create_test_guide_actor, test_now};

fn tourist_actor() -> tour_match_audit::Actor {
    tour_match_audit::Actor::new(String::from("tourist-1"), String::from("tourist"))
}

#[test]
fn test_guide_accepts_pending_booking() {
    let booking = create_test_booking(1, BookingStatus::Pending);

    let result = apply_booking(
        &booking,
        Command::GuideRespondBooking {
            decision: BookingDecision::Upcoming,
        },
        create_test_guide_actor("guide-a"),
        create_test_cause(),
        test_now(),
    )
    .expect("response should succeed");

    assert_eq!(result.new_booking.status, BookingStatus::Upcoming);
    assert_eq!(result.previous_status, BookingStatus::Pending);
}

#[test]
fn test_guide_declines_pending_booking() {
    let booking = create_test_booking(1, BookingStatus::Pending);

    let result = apply_booking(
        &booking,
        Command::GuideRespondBooking {
            decision: BookingDecision::Cancelled,
        },
        create_test_guide_actor("guide-a"),
        create_test_cause(),
        test_now(),
    )
    .expect("response should succeed");

    assert_eq!(result.new_booking.status, BookingStatus::Cancelled);
}

#[test]
fn test_guide_cannot_respond_to_resolved_booking() {
    for status in [
        BookingStatus::Upcoming,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ] {
        let booking = create_test_booking(1, status);

        let result = apply_booking(
            &booking,
            Command::GuideRespondBooking {
                decision: BookingDecision::Upcoming,
            },
            create_test_guide_actor("guide-a"),
            create_test_cause(),
            test_now(),
        );

        assert!(
            matches!(
                result,
                Err(CoreError::DomainViolation(
                    DomainError::BookingNotPending { .. }
                ))
            ),
            "guide response should fail for status {status}"
        );
    }
}

#[test]
fn test_tourist_cancels_with_enough_notice() {
    for status in [BookingStatus::Pending, BookingStatus::Upcoming] {
        let booking = create_test_booking(1, status);
        // Trip starts 2025-06-01; a month before is plenty of notice.
        let result = apply_booking(
            &booking,
            Command::TouristCancelBooking {
                tourist_id: String::from("tourist-1"),
            },
            tourist_actor(),
            create_test_cause(),
            test_now(),
        );

        assert!(result.is_ok(), "cancel should succeed from status {status}");
        let result = result.unwrap();
        assert_eq!(result.new_booking.status, BookingStatus::Cancelled);
        assert_eq!(result.previous_status, status);
    }
}

#[test]
fn test_foreign_tourist_cannot_cancel() {
    let booking = create_test_booking(1, BookingStatus::Upcoming);

    let result = apply_booking(
        &booking,
        Command::TouristCancelBooking {
            tourist_id: String::from("tourist-2"),
        },
        tour_match_audit::Actor::new(String::from("tourist-2"), String::from("tourist")),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::NotBookingTourist { .. }
        ))
    ));
}

#[test]
fn test_tourist_cannot_cancel_closed_booking() {
    for status in [BookingStatus::Completed, BookingStatus::Cancelled] {
        let booking = create_test_booking(1, status);

        let result = apply_booking(
            &booking,
            Command::TouristCancelBooking {
                tourist_id: String::from("tourist-1"),
            },
            tourist_actor(),
            create_test_cause(),
            test_now(),
        );

        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(
                DomainError::BookingAlreadyClosed { .. }
            ))
        ));
    }
}

#[test]
fn test_cancel_at_exactly_24_hours_succeeds() {
    let booking = create_test_booking(1, BookingStatus::Upcoming);
    let now = trip_start_moment(booking.start_date) - Duration::hours(24);

    let result = apply_booking(
        &booking,
        Command::TouristCancelBooking {
            tourist_id: String::from("tourist-1"),
        },
        tourist_actor(),
        create_test_cause(),
        now,
    );

    assert!(result.is_ok());
}

#[test]
fn test_cancel_at_23_hours_59_minutes_fails() {
    let booking = create_test_booking(1, BookingStatus::Upcoming);
    let now = trip_start_moment(booking.start_date) - Duration::hours(23) - Duration::minutes(59);

    let result = apply_booking(
        &booking,
        Command::TouristCancelBooking {
            tourist_id: String::from("tourist-1"),
        },
        tourist_actor(),
        create_test_cause(),
        now,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::CancellationWindowClosed { .. }
        ))
    ));
}

#[test]
fn test_cancel_10_hours_before_start_fails() {
    let booking = create_test_booking(1, BookingStatus::Upcoming);
    // Trip starts midnight UTC on 2025-06-01.
    let now = datetime!(2025 - 05 - 31 14:00:00 UTC);

    let result = apply_booking(
        &booking,
        Command::TouristCancelBooking {
            tourist_id: String::from("tourist-1"),
        },
        tourist_actor(),
        create_test_cause(),
        now,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::CancellationWindowClosed { .. }
        ))
    ));
}
