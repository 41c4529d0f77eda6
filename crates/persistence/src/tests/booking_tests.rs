// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking persistence tests.

use tour_match::{Command, apply_booking};
use tour_match_audit::EntityKind;
use tour_match_domain::{BookingDecision, BookingStatus};

use crate::{Persistence, PersistenceError};

use super::helpers::{
    guide_actor, persist_acceptance, persist_new_request, persist_submission, test_cause,
    test_now, tourist_actor,
};

fn persist_booked_request(persistence: &mut Persistence) -> i64 {
    let request_id = persist_new_request(persistence);
    persist_submission(persistence, request_id, "guide-a", 450.0);
    let application_id = persistence
        .find_application_id(request_id, "guide-a")
        .expect("application exists");
    persist_acceptance(persistence, request_id, application_id)
}

#[test]
fn test_guide_response_persists() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let booking_id = persist_booked_request(&mut persistence);

    let booking = persistence.get_booking(booking_id).expect("booking exists");
    let result = apply_booking(
        &booking,
        Command::GuideRespondBooking {
            decision: BookingDecision::Upcoming,
        },
        guide_actor("guide-a"),
        test_cause(),
        test_now(),
    )
    .expect("response should succeed");
    persistence
        .persist_booking_transition(&result)
        .expect("persist");

    let booking = persistence.get_booking(booking_id).expect("booking exists");
    assert_eq!(booking.status, BookingStatus::Upcoming);
}

#[test]
fn test_stale_booking_transition_conflicts() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let booking_id = persist_booked_request(&mut persistence);

    let pending_booking = persistence.get_booking(booking_id).expect("booking exists");

    // Two responses race from the same pending snapshot.
    let confirm = apply_booking(
        &pending_booking,
        Command::GuideRespondBooking {
            decision: BookingDecision::Upcoming,
        },
        guide_actor("guide-a"),
        test_cause(),
        test_now(),
    )
    .expect("response should validate");
    let decline = apply_booking(
        &pending_booking,
        Command::GuideRespondBooking {
            decision: BookingDecision::Cancelled,
        },
        guide_actor("guide-a"),
        test_cause(),
        test_now(),
    )
    .expect("response should validate");

    persistence
        .persist_booking_transition(&confirm)
        .expect("first commit wins");

    let result = persistence.persist_booking_transition(&decline);
    assert!(matches!(result, Err(PersistenceError::Conflict(_))));

    let booking = persistence.get_booking(booking_id).expect("booking exists");
    assert_eq!(booking.status, BookingStatus::Upcoming);
}

#[test]
fn test_tourist_cancellation_persists_with_audit_trail() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let booking_id = persist_booked_request(&mut persistence);

    let booking = persistence.get_booking(booking_id).expect("booking exists");
    let result = apply_booking(
        &booking,
        Command::TouristCancelBooking {
            tourist_id: String::from("tourist-1"),
        },
        tourist_actor(),
        test_cause(),
        test_now(),
    )
    .expect("cancellation should succeed");
    persistence
        .persist_booking_transition(&result)
        .expect("persist");

    let booking = persistence.get_booking(booking_id).expect("booking exists");
    assert_eq!(booking.status, BookingStatus::Cancelled);

    let events = persistence
        .list_audit_events(EntityKind::Booking, booking_id)
        .expect("timeline loads");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action.name, "TouristCancelBooking");
}

#[test]
fn test_missing_booking_is_not_found() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let result = persistence.get_booking(999);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
