// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler tests for the booking lifecycle.

use tour_match_persistence::SqlitePersistence;

use crate::{
    ApiError, GuideRespondBookingRequest, accept_application, create_request,
    guide_respond_booking, tourist_cancel_booking,
};

use super::helpers::{
    create_default_request, create_request_dto, create_test_cause, create_test_persistence,
    future_date, guide_actor, submit, tourist_actor, tourist_actor_with_id,
};

fn respond(decision: &str) -> GuideRespondBookingRequest {
    GuideRespondBookingRequest {
        decision: String::from(decision),
    }
}

/// Creates a request starting 30 days out, with one accepted application.
fn create_booking(persistence: &mut SqlitePersistence) -> i64 {
    let request_id = create_default_request(persistence);
    let application_id = submit(persistence, request_id, "guide-a", 450.0);
    accept_application(
        persistence,
        request_id,
        application_id,
        &tourist_actor(),
        create_test_cause(),
    )
    .expect("acceptance should succeed")
    .booking_id
}

/// Creates a booking whose trip starts tomorrow, i.e. inside the 24-hour
/// cancellation window.
fn create_imminent_booking(persistence: &mut SqlitePersistence) -> i64 {
    let dto = create_request_dto(future_date(1), future_date(3));
    let request_id = create_request(persistence, &dto, &tourist_actor(), create_test_cause())
        .expect("creation should succeed")
        .request_id;
    let application_id = submit(persistence, request_id, "guide-a", 450.0);
    accept_application(
        persistence,
        request_id,
        application_id,
        &tourist_actor(),
        create_test_cause(),
    )
    .expect("acceptance should succeed")
    .booking_id
}

#[test]
fn test_guide_confirms_pending_booking() {
    let mut persistence = create_test_persistence();
    let booking_id = create_booking(&mut persistence);

    let response = guide_respond_booking(
        &mut persistence,
        booking_id,
        &respond("upcoming"),
        &guide_actor("guide-a"),
        create_test_cause(),
    )
    .expect("response should succeed");

    assert_eq!(response.status, "upcoming");
}

#[test]
fn test_guide_declines_pending_booking() {
    let mut persistence = create_test_persistence();
    let booking_id = create_booking(&mut persistence);

    let response = guide_respond_booking(
        &mut persistence,
        booking_id,
        &respond("cancelled"),
        &guide_actor("guide-a"),
        create_test_cause(),
    )
    .expect("response should succeed");

    assert_eq!(response.status, "cancelled");
}

#[test]
fn test_second_guide_response_is_invalid_state() {
    let mut persistence = create_test_persistence();
    let booking_id = create_booking(&mut persistence);
    guide_respond_booking(
        &mut persistence,
        booking_id,
        &respond("upcoming"),
        &guide_actor("guide-a"),
        create_test_cause(),
    )
    .expect("first response should succeed");

    let result = guide_respond_booking(
        &mut persistence,
        booking_id,
        &respond("cancelled"),
        &guide_actor("guide-a"),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::InvalidState { .. })));
}

#[test]
fn test_unknown_decision_is_invalid_input() {
    let mut persistence = create_test_persistence();
    let booking_id = create_booking(&mut persistence);

    let result = guide_respond_booking(
        &mut persistence,
        booking_id,
        &respond("maybe"),
        &guide_actor("guide-a"),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_respond_to_missing_booking_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = guide_respond_booking(
        &mut persistence,
        999,
        &respond("upcoming"),
        &guide_actor("guide-a"),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_tourist_cancels_with_enough_notice() {
    let mut persistence = create_test_persistence();
    let booking_id = create_booking(&mut persistence);

    let response = tourist_cancel_booking(
        &mut persistence,
        booking_id,
        &tourist_actor(),
        create_test_cause(),
    )
    .expect("cancellation should succeed");

    assert_eq!(response.status, "cancelled");
}

#[test]
fn test_tourist_cancels_confirmed_booking_with_enough_notice() {
    let mut persistence = create_test_persistence();
    let booking_id = create_booking(&mut persistence);
    guide_respond_booking(
        &mut persistence,
        booking_id,
        &respond("upcoming"),
        &guide_actor("guide-a"),
        create_test_cause(),
    )
    .expect("response should succeed");

    let response = tourist_cancel_booking(
        &mut persistence,
        booking_id,
        &tourist_actor(),
        create_test_cause(),
    )
    .expect("cancellation should succeed");

    assert_eq!(response.status, "cancelled");
}

#[test]
fn test_foreign_tourist_cancellation_is_forbidden() {
    let mut persistence = create_test_persistence();
    let booking_id = create_booking(&mut persistence);

    let result = tourist_cancel_booking(
        &mut persistence,
        booking_id,
        &tourist_actor_with_id("tourist-2"),
        create_test_cause(),
    );

    match result {
        Err(err @ ApiError::Forbidden { .. }) => assert_eq!(err.kind(), "forbidden"),
        other => panic!("Expected Forbidden, got {other:?}"),
    }
}

#[test]
fn test_cancellation_inside_notice_window_is_policy_violation() {
    let mut persistence = create_test_persistence();
    let booking_id = create_imminent_booking(&mut persistence);

    let result = tourist_cancel_booking(
        &mut persistence,
        booking_id,
        &tourist_actor(),
        create_test_cause(),
    );

    match result {
        Err(err @ ApiError::PolicyViolation { .. }) => {
            assert_eq!(err.kind(), "policy_violation");
        }
        other => panic!("Expected PolicyViolation, got {other:?}"),
    }
}

#[test]
fn test_cancelled_booking_cannot_be_cancelled_again() {
    let mut persistence = create_test_persistence();
    let booking_id = create_booking(&mut persistence);
    tourist_cancel_booking(
        &mut persistence,
        booking_id,
        &tourist_actor(),
        create_test_cause(),
    )
    .expect("first cancellation should succeed");

    let result = tourist_cancel_booking(
        &mut persistence,
        booking_id,
        &tourist_actor(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::InvalidState { .. })));
}
