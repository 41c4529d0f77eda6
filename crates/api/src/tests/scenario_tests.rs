// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end walk through the whole matching lifecycle: two guides
//! compete for a request, the tourist picks the cheaper bid, the guide
//! confirms, and a late cancellation attempt bounces off the notice
//! window.

use crate::{
    ApiError, ApplicationListParams, BookingListParams, GuideRespondBookingRequest,
    RequestListParams, accept_application, create_request, guide_respond_booking,
    list_applications, list_bookings, list_requests, submit_application,
    tourist_cancel_booking,
};

use super::helpers::{
    create_request_dto, create_test_cause, create_test_persistence, future_date, guide_actor,
    submit_dto, tourist_actor,
};

#[test]
fn test_full_matching_lifecycle() {
    let mut persistence = create_test_persistence();

    // The trip starts tomorrow, so the final cancellation attempt falls
    // inside the 24-hour window.
    let dto = create_request_dto(future_date(1), future_date(5));
    let created = create_request(&mut persistence, &dto, &tourist_actor(), create_test_cause())
        .expect("creation should succeed");
    let request_id = created.request_id;
    assert_eq!(created.status, "open");

    // Guide A bids 450, guide B bids 480.
    let application_a = submit_application(
        &mut persistence,
        request_id,
        &submit_dto("guide-a", 450.0),
        &guide_actor("guide-a"),
        create_test_cause(),
    )
    .expect("submission should succeed")
    .application_id;
    let application_b = submit_application(
        &mut persistence,
        request_id,
        &submit_dto("guide-b", 480.0),
        &guide_actor("guide-b"),
        create_test_cause(),
    )
    .expect("submission should succeed")
    .application_id;

    // The tourist lists applications cheapest first.
    let listed = list_applications(
        &mut persistence,
        request_id,
        &ApplicationListParams {
            sort_by: Some(String::from("proposed_price")),
            sort_direction: Some(String::from("asc")),
            ..ApplicationListParams::default()
        },
    )
    .expect("listing should succeed");
    assert_eq!(listed.pagination.total_count, 2);
    assert_eq!(listed.applications[0].application_id, application_a);
    assert_eq!(listed.applications[0].proposed_price, 450.0);
    assert_eq!(listed.applications[1].application_id, application_b);
    assert_eq!(listed.applications[1].proposed_price, 480.0);

    // Accepting A resolves both applications, stamps the request, and
    // creates the booking at A's price.
    let accepted = accept_application(
        &mut persistence,
        request_id,
        application_a,
        &tourist_actor(),
        create_test_cause(),
    )
    .expect("acceptance should succeed");
    assert_eq!(accepted.agreed_price, 450.0);

    let applications = list_applications(
        &mut persistence,
        request_id,
        &ApplicationListParams::default(),
    )
    .expect("listing should succeed");
    for application in &applications.applications {
        if application.application_id == application_a {
            assert_eq!(application.status, "selected");
            assert_eq!(application.agreed_price, Some(450.0));
        } else {
            assert_eq!(application.status, "rejected");
            assert_eq!(application.agreed_price, None);
        }
    }

    let requests = list_requests(&mut persistence, &RequestListParams::default())
        .expect("listing should succeed");
    let request = &requests.requests[0];
    assert_eq!(request.status, "accepted");
    assert_eq!(request.selected_application_id, Some(application_a));
    assert_eq!(request.selected_guide_id.as_deref(), Some("guide-a"));
    assert_eq!(request.agreed_price, Some(450.0));

    let bookings = list_bookings(&mut persistence, &BookingListParams::default())
        .expect("listing should succeed");
    assert_eq!(bookings.pagination.total_count, 1);
    let booking = &bookings.bookings[0];
    assert_eq!(booking.booking_id, accepted.booking_id);
    assert_eq!(booking.status, "pending");
    assert_eq!(booking.agreed_price, 450.0);
    assert_eq!(booking.budget, 500.0);
    assert_eq!(booking.party_size, 2);

    // Guide A confirms the engagement.
    let confirmed = guide_respond_booking(
        &mut persistence,
        accepted.booking_id,
        &GuideRespondBookingRequest {
            decision: String::from("upcoming"),
        },
        &guide_actor("guide-a"),
        create_test_cause(),
    )
    .expect("response should succeed");
    assert_eq!(confirmed.status, "upcoming");

    // Hours before the trip, the tourist tries to back out. The notice
    // window rejects it and the booking stays confirmed.
    let late_cancellation = tourist_cancel_booking(
        &mut persistence,
        accepted.booking_id,
        &tourist_actor(),
        create_test_cause(),
    );
    assert!(matches!(
        late_cancellation,
        Err(ApiError::PolicyViolation { .. })
    ));

    let bookings = list_bookings(&mut persistence, &BookingListParams::default())
        .expect("listing should succeed");
    assert_eq!(bookings.bookings[0].status, "upcoming");
}
