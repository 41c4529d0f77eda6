// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler tests for request creation, listing, updates, and
//! cancellation.

use crate::{
    ApiError, RequestListParams, UpdateRequestRequest, cancel_request, create_request,
    list_requests, update_request,
};

use super::helpers::{
    create_default_request, create_request_dto, create_test_cause, create_test_persistence,
    future_date, tourist_actor,
};

#[test]
fn test_create_request_assigns_id_and_event() {
    let mut persistence = create_test_persistence();
    let dto = create_request_dto(future_date(30), future_date(34));

    let response = create_request(&mut persistence, &dto, &tourist_actor(), create_test_cause())
        .expect("creation should succeed");

    assert!(response.request_id > 0);
    assert!(response.event_id > 0);
    assert_eq!(response.status, "open");
}

#[test]
fn test_create_request_rejects_bad_budget_with_invalid_input() {
    let mut persistence = create_test_persistence();
    let mut dto = create_request_dto(future_date(30), future_date(34));
    dto.budget = -5.0;

    let result = create_request(&mut persistence, &dto, &tourist_actor(), create_test_cause());

    match result {
        Err(err @ ApiError::InvalidInput { .. }) => assert_eq!(err.kind(), "invalid_input"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_list_requests_shows_created_request() {
    let mut persistence = create_test_persistence();
    let request_id = create_default_request(&mut persistence);

    let response = list_requests(&mut persistence, &RequestListParams::default())
        .expect("listing should succeed");

    assert_eq!(response.pagination.total_count, 1);
    assert_eq!(response.requests[0].request_id, request_id);
    assert_eq!(response.requests[0].tourist_id, "tourist-1");
    assert_eq!(response.requests[0].application_count, 0);
}

#[test]
fn test_update_missing_request_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = update_request(
        &mut persistence,
        999,
        &UpdateRequestRequest::default(),
        &tourist_actor(),
        create_test_cause(),
    );

    match result {
        Err(err @ ApiError::ResourceNotFound { .. }) => assert_eq!(err.kind(), "not_found"),
        other => panic!("Expected ResourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_update_applies_patch_fields() {
    let mut persistence = create_test_persistence();
    let request_id = create_default_request(&mut persistence);

    let patch = UpdateRequestRequest {
        budget: Some(750.0),
        description: Some(String::from("Now with via ferrata")),
        ..UpdateRequestRequest::default()
    };
    let response = update_request(
        &mut persistence,
        request_id,
        &patch,
        &tourist_actor(),
        create_test_cause(),
    )
    .expect("update should succeed");

    assert_eq!(response.request.budget, 750.0);
    assert_eq!(response.request.description, "Now with via ferrata");
    assert_eq!(response.request.title, "Alpine hiking week");
}

#[test]
fn test_update_cancelled_request_is_invalid_state() {
    let mut persistence = create_test_persistence();
    let request_id = create_default_request(&mut persistence);
    cancel_request(
        &mut persistence,
        request_id,
        &tourist_actor(),
        create_test_cause(),
    )
    .expect("cancel should succeed");

    // The patch itself is valid; the lifecycle state rejects it anyway.
    let patch = UpdateRequestRequest {
        budget: Some(750.0),
        ..UpdateRequestRequest::default()
    };
    let result = update_request(
        &mut persistence,
        request_id,
        &patch,
        &tourist_actor(),
        create_test_cause(),
    );

    match result {
        Err(err @ ApiError::InvalidState { .. }) => assert_eq!(err.kind(), "invalid_state"),
        other => panic!("Expected InvalidState, got {other:?}"),
    }
}

#[test]
fn test_cancel_request_reports_cancelled_status() {
    let mut persistence = create_test_persistence();
    let request_id = create_default_request(&mut persistence);

    let response = cancel_request(
        &mut persistence,
        request_id,
        &tourist_actor(),
        create_test_cause(),
    )
    .expect("cancel should succeed");

    assert_eq!(response.status, "cancelled");

    // The document survives as a soft-deleted listing entry.
    let listing = list_requests(&mut persistence, &RequestListParams::default())
        .expect("listing should succeed");
    assert_eq!(listing.pagination.total_count, 1);
    assert_eq!(listing.requests[0].status, "cancelled");
}

#[test]
fn test_cancel_missing_request_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = cancel_request(&mut persistence, 999, &tourist_actor(), create_test_cause());
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
