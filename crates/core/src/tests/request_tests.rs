// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for request creation, updates, and cancellation.

use time::macros::date;
use tour_match_domain::{DomainError, RequestPatch, RequestStatus, TouristProfile};

use crate::{Command, CoreError, TransitionKind, apply, apply_create};

use super::helpers::{
    create_competitive_state, create_empty_state, create_test_actor, create_test_cause, test_now,
};

fn create_command() -> Command {
    Command::CreateRequest {
        tourist: TouristProfile::new(String::from("tourist-1"), String::from("Ada Tourist")),
        title: String::from("Alpine hiking week"),
        destination: String::from("Interlaken"),
        start_date: date!(2025 - 06 - 01),
        end_date: date!(2025 - 06 - 05),
        budget: 500.0,
        party_size: 2,
        tour_type: String::from("hiking"),
        languages: vec![String::from("en")],
        description: String::from("Five days of guided day hikes"),
        requirements: None,
    }
}

#[test]
fn test_create_request_produces_open_draft() {
    let result = apply_create(
        create_command(),
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .expect("creation should succeed");

    assert_eq!(result.draft.status, RequestStatus::Open);
    assert_eq!(result.draft.application_count, 0);
    assert_eq!(result.draft.tourist.tourist_id, "tourist-1");
    assert_eq!(result.audit_event.action.name, "CreateRequest");
}

#[test]
fn test_create_request_rejects_inverted_dates() {
    let command = match create_command() {
        Command::CreateRequest { tourist, .. } => Command::CreateRequest {
            tourist,
            title: String::from("Alpine hiking week"),
            destination: String::from("Interlaken"),
            start_date: date!(2025 - 06 - 10),
            end_date: date!(2025 - 06 - 05),
            budget: 500.0,
            party_size: 2,
            tour_type: String::from("hiking"),
            languages: vec![],
            description: String::new(),
            requirements: None,
        },
        _ => unreachable!(),
    };

    let result = apply_create(command, create_test_actor(), create_test_cause(), test_now());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidTripDates { .. }
        ))
    ));
}

#[test]
fn test_create_request_rejects_zero_budget_and_party() {
    for (budget, party_size) in [(0.0, 2), (500.0, 0)] {
        let command = Command::CreateRequest {
            tourist: TouristProfile::new(String::from("tourist-1"), String::from("Ada")),
            title: String::from("T"),
            destination: String::from("D"),
            start_date: date!(2025 - 06 - 01),
            end_date: date!(2025 - 06 - 05),
            budget,
            party_size,
            tour_type: String::from("hiking"),
            languages: vec![],
            description: String::new(),
            requirements: None,
        };
        let result =
            apply_create(command, create_test_actor(), create_test_cause(), test_now());
        assert!(result.is_err());
    }
}

#[test]
fn test_update_open_request_applies_only_provided_fields() {
    let state = create_empty_state(7);
    let patch = RequestPatch {
        budget: Some(750.0),
        description: Some(String::from("Now with via ferrata")),
        ..RequestPatch::default()
    };

    let result = apply(
        &state,
        Command::UpdateRequest { patch },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .expect("update should succeed");

    assert_eq!(result.kind, TransitionKind::UpdateRequest);
    assert_eq!(result.new_state.request.budget, 750.0);
    assert_eq!(result.new_state.request.description, "Now with via ferrata");
    // Untouched fields keep their stored values.
    assert_eq!(result.new_state.request.title, state.request.title);
    assert_eq!(result.new_state.request.party_size, 2);
    assert!(result.booking_draft.is_none());
}

#[test]
fn test_update_non_open_request_fails_even_with_valid_patch() {
    for status in [
        RequestStatus::Accepted,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ] {
        let mut state = create_empty_state(7);
        state.request.status = status;

        let patch = RequestPatch {
            budget: Some(750.0),
            ..RequestPatch::default()
        };

        let result = apply(
            &state,
            Command::UpdateRequest { patch },
            create_test_actor(),
            create_test_cause(),
            test_now(),
        );

        assert!(
            matches!(
                result,
                Err(CoreError::DomainViolation(DomainError::RequestNotOpen { .. }))
            ),
            "update should be rejected for status {status}"
        );
    }
}

#[test]
fn test_update_start_date_alone_is_checked_against_stored_end_date() {
    let state = create_empty_state(7);
    let patch = RequestPatch {
        start_date: Some(date!(2025 - 07 - 01)),
        ..RequestPatch::default()
    };

    let result = apply(
        &state,
        Command::UpdateRequest { patch },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidTripDates { .. }
        ))
    ));
}

#[test]
fn test_cancel_open_request_soft_deletes() {
    let state = create_empty_state(7);

    let result = apply(
        &state,
        Command::CancelRequest,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .expect("cancel should succeed");

    assert_eq!(result.kind, TransitionKind::CancelRequest);
    assert_eq!(result.new_state.request.status, RequestStatus::Cancelled);
}

#[test]
fn test_cancel_is_permitted_from_any_status() {
    // Cancellation marks the request regardless of its current status
    // and does not cascade.
    for status in [
        RequestStatus::Open,
        RequestStatus::Accepted,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ] {
        let mut state = create_competitive_state(7);
        state.request.status = status;

        let result = apply(
            &state,
            Command::CancelRequest,
            create_test_actor(),
            create_test_cause(),
            test_now(),
        );

        assert!(result.is_ok(), "cancel should succeed from status {status}");
        let result = result.unwrap();
        assert_eq!(result.new_state.request.status, RequestStatus::Cancelled);
        // Child applications are left untouched.
        assert_eq!(
            result.new_state.applications,
            state.applications,
            "cancel must not resolve applications"
        );
    }
}
