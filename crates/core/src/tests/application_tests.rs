// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for application submission and editing.

use time::Duration;
use tour_match_domain::{ApplicationPatch, ApplicationStatus, DomainError, RequestStatus};

use crate::{Command, CoreError, TransitionKind, apply};

use super::helpers::{
    count_with_status, create_competitive_state, create_empty_state, create_test_guide,
    create_test_guide_actor, create_test_cause, test_now,
};

fn submit_command(guide_id: &str, price: f64) -> Command {
    Command::SubmitApplication {
        guide: create_test_guide(guide_id),
        proposed_price: price,
        cover_letter: format!("Cover letter from {guide_id}"),
    }
}

#[test]
fn test_first_submission_appends_pending_application_and_bumps_counter() {
    let state = create_empty_state(7);

    let result = apply(
        &state,
        submit_command("guide-a", 450.0),
        create_test_guide_actor("guide-a"),
        create_test_cause(),
        test_now(),
    )
    .expect("submission should succeed");

    assert_eq!(
        result.kind,
        TransitionKind::SubmitApplication {
            guide_id: String::from("guide-a")
        }
    );
    assert_eq!(result.new_state.applications.len(), 1);
    assert_eq!(result.new_state.request.application_count, 1);

    let application = &result.new_state.applications[0];
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.application_id, None);
    assert_eq!(application.request_title, state.request.title);
}

#[test]
fn test_resubmission_overwrites_without_double_counting() {
    let state = create_competitive_state(7);
    let original_created_at = state.applications[0].created_at;
    let later = test_now() + Duration::hours(2);

    let result = apply(
        &state,
        submit_command("guide-a", 425.0),
        create_test_guide_actor("guide-a"),
        create_test_cause(),
        later,
    )
    .expect("resubmission should succeed");

    // Still two applications, counter untouched.
    assert_eq!(result.new_state.applications.len(), 2);
    assert_eq!(result.new_state.request.application_count, 2);

    let resubmitted = result
        .new_state
        .find_application_by_guide("guide-a")
        .expect("application should still exist");
    assert_eq!(resubmitted.proposed_price, 425.0);
    assert_eq!(resubmitted.created_at, original_created_at);
    assert_eq!(resubmitted.updated_at, later);
    assert_eq!(resubmitted.status, ApplicationStatus::Pending);
}

#[test]
fn test_submission_against_non_open_request_fails() {
    for status in [
        RequestStatus::Accepted,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ] {
        let mut state = create_empty_state(7);
        state.request.status = status;

        let result = apply(
            &state,
            submit_command("guide-a", 450.0),
            create_test_guide_actor("guide-a"),
            create_test_cause(),
            test_now(),
        );

        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(DomainError::RequestNotOpen { .. }))
        ));
    }
}

#[test]
fn test_submission_validates_price_and_cover_letter() {
    let state = create_empty_state(7);

    let bad_price = Command::SubmitApplication {
        guide: create_test_guide("guide-a"),
        proposed_price: 0.0,
        cover_letter: String::from("Hello"),
    };
    assert!(matches!(
        apply(
            &state,
            bad_price,
            create_test_guide_actor("guide-a"),
            create_test_cause(),
            test_now()
        ),
        Err(CoreError::DomainViolation(
            DomainError::InvalidProposedPrice { .. }
        ))
    ));

    let blank_letter = Command::SubmitApplication {
        guide: create_test_guide("guide-a"),
        proposed_price: 450.0,
        cover_letter: String::from("   "),
    };
    assert!(matches!(
        apply(
            &state,
            blank_letter,
            create_test_guide_actor("guide-a"),
            create_test_cause(),
            test_now()
        ),
        Err(CoreError::DomainViolation(DomainError::InvalidCoverLetter(
            _
        )))
    ));
}

#[test]
fn test_edit_by_owner_updates_pending_application() {
    let state = create_competitive_state(7);
    let patch = ApplicationPatch {
        proposed_price: Some(430.0),
        cover_letter: Some(String::from("Revised pitch")),
    };

    let result = apply(
        &state,
        Command::EditApplication {
            application_id: 1,
            guide_id: String::from("guide-a"),
            patch,
        },
        create_test_guide_actor("guide-a"),
        create_test_cause(),
        test_now(),
    )
    .expect("edit should succeed");

    assert_eq!(
        result.kind,
        TransitionKind::EditApplication { application_id: 1 }
    );
    let edited = result
        .new_state
        .find_application(1)
        .expect("application should exist");
    assert_eq!(edited.proposed_price, 430.0);
    assert_eq!(edited.cover_letter, "Revised pitch");
    // The sibling is untouched.
    assert_eq!(
        result.new_state.find_application(2),
        state.find_application(2)
    );
}

#[test]
fn test_edit_by_non_owner_fails_regardless_of_status() {
    for resolved in [
        ApplicationStatus::Pending,
        ApplicationStatus::Selected,
        ApplicationStatus::Rejected,
    ] {
        let mut state = create_competitive_state(7);
        state.applications[0].status = resolved;

        let result = apply(
            &state,
            Command::EditApplication {
                application_id: 1,
                guide_id: String::from("guide-b"),
                patch: ApplicationPatch::default(),
            },
            create_test_guide_actor("guide-b"),
            create_test_cause(),
            test_now(),
        );

        assert!(
            matches!(
                result,
                Err(CoreError::DomainViolation(
                    DomainError::NotApplicationOwner { .. }
                ))
            ),
            "non-owner edit should fail with ownership error for status {resolved}"
        );
    }
}

#[test]
fn test_edit_resolved_application_fails() {
    for resolved in [ApplicationStatus::Selected, ApplicationStatus::Rejected] {
        let mut state = create_competitive_state(7);
        state.applications[0].status = resolved;

        let result = apply(
            &state,
            Command::EditApplication {
                application_id: 1,
                guide_id: String::from("guide-a"),
                patch: ApplicationPatch::default(),
            },
            create_test_guide_actor("guide-a"),
            create_test_cause(),
            test_now(),
        );

        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(
                DomainError::ApplicationNotPending { .. }
            ))
        ));
    }
}

#[test]
fn test_edit_unknown_application_fails() {
    let state = create_competitive_state(7);

    let result = apply(
        &state,
        Command::EditApplication {
            application_id: 99,
            guide_id: String::from("guide-a"),
            patch: ApplicationPatch::default(),
        },
        create_test_guide_actor("guide-a"),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ApplicationNotFound { .. }
        ))
    ));
}

#[test]
fn test_edit_accepts_zero_price() {
    // The edit form accepts a zero price even though submission does not.
    let state = create_competitive_state(7);

    let result = apply(
        &state,
        Command::EditApplication {
            application_id: 1,
            guide_id: String::from("guide-a"),
            patch: ApplicationPatch {
                proposed_price: Some(0.0),
                cover_letter: None,
            },
        },
        create_test_guide_actor("guide-a"),
        create_test_cause(),
        test_now(),
    );

    assert!(result.is_ok());
    let state_after = result.unwrap().new_state;
    assert_eq!(count_with_status(&state_after, ApplicationStatus::Pending), 2);
}
