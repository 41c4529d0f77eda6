// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions driving the real engine-then-persist flow.

use time::OffsetDateTime;
use time::macros::{date, datetime};
use tour_match::{Command, CreateResult, RequestState, TransitionResult, apply, apply_create};
use tour_match_audit::{Actor, Cause};
use tour_match_domain::{GuideProfile, TouristProfile};

use crate::Persistence;

pub fn test_now() -> OffsetDateTime {
    datetime!(2025 - 05 - 01 09:00:00 UTC)
}

pub fn tourist_actor() -> Actor {
    Actor::new(String::from("tourist-1"), String::from("tourist"))
}

pub fn guide_actor(guide_id: &str) -> Actor {
    Actor::new(String::from(guide_id), String::from("guide"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_guide(id: &str) -> GuideProfile {
    GuideProfile::new(
        String::from(id),
        format!("Guide {id}"),
        format!("{id}@guides.example"),
    )
}

pub fn create_request_command() -> Command {
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

/// Creates and persists a request, returning its assigned identifier.
pub fn persist_new_request(persistence: &mut Persistence) -> i64 {
    let result: CreateResult = apply_create(
        create_request_command(),
        tourist_actor(),
        test_cause(),
        test_now(),
    )
    .expect("creation should succeed");
    persistence
        .persist_create(&result)
        .expect("persist should succeed")
        .request_id
}

/// Submits an application through the engine and persists it.
pub fn persist_submission(
    persistence: &mut Persistence,
    request_id: i64,
    guide_id: &str,
    price: f64,
) {
    let state: RequestState = persistence
        .load_request_state(request_id)
        .expect("state should load");
    let result: TransitionResult = apply(
        &state,
        Command::SubmitApplication {
            guide: create_guide(guide_id),
            proposed_price: price,
            cover_letter: format!("Cover letter from {guide_id}"),
        },
        guide_actor(guide_id),
        test_cause(),
        test_now(),
    )
    .expect("submission should succeed");
    persistence
        .persist_transition(&result)
        .expect("persist should succeed");
}

/// Accepts an application through the engine and persists it, returning
/// the new booking identifier.
pub fn persist_acceptance(
    persistence: &mut Persistence,
    request_id: i64,
    application_id: i64,
) -> i64 {
    let state: RequestState = persistence
        .load_request_state(request_id)
        .expect("state should load");
    let result: TransitionResult = apply(
        &state,
        Command::AcceptApplication { application_id },
        tourist_actor(),
        test_cause(),
        test_now(),
    )
    .expect("acceptance should succeed");
    persistence
        .persist_transition(&result)
        .expect("persist should succeed")
        .booking_id
        .expect("acceptance should create a booking")
}
