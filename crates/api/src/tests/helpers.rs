// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::{Date, Duration, OffsetDateTime};
use tour_match_audit::Cause;
use tour_match_persistence::SqlitePersistence;

use crate::{
    AuthenticatedActor, CreateRequestRequest, Role, SubmitApplicationRequest, create_request,
    submit_application,
};

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn tourist_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("tourist-1"), Role::Tourist)
}

pub fn tourist_actor_with_id(id: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(String::from(id), Role::Tourist)
}

pub fn guide_actor(id: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(String::from(id), Role::Guide)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

/// A calendar date `days` days from now.
pub fn future_date(days: i64) -> Date {
    (OffsetDateTime::now_utc() + Duration::days(days)).date()
}

pub fn create_request_dto(start: Date, end: Date) -> CreateRequestRequest {
    CreateRequestRequest {
        title: String::from("Alpine hiking week"),
        destination: String::from("Interlaken"),
        start_date: start,
        end_date: end,
        budget: 500.0,
        party_size: 2,
        tour_type: String::from("hiking"),
        languages: vec![String::from("en")],
        description: String::from("Five days of guided day hikes"),
        requirements: None,
        tourist_name: String::from("Ada Tourist"),
    }
}

/// Creates a request far enough in the future for cancellation tests.
pub fn create_default_request(persistence: &mut SqlitePersistence) -> i64 {
    let dto = create_request_dto(future_date(30), future_date(34));
    create_request(persistence, &dto, &tourist_actor(), create_test_cause())
        .expect("creation should succeed")
        .request_id
}

pub fn submit_dto(guide_id: &str, price: f64) -> SubmitApplicationRequest {
    SubmitApplicationRequest {
        guide_name: format!("Guide {guide_id}"),
        guide_email: format!("{guide_id}@guides.example"),
        proposed_price: price,
        cover_letter: format!("Cover letter from {guide_id}"),
    }
}

/// Submits an application and returns its identifier.
pub fn submit(persistence: &mut SqlitePersistence, request_id: i64, guide_id: &str, price: f64) -> i64 {
    submit_application(
        persistence,
        request_id,
        &submit_dto(guide_id, price),
        &guide_actor(guide_id),
        create_test_cause(),
    )
    .expect("submission should succeed")
    .application_id
}
