// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::OffsetDateTime;
use time::macros::{date, datetime};
use tour_match_audit::{Actor, Cause};
use tour_match_domain::{
    Application, ApplicationStatus, Booking, BookingStatus, GuideProfile, RequestStatus,
    TourRequest,
};

use crate::RequestState;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("tourist-1"), String::from("tourist"))
}

pub fn create_test_guide_actor(guide_id: &str) -> Actor {
    Actor::new(String::from(guide_id), String::from("guide"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2025 - 05 - 01 09:00:00 UTC)
}

pub fn create_test_guide(id: &str) -> GuideProfile {
    GuideProfile::new(
        String::from(id),
        format!("Guide {id}"),
        format!("{id}@guides.example"),
    )
}

pub fn create_test_request(request_id: i64) -> TourRequest {
    TourRequest {
        request_id,
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
        tourist_id: String::from("tourist-1"),
        tourist_name: String::from("Ada Tourist"),
        application_count: 0,
        status: RequestStatus::Open,
        selected_application_id: None,
        selected_guide_id: None,
        selected_guide_name: None,
        selected_guide_email: None,
        agreed_price: None,
        created_at: test_now(),
        updated_at: test_now(),
    }
}

pub fn create_test_application(
    application_id: i64,
    request: &TourRequest,
    guide_id: &str,
    proposed_price: f64,
) -> Application {
    let mut application = Application::new_pending(
        request,
        create_test_guide(guide_id),
        proposed_price,
        format!("Cover letter from {guide_id}"),
        test_now(),
    );
    application.application_id = Some(application_id);
    application
}

/// A request with two pending applications: guide-a at 450, guide-b at 480.
pub fn create_competitive_state(request_id: i64) -> RequestState {
    let mut request = create_test_request(request_id);
    request.application_count = 2;
    let application_a = create_test_application(1, &request, "guide-a", 450.0);
    let application_b = create_test_application(2, &request, "guide-b", 480.0);
    RequestState::new(request, vec![application_a, application_b])
}

pub fn create_empty_state(request_id: i64) -> RequestState {
    RequestState::new(create_test_request(request_id), Vec::new())
}

pub fn create_test_booking(booking_id: i64, status: BookingStatus) -> Booking {
    Booking {
        booking_id,
        request_id: 7,
        tourist_id: String::from("tourist-1"),
        tourist_name: String::from("Ada Tourist"),
        guide_id: String::from("guide-a"),
        guide_name: String::from("Guide guide-a"),
        title: String::from("Alpine hiking week"),
        destination: String::from("Interlaken"),
        start_date: date!(2025 - 06 - 01),
        end_date: date!(2025 - 06 - 05),
        tour_type: String::from("hiking"),
        party_size: 2,
        budget: 500.0,
        status,
        agreed_price: 450.0,
        created_at: test_now(),
        updated_at: test_now(),
    }
}

pub fn count_with_status(state: &RequestState, status: ApplicationStatus) -> usize {
    state
        .applications
        .iter()
        .filter(|a| a.status == status)
        .count()
}
