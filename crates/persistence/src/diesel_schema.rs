// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    tour_requests (request_id) {
        request_id -> BigInt,
        title -> Text,
        destination -> Text,
        start_date -> Text,
        end_date -> Text,
        budget -> Double,
        party_size -> BigInt,
        tour_type -> Text,
        languages_json -> Text,
        description -> Text,
        requirements -> Nullable<Text>,
        tourist_id -> Text,
        tourist_name -> Text,
        application_count -> BigInt,
        status -> Text,
        selected_application_id -> Nullable<BigInt>,
        selected_guide_id -> Nullable<Text>,
        selected_guide_name -> Nullable<Text>,
        selected_guide_email -> Nullable<Text>,
        agreed_price -> Nullable<Double>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    applications (application_id) {
        application_id -> BigInt,
        request_id -> BigInt,
        guide_id -> Text,
        guide_name -> Text,
        guide_email -> Text,
        proposed_price -> Double,
        cover_letter -> Text,
        status -> Text,
        request_title -> Text,
        request_destination -> Text,
        request_start_date -> Text,
        request_end_date -> Text,
        request_tour_type -> Text,
        tourist_id -> Text,
        tourist_name -> Text,
        agreed_price -> Nullable<Double>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    bookings (booking_id) {
        booking_id -> BigInt,
        request_id -> BigInt,
        tourist_id -> Text,
        tourist_name -> Text,
        guide_id -> Text,
        guide_name -> Text,
        title -> Text,
        destination -> Text,
        start_date -> Text,
        end_date -> Text,
        tour_type -> Text,
        party_size -> BigInt,
        budget -> Double,
        status -> Text,
        agreed_price -> Double,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    audit_events (event_id) {
        event_id -> BigInt,
        entity_kind -> Text,
        entity_id -> BigInt,
        actor_json -> Text,
        cause_json -> Text,
        action_json -> Text,
        before_snapshot_json -> Text,
        after_snapshot_json -> Text,
        created_at -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tour_requests, applications, bookings, audit_events);
