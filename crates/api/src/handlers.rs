// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every mutating handler follows the same shape: load current state from
//! persistence, run the pure engine, persist the transition, translate
//! errors at each boundary. Handlers never write state directly.

use std::str::FromStr;
use time::OffsetDateTime;
use tour_match::{
    BookingTransitionResult, Command, CreateResult, RequestState, TransitionResult, apply,
    apply_booking, apply_create,
};
use tour_match_audit::Cause;
use tour_match_domain::{
    Application, Booking, BookingDecision, GuideProfile, TourRequest, TouristProfile,
};
use tour_match_persistence::{
    PersistCreateResult, PersistTransitionResult, SqlitePersistence,
};
use tracing::info;

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::listing::{
    ApplicationListParams, BookingListParams, Page, RequestListParams, list_applications_page,
    list_bookings_page, list_requests_page,
};
use crate::request_response::{
    AcceptApplicationResponse, ApplicationInfo, BookingInfo, CancelRequestResponse,
    CreateRequestRequest, CreateRequestResponse, EditApplicationRequest, EditApplicationResponse,
    GuideRespondBookingRequest, GuideRespondBookingResponse, ListApplicationsResponse,
    ListBookingsResponse, ListRequestsResponse, PageInfo, RequestInfo, SubmitApplicationRequest,
    SubmitApplicationResponse, TouristCancelBookingResponse, UpdateRequestRequest,
    UpdateRequestResponse,
};
use crate::AuthenticatedActor;

/// Creates a new tour request owned by the calling tourist.
///
/// # Errors
///
/// Returns an error if validation or persistence fails.
pub fn create_request(
    persistence: &mut SqlitePersistence,
    request: &CreateRequestRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateRequestResponse, ApiError> {
    let command: Command = Command::CreateRequest {
        tourist: TouristProfile::new(
            authenticated_actor.id.clone(),
            request.tourist_name.clone(),
        ),
        title: request.title.clone(),
        destination: request.destination.clone(),
        start_date: request.start_date,
        end_date: request.end_date,
        budget: request.budget,
        party_size: request.party_size,
        tour_type: request.tour_type.clone(),
        languages: request.languages.clone(),
        description: request.description.clone(),
        requirements: request.requirements.clone(),
    };

    let result: CreateResult = apply_create(
        command,
        authenticated_actor.to_audit_actor(),
        cause,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let persisted: PersistCreateResult = persistence
        .persist_create(&result)
        .map_err(translate_persistence_error)?;

    Ok(CreateRequestResponse {
        request_id: persisted.request_id,
        status: result.draft.status.as_str().to_string(),
        message: format!("Created request '{}'", request.title),
        event_id: persisted.event_id,
    })
}

/// Lists tour requests through the search/filter/sort/paginate pipeline.
///
/// # Errors
///
/// Returns an error if a filter parameter is invalid or the query fails.
pub fn list_requests(
    persistence: &mut SqlitePersistence,
    params: &RequestListParams,
) -> Result<ListRequestsResponse, ApiError> {
    let requests: Vec<TourRequest> = persistence
        .list_requests()
        .map_err(translate_persistence_error)?;

    let page: Page<TourRequest> = list_requests_page(requests, params)?;
    let pagination: PageInfo = PageInfo::from_page(&page);

    Ok(ListRequestsResponse {
        requests: page.items.iter().map(RequestInfo::from).collect(),
        pagination,
    })
}

/// Edits an open tour request.
///
/// # Errors
///
/// Returns an error if the request is missing, not open, the patch is
/// invalid, or persistence fails.
pub fn update_request(
    persistence: &mut SqlitePersistence,
    request_id: i64,
    request: &UpdateRequestRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<UpdateRequestResponse, ApiError> {
    let state: RequestState = persistence
        .load_request_state(request_id)
        .map_err(translate_persistence_error)?;

    let result: TransitionResult = apply(
        &state,
        Command::UpdateRequest {
            patch: request.to_patch(),
        },
        authenticated_actor.to_audit_actor(),
        cause,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    Ok(UpdateRequestResponse {
        request: RequestInfo::from(&result.new_state.request),
        message: format!("Updated request {request_id}"),
        event_id: persisted.event_id,
    })
}

/// Soft-cancels a tour request.
///
/// Cancellation marks the request whatever its current status; the
/// document is never removed and an existing booking is left untouched.
///
/// # Errors
///
/// Returns an error if the request is missing or persistence fails.
pub fn cancel_request(
    persistence: &mut SqlitePersistence,
    request_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CancelRequestResponse, ApiError> {
    let state: RequestState = persistence
        .load_request_state(request_id)
        .map_err(translate_persistence_error)?;

    let result: TransitionResult = apply(
        &state,
        Command::CancelRequest,
        authenticated_actor.to_audit_actor(),
        cause,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    Ok(CancelRequestResponse {
        request_id,
        status: result.new_state.request.status.as_str().to_string(),
        message: format!("Cancelled request {request_id}"),
        event_id: persisted.event_id,
    })
}

/// Submits (or resubmits) the calling guide's application to a request.
///
/// Resubmission by the same guide overwrites the earlier bid instead of
/// duplicating it; the application identifier is stable across
/// resubmissions.
///
/// # Errors
///
/// Returns an error if the request is missing or not open, validation
/// fails, or persistence fails.
pub fn submit_application(
    persistence: &mut SqlitePersistence,
    request_id: i64,
    request: &SubmitApplicationRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<SubmitApplicationResponse, ApiError> {
    let state: RequestState = persistence
        .load_request_state(request_id)
        .map_err(translate_persistence_error)?;

    let guide_id: String = authenticated_actor.id.clone();
    let result: TransitionResult = apply(
        &state,
        Command::SubmitApplication {
            guide: GuideProfile::new(
                guide_id.clone(),
                request.guide_name.clone(),
                request.guide_email.clone(),
            ),
            proposed_price: request.proposed_price,
            cover_letter: request.cover_letter.clone(),
        },
        authenticated_actor.to_audit_actor(),
        cause,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    let application_id: i64 = persistence
        .find_application_id(request_id, &guide_id)
        .map_err(translate_persistence_error)?;

    Ok(SubmitApplicationResponse {
        application_id,
        request_id,
        status: String::from("pending"),
        message: format!("Applied to request {request_id}"),
        event_id: persisted.event_id,
    })
}

/// Edits the calling guide's pending application.
///
/// # Errors
///
/// Returns an error if the application is missing, owned by another
/// guide, already resolved, the patch is invalid, or persistence fails.
pub fn edit_application(
    persistence: &mut SqlitePersistence,
    request_id: i64,
    application_id: i64,
    request: &EditApplicationRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<EditApplicationResponse, ApiError> {
    let state: RequestState = persistence
        .load_request_state(request_id)
        .map_err(translate_persistence_error)?;

    let result: TransitionResult = apply(
        &state,
        Command::EditApplication {
            application_id,
            guide_id: authenticated_actor.id.clone(),
            patch: request.to_patch(),
        },
        authenticated_actor.to_audit_actor(),
        cause,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    let application: ApplicationInfo = result
        .new_state
        .find_application(application_id)
        .and_then(ApplicationInfo::from_domain)
        .ok_or_else(|| ApiError::Internal {
            message: format!("Edited application {application_id} missing from state"),
        })?;

    Ok(EditApplicationResponse {
        application,
        message: format!("Updated application {application_id}"),
        event_id: persisted.event_id,
    })
}

/// Lists a request's applications through the pipeline.
///
/// # Errors
///
/// Returns an error if the request is missing or a filter parameter is
/// invalid.
pub fn list_applications(
    persistence: &mut SqlitePersistence,
    request_id: i64,
    params: &ApplicationListParams,
) -> Result<ListApplicationsResponse, ApiError> {
    // Loading through the request asserts the parent exists; applications
    // are never listed outside their request's scope.
    let state: RequestState = persistence
        .load_request_state(request_id)
        .map_err(translate_persistence_error)?;

    let page: Page<Application> = list_applications_page(state.applications, params)?;
    let pagination: PageInfo = PageInfo::from_page(&page);

    let applications: Vec<ApplicationInfo> = page
        .items
        .iter()
        .filter_map(ApplicationInfo::from_domain)
        .collect();

    Ok(ListApplicationsResponse {
        request_id,
        applications,
        pagination,
    })
}

/// Accepts one application: resolves every sibling, stamps the request,
/// and creates the booking, all in one atomic commit.
///
/// Two concurrent acceptance attempts on the same request cannot both
/// succeed; the loser observes an invalid-state error from the store
/// guard.
///
/// # Errors
///
/// Returns an error if the request or application is missing, the
/// request is not open, the application is not pending, or the commit
/// loses a race.
pub fn accept_application(
    persistence: &mut SqlitePersistence,
    request_id: i64,
    application_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<AcceptApplicationResponse, ApiError> {
    let state: RequestState = persistence
        .load_request_state(request_id)
        .map_err(translate_persistence_error)?;

    let result: TransitionResult = apply(
        &state,
        Command::AcceptApplication { application_id },
        authenticated_actor.to_audit_actor(),
        cause,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let agreed_price: f64 = result
        .booking_draft
        .as_ref()
        .map(|draft| draft.agreed_price)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Acceptance produced no booking draft"),
        })?;

    let persisted: PersistTransitionResult = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    let booking_id: i64 = persisted.booking_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Acceptance commit assigned no booking id"),
    })?;

    info!(
        request_id,
        application_id, booking_id, "Accepted application and created booking"
    );

    Ok(AcceptApplicationResponse {
        booking_id,
        request_id,
        application_id,
        agreed_price,
        message: format!("Accepted application {application_id} for request {request_id}"),
        event_id: persisted.event_id,
    })
}

/// Lists bookings through the pipeline.
///
/// # Errors
///
/// Returns an error if a filter parameter is invalid or the query fails.
pub fn list_bookings(
    persistence: &mut SqlitePersistence,
    params: &BookingListParams,
) -> Result<ListBookingsResponse, ApiError> {
    let bookings: Vec<Booking> = persistence
        .list_bookings()
        .map_err(translate_persistence_error)?;

    let page: Page<Booking> = list_bookings_page(bookings, params)?;
    let pagination: PageInfo = PageInfo::from_page(&page);

    Ok(ListBookingsResponse {
        bookings: page.items.iter().map(BookingInfo::from).collect(),
        pagination,
    })
}

/// Records the guide's response to a pending booking.
///
/// # Errors
///
/// Returns an error if the booking is missing, the decision string is
/// invalid, the booking is not pending, or persistence fails.
pub fn guide_respond_booking(
    persistence: &mut SqlitePersistence,
    booking_id: i64,
    request: &GuideRespondBookingRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<GuideRespondBookingResponse, ApiError> {
    let booking: Booking = persistence
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?;

    let decision: BookingDecision =
        BookingDecision::from_str(&request.decision).map_err(translate_domain_error)?;

    let result: BookingTransitionResult = apply_booking(
        &booking,
        Command::GuideRespondBooking { decision },
        authenticated_actor.to_audit_actor(),
        cause,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_booking_transition(&result)
        .map_err(translate_persistence_error)?;

    Ok(GuideRespondBookingResponse {
        booking_id,
        status: result.new_booking.status.as_str().to_string(),
        message: format!("Booking {booking_id} is now {}", result.new_booking.status),
        event_id,
    })
}

/// Cancels a booking on behalf of its tourist, subject to the 24-hour
/// notice window.
///
/// # Errors
///
/// Returns an error if the booking is missing, the caller is not its
/// tourist, the booking is already closed, the notice window has closed,
/// or persistence fails.
pub fn tourist_cancel_booking(
    persistence: &mut SqlitePersistence,
    booking_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TouristCancelBookingResponse, ApiError> {
    let booking: Booking = persistence
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?;

    let result: BookingTransitionResult = apply_booking(
        &booking,
        Command::TouristCancelBooking {
            tourist_id: authenticated_actor.id.clone(),
        },
        authenticated_actor.to_audit_actor(),
        cause,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = persistence
        .persist_booking_transition(&result)
        .map_err(translate_persistence_error)?;

    Ok(TouristCancelBookingResponse {
        booking_id,
        status: result.new_booking.status.as_str().to_string(),
        message: format!("Cancelled booking {booking_id}"),
        event_id,
    })
}
