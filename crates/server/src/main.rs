// Copyright (C) 2026 TourMatch Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use time::Date;
use tokio::sync::Mutex;
use tour_match_api::{
    AcceptApplicationResponse, ApiError, ApplicationListParams, AuthenticatedActor,
    BookingListParams, CancelRequestResponse, CreateRequestRequest, CreateRequestResponse,
    EditApplicationRequest, EditApplicationResponse, GuideRespondBookingRequest,
    GuideRespondBookingResponse, ListApplicationsResponse, ListBookingsResponse,
    ListRequestsResponse, RequestListParams, Role, SubmitApplicationRequest,
    SubmitApplicationResponse, TouristCancelBookingResponse, UpdateRequestRequest,
    UpdateRequestResponse, accept_application, cancel_request, create_request, edit_application,
    guide_respond_booking, list_applications, list_bookings, list_requests, resolve_actor,
    submit_application, tourist_cancel_booking, update_request,
};
use tour_match_audit::Cause;
use tour_match_persistence::SqlitePersistence;
use tracing::info;

/// TourMatch Server - HTTP server for the TourMatch marketplace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow safe
/// concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the matching lifecycle.
    persistence: Arc<Mutex<SqlitePersistence>>,
}

/// Actor and cause fields carried by every mutating request body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorEnvelope {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor: `tourist` or `guide`.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// API request for creating a tour request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateRequestApiRequest {
    #[serde(flatten)]
    envelope: ActorEnvelope,
    /// Trip title.
    title: String,
    /// Trip destination.
    destination: String,
    /// First day of the trip.
    start_date: Date,
    /// Last day of the trip (inclusive).
    end_date: Date,
    /// The tourist's budget.
    budget: f64,
    /// Number of travellers.
    party_size: u32,
    /// Free-form tour type label.
    tour_type: String,
    /// Languages the guide should speak.
    languages: Vec<String>,
    /// Free-text trip description.
    description: String,
    /// Optional special requirements.
    requirements: Option<String>,
    /// The caller's display name.
    tourist_name: String,
}

/// API request for editing a tour request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateRequestApiRequest {
    #[serde(flatten)]
    envelope: ActorEnvelope,
    /// New title, if provided.
    title: Option<String>,
    /// New destination, if provided.
    destination: Option<String>,
    /// New start date, if provided.
    start_date: Option<Date>,
    /// New end date, if provided.
    end_date: Option<Date>,
    /// New budget, if provided.
    budget: Option<f64>,
    /// New party size, if provided.
    party_size: Option<u32>,
    /// New tour type, if provided.
    tour_type: Option<String>,
    /// New language list, if provided.
    languages: Option<Vec<String>>,
    /// New description, if provided.
    description: Option<String>,
    /// New requirements text, if provided.
    requirements: Option<String>,
}

/// API request carrying only actor and cause fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorOnlyApiRequest {
    #[serde(flatten)]
    envelope: ActorEnvelope,
}

/// API request for submitting an application.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SubmitApplicationApiRequest {
    #[serde(flatten)]
    envelope: ActorEnvelope,
    /// The caller's display name.
    guide_name: String,
    /// The caller's contact email.
    guide_email: String,
    /// The proposed price.
    proposed_price: f64,
    /// The guide's pitch.
    cover_letter: String,
}

/// API request for editing an application.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EditApplicationApiRequest {
    #[serde(flatten)]
    envelope: ActorEnvelope,
    /// New proposed price, if provided.
    proposed_price: Option<f64>,
    /// New cover letter, if provided.
    cover_letter: Option<String>,
}

/// API request for a guide's booking response.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct GuideRespondApiRequest {
    #[serde(flatten)]
    envelope: ActorEnvelope,
    /// The decision: `upcoming` (confirm) or `cancelled` (decline).
    decision: String,
}

/// Query parameters for request listings.
#[derive(Debug, Clone, Default, Deserialize)]
struct ListRequestsQuery {
    search: Option<String>,
    status: Option<String>,
    destination: Option<String>,
    tour_type: Option<String>,
    min_budget: Option<f64>,
    max_budget: Option<f64>,
    start_date_from: Option<String>,
    start_date_to: Option<String>,
    sort_by: Option<String>,
    sort_direction: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

impl ListRequestsQuery {
    fn into_params(self) -> RequestListParams {
        RequestListParams {
            search: self.search,
            status: self.status,
            destination: self.destination,
            tour_type: self.tour_type,
            min_budget: self.min_budget,
            max_budget: self.max_budget,
            start_date_from: self.start_date_from,
            start_date_to: self.start_date_to,
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Query parameters for application listings.
#[derive(Debug, Clone, Default, Deserialize)]
struct ListApplicationsQuery {
    search: Option<String>,
    status: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    sort_by: Option<String>,
    sort_direction: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

impl ListApplicationsQuery {
    fn into_params(self) -> ApplicationListParams {
        ApplicationListParams {
            search: self.search,
            status: self.status,
            min_price: self.min_price,
            max_price: self.max_price,
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Query parameters for booking listings.
#[derive(Debug, Clone, Default, Deserialize)]
struct ListBookingsQuery {
    search: Option<String>,
    status: Option<String>,
    tourist_id: Option<String>,
    guide_id: Option<String>,
    start_date_from: Option<String>,
    start_date_to: Option<String>,
    sort_by: Option<String>,
    sort_direction: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

impl ListBookingsQuery {
    fn into_params(self) -> BookingListParams {
        BookingListParams {
            search: self.search,
            status: self.status,
            tourist_id: self.tourist_id,
            guide_id: self.guide_id,
            start_date_from: self.start_date_from,
            start_date_to: self.start_date_to,
            sort_by: self.sort_by,
            sort_direction: self.sort_direction,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// The stable error kind.
    error: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The stable error kind.
    kind: String,
    /// The error message.
    message: String,
}

impl HttpError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: String::from("invalid_input"),
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.kind,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidState { .. } => StatusCode::CONFLICT,
            ApiError::PolicyViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Resolves the envelope into an authenticated actor and cause.
fn resolve_envelope(envelope: ActorEnvelope) -> Result<(AuthenticatedActor, Cause), HttpError> {
    let role: Role = Role::from_str(&envelope.actor_role)
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let actor: AuthenticatedActor =
        resolve_actor(envelope.actor_id, role).map_err(HttpError::from)?;
    let cause: Cause = Cause::new(envelope.cause_id, envelope.cause_description);
    Ok((actor, cause))
}

/// Handler for POST `/requests`.
async fn handle_create_request(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateRequestApiRequest>,
) -> Result<Json<CreateRequestResponse>, HttpError> {
    info!(
        actor_id = %req.envelope.actor_id,
        title = %req.title,
        destination = %req.destination,
        "Handling create_request"
    );

    let (actor, cause) = resolve_envelope(req.envelope)?;
    let request: CreateRequestRequest = CreateRequestRequest {
        title: req.title,
        destination: req.destination,
        start_date: req.start_date,
        end_date: req.end_date,
        budget: req.budget,
        party_size: req.party_size,
        tour_type: req.tour_type,
        languages: req.languages,
        description: req.description,
        requirements: req.requirements,
        tourist_name: req.tourist_name,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateRequestResponse =
        create_request(&mut persistence, &request, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/requests`.
async fn handle_list_requests(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListRequestsQuery>,
) -> Result<Json<ListRequestsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListRequestsResponse =
        list_requests(&mut persistence, &query.into_params())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/requests/{id}`.
async fn handle_update_request(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
    Json(req): Json<UpdateRequestApiRequest>,
) -> Result<Json<UpdateRequestResponse>, HttpError> {
    let (actor, cause) = resolve_envelope(req.envelope.clone())?;
    let patch: UpdateRequestRequest = UpdateRequestRequest {
        title: req.title,
        destination: req.destination,
        start_date: req.start_date,
        end_date: req.end_date,
        budget: req.budget,
        party_size: req.party_size,
        tour_type: req.tour_type,
        languages: req.languages,
        description: req.description,
        requirements: req.requirements,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateRequestResponse =
        update_request(&mut persistence, request_id, &patch, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/requests/{id}/cancel`.
async fn handle_cancel_request(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
    Json(req): Json<ActorOnlyApiRequest>,
) -> Result<Json<CancelRequestResponse>, HttpError> {
    let (actor, cause) = resolve_envelope(req.envelope)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CancelRequestResponse =
        cancel_request(&mut persistence, request_id, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/requests/{id}/applications`.
async fn handle_submit_application(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
    Json(req): Json<SubmitApplicationApiRequest>,
) -> Result<Json<SubmitApplicationResponse>, HttpError> {
    info!(
        actor_id = %req.envelope.actor_id,
        request_id,
        proposed_price = req.proposed_price,
        "Handling submit_application"
    );

    let (actor, cause) = resolve_envelope(req.envelope)?;
    let request: SubmitApplicationRequest = SubmitApplicationRequest {
        guide_name: req.guide_name,
        guide_email: req.guide_email,
        proposed_price: req.proposed_price,
        cover_letter: req.cover_letter,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitApplicationResponse =
        submit_application(&mut persistence, request_id, &request, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/requests/{id}/applications`.
async fn handle_list_applications(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<ListApplicationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListApplicationsResponse =
        list_applications(&mut persistence, request_id, &query.into_params())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/requests/{id}/applications/{application_id}`.
async fn handle_edit_application(
    AxumState(app_state): AxumState<AppState>,
    Path((request_id, application_id)): Path<(i64, i64)>,
    Json(req): Json<EditApplicationApiRequest>,
) -> Result<Json<EditApplicationResponse>, HttpError> {
    let (actor, cause) = resolve_envelope(req.envelope)?;
    let patch: EditApplicationRequest = EditApplicationRequest {
        proposed_price: req.proposed_price,
        cover_letter: req.cover_letter,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: EditApplicationResponse = edit_application(
        &mut persistence,
        request_id,
        application_id,
        &patch,
        &actor,
        cause,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/requests/{id}/applications/{application_id}/accept`.
async fn handle_accept_application(
    AxumState(app_state): AxumState<AppState>,
    Path((request_id, application_id)): Path<(i64, i64)>,
    Json(req): Json<ActorOnlyApiRequest>,
) -> Result<Json<AcceptApplicationResponse>, HttpError> {
    info!(
        actor_id = %req.envelope.actor_id,
        request_id,
        application_id,
        "Handling accept_application"
    );

    let (actor, cause) = resolve_envelope(req.envelope)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: AcceptApplicationResponse =
        accept_application(&mut persistence, request_id, application_id, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/bookings`.
async fn handle_list_bookings(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListBookingsResponse =
        list_bookings(&mut persistence, &query.into_params())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/respond`.
async fn handle_guide_respond(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(req): Json<GuideRespondApiRequest>,
) -> Result<Json<GuideRespondBookingResponse>, HttpError> {
    let (actor, cause) = resolve_envelope(req.envelope)?;
    let request: GuideRespondBookingRequest = GuideRespondBookingRequest {
        decision: req.decision,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: GuideRespondBookingResponse =
        guide_respond_booking(&mut persistence, booking_id, &request, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/cancel`.
async fn handle_tourist_cancel(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    Json(req): Json<ActorOnlyApiRequest>,
) -> Result<Json<TouristCancelBookingResponse>, HttpError> {
    let (actor, cause) = resolve_envelope(req.envelope)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TouristCancelBookingResponse =
        tourist_cancel_booking(&mut persistence, booking_id, &actor, cause)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/health`.
async fn handle_health() -> StatusCode {
    StatusCode::OK
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/requests",
            post(handle_create_request).get(handle_list_requests),
        )
        .route("/requests/{id}", patch(handle_update_request))
        .route("/requests/{id}/cancel", post(handle_cancel_request))
        .route(
            "/requests/{id}/applications",
            post(handle_submit_application).get(handle_list_applications),
        )
        .route(
            "/requests/{id}/applications/{application_id}",
            patch(handle_edit_application),
        )
        .route(
            "/requests/{id}/applications/{application_id}/accept",
            post(handle_accept_application),
        )
        .route("/bookings", get(handle_list_bookings))
        .route("/bookings/{id}/respond", post(handle_guide_respond))
        .route("/bookings/{id}/cancel", post(handle_tourist_cancel))
        .with_state(app_state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();

    let persistence: SqlitePersistence = match &args.database {
        Some(path) => {
            info!(database = %path, "Opening database");
            match SqlitePersistence::new_with_file(path) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Failed to open database {path}: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            info!("Using in-memory database");
            match SqlitePersistence::new_in_memory() {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Failed to create in-memory database: {e}");
                    std::process::exit(1);
                }
            }
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };
    let app: Router = build_router(app_state);

    let addr: String = format!("0.0.0.0:{}", args.port);
    info!(addr = %addr, "Starting TourMatch server");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
