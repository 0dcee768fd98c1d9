// Copyright (C) 2026 Fred Clausen
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

mod seed;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use bloom::{InMemoryCatalog, Scheduler};
use bloom_api::{
    ApiError, AssignStaffRequest, AuthenticatedActor, AvailabilityResponse,
    BookingHistoryResponse, BookingInfo, CreateBookingRequest, DayScheduleResponse,
    ListBookingsRequest, ListBookingsResponse, ListServicesResponse, SetShiftRequest,
    SetShiftResponse, StaffDayRequest, StaffInfo, UpdateBookingStatusRequest,
    UpdatePaymentRequest, assign_staff, authenticate_stub, booking_history, create_booking,
    day_schedule, get_availability, get_booking, get_staff, list_bookings, list_services,
    set_shift, update_booking_payment, update_booking_status,
};
use bloom_audit::Cause;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tracing::{info, warn};

use crate::seed::Seed;

/// Bloom Server - HTTP server for the Bloom booking platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// JSON file holding the catalog and initial shifts. Without it the
    /// server starts with an empty catalog.
    #[arg(short, long)]
    seed: Option<std::path::PathBuf>,
}

/// Application state shared across handlers.
///
/// The scheduler serializes conflicting work internally, so handlers
/// share it without an outer lock.
#[derive(Clone)]
struct AppState {
    /// The scheduler holding the catalog, calendar, and bookings.
    scheduler: Arc<Scheduler<InMemoryCatalog>>,
}

/// API request for creating a booking.
///
/// This includes authentication information in addition to the booking data.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateBookingApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The actor's role.
    actor_role: String,
    /// Optional cause ID for audit purposes.
    #[serde(default)]
    cause_id: Option<String>,
    /// Optional cause description for audit purposes.
    #[serde(default)]
    cause_description: Option<String>,
    /// The customer. Ignored for clients, who always book for themselves.
    #[serde(default)]
    customer_id: String,
    /// The requested services, in order.
    service_ids: Vec<String>,
    /// The date (`YYYY-MM-DD`).
    date: String,
    /// The start time (`HH:MM`).
    start_time: String,
    /// The requested staff member.
    #[serde(default)]
    staff_id: Option<String>,
    /// The payment method.
    #[serde(default)]
    payment_method: Option<String>,
    /// Customer notes.
    #[serde(default)]
    notes: Option<String>,
}

/// API request for changing a booking's status.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateStatusApiRequest {
    actor_id: String,
    actor_role: String,
    #[serde(default)]
    cause_id: Option<String>,
    #[serde(default)]
    cause_description: Option<String>,
    /// The requested status.
    status: String,
}

/// API request for changing a booking's payment status.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdatePaymentApiRequest {
    actor_id: String,
    actor_role: String,
    #[serde(default)]
    cause_id: Option<String>,
    #[serde(default)]
    cause_description: Option<String>,
    /// The requested payment status.
    payment_status: String,
}

/// API request for assigning staff to a booking.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AssignStaffApiRequest {
    actor_id: String,
    actor_role: String,
    #[serde(default)]
    cause_id: Option<String>,
    #[serde(default)]
    cause_description: Option<String>,
    /// The staff member to assign.
    staff_id: String,
}

/// API request for opening or closing a shift.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetShiftApiRequest {
    actor_id: String,
    actor_role: String,
    #[serde(default)]
    cause_id: Option<String>,
    #[serde(default)]
    cause_description: Option<String>,
    staff_id: String,
    date: String,
    shift: String,
    open: bool,
}

/// Query parameters identifying the caller of a read.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    actor_id: String,
    actor_role: String,
}

/// Query parameters for listing bookings.
#[derive(Debug, Deserialize)]
struct ListBookingsQuery {
    actor_id: String,
    actor_role: String,
    status: Option<String>,
    payment_status: Option<String>,
    staff_id: Option<String>,
    customer_id: Option<String>,
    search: Option<String>,
    date_from: Option<String>,
    date_to: Option<String>,
}

/// Query parameters for the staff day view.
#[derive(Debug, Deserialize)]
struct ScheduleQuery {
    actor_id: String,
    actor_role: String,
    staff_id: String,
    date: String,
}

/// Query parameters for availability.
#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    staff_id: String,
    date: String,
}

/// Query parameters for listing services.
#[derive(Debug, Deserialize)]
struct ListServicesQuery {
    category: Option<String>,
}

/// API response for errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::SlotConflict { .. } | ApiError::InvalidTransition { .. } => {
                StatusCode::CONFLICT
            }
            ApiError::ValidationError { .. } | ApiError::InvalidInput { .. } => {
                StatusCode::BAD_REQUEST
            }
        };
        warn!(status = status.as_u16(), error = %err, "Request rejected");
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Authenticates the caller named in a request.
fn authenticate(actor_id: &str, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    authenticate_stub(actor_id, actor_role).map_err(|e| HttpError::from(ApiError::from(e)))
}

/// Builds the audit cause for a write, falling back to a generic one.
fn cause_from(cause_id: Option<String>, cause_description: Option<String>) -> Cause {
    Cause::new(
        cause_id.unwrap_or_else(|| String::from("http-request")),
        cause_description.unwrap_or_else(|| String::from("HTTP request")),
    )
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Handler for POST `/bookings` endpoint.
///
/// Allocates a slot and creates a booking.
async fn handle_create_booking(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateBookingApiRequest>,
) -> Result<(StatusCode, Json<BookingInfo>), HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        date = %req.date,
        start_time = %req.start_time,
        "Handling create_booking request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = cause_from(req.cause_id, req.cause_description);

    let request: CreateBookingRequest = CreateBookingRequest {
        customer_id: req.customer_id,
        service_ids: req.service_ids,
        date: req.date,
        start_time: req.start_time,
        staff_id: req.staff_id,
        payment_method: req.payment_method,
        notes: req.notes,
    };

    let booking: BookingInfo =
        create_booking(&app_state.scheduler, &request, &actor, cause, today())?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Handler for GET `/bookings` endpoint.
async fn handle_list_bookings(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&query.actor_id, &query.actor_role)?;
    let request: ListBookingsRequest = ListBookingsRequest {
        status: query.status,
        payment_status: query.payment_status,
        staff_id: query.staff_id,
        customer_id: query.customer_id,
        search: query.search,
        date_from: query.date_from,
        date_to: query.date_to,
    };
    Ok(Json(list_bookings(&app_state.scheduler, &request, &actor)?))
}

/// Handler for GET `/bookings/{id}` endpoint.
async fn handle_get_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<BookingInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&query.actor_id, &query.actor_role)?;
    Ok(Json(get_booking(&app_state.scheduler, &booking_id, &actor)?))
}

/// Handler for PATCH `/bookings/{id}/status` endpoint.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<String>,
    Json(req): Json<UpdateStatusApiRequest>,
) -> Result<Json<BookingInfo>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        booking_id = %booking_id,
        status = %req.status,
        "Handling update_status request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = cause_from(req.cause_id, req.cause_description);
    let request: UpdateBookingStatusRequest = UpdateBookingStatusRequest {
        booking_id,
        status: req.status,
    };
    Ok(Json(update_booking_status(
        &app_state.scheduler,
        &request,
        &actor,
        cause,
    )?))
}

/// Handler for PATCH `/bookings/{id}/payment` endpoint.
async fn handle_update_payment(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<String>,
    Json(req): Json<UpdatePaymentApiRequest>,
) -> Result<Json<BookingInfo>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        booking_id = %booking_id,
        payment_status = %req.payment_status,
        "Handling update_payment request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = cause_from(req.cause_id, req.cause_description);
    let request: UpdatePaymentRequest = UpdatePaymentRequest {
        booking_id,
        payment_status: req.payment_status,
    };
    Ok(Json(update_booking_payment(
        &app_state.scheduler,
        &request,
        &actor,
        cause,
    )?))
}

/// Handler for PATCH `/bookings/{id}/staff` endpoint.
async fn handle_assign_staff(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<String>,
    Json(req): Json<AssignStaffApiRequest>,
) -> Result<Json<BookingInfo>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        booking_id = %booking_id,
        staff_id = %req.staff_id,
        "Handling assign_staff request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = cause_from(req.cause_id, req.cause_description);
    let request: AssignStaffRequest = AssignStaffRequest {
        booking_id,
        staff_id: req.staff_id,
    };
    Ok(Json(assign_staff(
        &app_state.scheduler,
        &request,
        &actor,
        cause,
    )?))
}

/// Handler for GET `/bookings/{id}/history` endpoint.
async fn handle_booking_history(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<BookingHistoryResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&query.actor_id, &query.actor_role)?;
    Ok(Json(booking_history(
        &app_state.scheduler,
        &booking_id,
        &actor,
    )?))
}

/// Handler for PUT `/schedule/shifts` endpoint.
///
/// Opens or closes one shift for a staff member on a date.
async fn handle_set_shift(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SetShiftApiRequest>,
) -> Result<Json<SetShiftResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        staff_id = %req.staff_id,
        date = %req.date,
        shift = %req.shift,
        open = req.open,
        "Handling set_shift request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = cause_from(req.cause_id, req.cause_description);
    let request: SetShiftRequest = SetShiftRequest {
        staff_id: req.staff_id,
        date: req.date,
        shift: req.shift,
        open: req.open,
    };
    Ok(Json(set_shift(
        &app_state.scheduler,
        &request,
        &actor,
        cause,
        today(),
    )?))
}

/// Handler for GET `/schedule` endpoint.
async fn handle_day_schedule(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<DayScheduleResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&query.actor_id, &query.actor_role)?;
    let request: StaffDayRequest = StaffDayRequest {
        staff_id: query.staff_id,
        date: query.date,
    };
    Ok(Json(day_schedule(&app_state.scheduler, &request, &actor)?))
}

/// Handler for GET `/availability` endpoint.
async fn handle_availability(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    let request: StaffDayRequest = StaffDayRequest {
        staff_id: query.staff_id,
        date: query.date,
    };
    Ok(Json(get_availability(&app_state.scheduler, &request)?))
}

/// Handler for GET `/services` endpoint.
async fn handle_list_services(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListServicesQuery>,
) -> Result<Json<ListServicesResponse>, HttpError> {
    Ok(Json(list_services(
        &app_state.scheduler,
        query.category.as_deref(),
    )?))
}

/// Handler for GET `/staff/{id}` endpoint.
async fn handle_get_staff(
    AxumState(app_state): AxumState<AppState>,
    Path(staff_id): Path<String>,
) -> Result<Json<StaffInfo>, HttpError> {
    Ok(Json(get_staff(&app_state.scheduler, &staff_id)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/bookings",
            post(handle_create_booking).get(handle_list_bookings),
        )
        .route("/bookings/{id}", get(handle_get_booking))
        .route("/bookings/{id}/status", patch(handle_update_status))
        .route("/bookings/{id}/payment", patch(handle_update_payment))
        .route("/bookings/{id}/staff", patch(handle_assign_staff))
        .route("/bookings/{id}/history", get(handle_booking_history))
        .route("/schedule/shifts", put(handle_set_shift))
        .route("/schedule", get(handle_day_schedule))
        .route("/availability", get(handle_availability))
        .route("/services", get(handle_list_services))
        .route("/staff/{id}", get(handle_get_staff))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Bloom Server");

    let seed: Seed = if let Some(path) = &args.seed {
        info!("Loading seed from: {}", path.display());
        Seed::from_file(path)?
    } else {
        info!("No seed given, starting with an empty catalog");
        Seed::default()
    };

    let app_state: AppState = AppState {
        scheduler: Arc::new(seed.into_scheduler()?),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
