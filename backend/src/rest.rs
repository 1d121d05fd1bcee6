//! HTTP surface of the leave planner.
//!
//! Every operation is request-scoped: the calendar travels in the
//! request body and the mutated calendar travels back in the response,
//! so the service keeps no calendar state between requests.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::{
    CalendarService, FixedDateHolidayProvider, HolidayService, LeaveService, PlannerError,
};
use shared::{
    AddPublicHolidaysRequest, CountryHolidaysRequest, DeletePublicHolidayRequest,
    LeaveRangeRequest, PlannedLeaveRequest,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub calendar_service: CalendarService,
    pub holiday_service: HolidayService,
    pub leave_service: LeaveService,
}

impl AppState {
    /// Create application state with the built-in holiday provider.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            calendar_service: CalendarService::new(),
            holiday_service: HolidayService::new(Arc::new(FixedDateHolidayProvider::new())),
            leave_service: LeaveService::new(),
        }
    }
}

/// Query parameters for calendar generation.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub start_date: Option<chrono::NaiveDate>,
    pub work_week: Option<u8>,
    pub leave_balance: Option<i32>,
    pub holiday_country: Option<String>,
}

/// Build the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar", get(get_calendar))
        .route("/calendar/holidays", post(add_holidays))
        .route("/calendar/holidays/country", post(add_country_holidays))
        .route("/calendar/holidays/delete", post(delete_holiday))
        .route("/calendar/leave", post(plan_leave))
        .route("/calendar/leave/cancel", post(cancel_leave))
        .route("/calendar/preferred", post(mark_preferred))
        .route("/calendar/unpreferred", post(mark_unpreferred))
}

/// GET /calendar: generate a fresh calendar, optionally annotated with
/// a country's public holidays.
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> impl IntoResponse {
    info!("GET /calendar - query: {:?}", query);

    let work_week = query.work_week.unwrap_or(state.config.default_work_week);
    let leave_balance = query
        .leave_balance
        .unwrap_or(state.config.default_leave_balance);

    let mut calendar = state
        .calendar_service
        .generate(query.start_date, work_week, leave_balance);

    if let Some(country) = &query.holiday_country {
        if let Err(e) = state
            .holiday_service
            .add_country_holidays(&mut calendar, country)
        {
            return error_response(e);
        }
    }

    (StatusCode::OK, Json(calendar)).into_response()
}

/// POST /calendar/holidays: annotate with an explicit holiday list.
pub async fn add_holidays(
    State(state): State<AppState>,
    Json(request): Json<AddPublicHolidaysRequest>,
) -> impl IntoResponse {
    info!(
        "POST /calendar/holidays - {} entries",
        request.holidays.len()
    );

    let mut calendar = request.calendar;
    state
        .holiday_service
        .add_holidays(&mut calendar, &request.holidays);
    (StatusCode::OK, Json(calendar)).into_response()
}

/// POST /calendar/holidays/country: annotate by country identifier.
pub async fn add_country_holidays(
    State(state): State<AppState>,
    Json(request): Json<CountryHolidaysRequest>,
) -> impl IntoResponse {
    info!(
        "POST /calendar/holidays/country - country: {:?}",
        request.holiday_country
    );

    let mut calendar = request.calendar;
    match state
        .holiday_service
        .add_country_holidays(&mut calendar, &request.holiday_country)
    {
        Ok(_) => (StatusCode::OK, Json(calendar)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /calendar/holidays/delete: remove one public holiday.
pub async fn delete_holiday(
    State(state): State<AppState>,
    Json(request): Json<DeletePublicHolidayRequest>,
) -> impl IntoResponse {
    info!(
        "POST /calendar/holidays/delete - date: {}",
        request.holiday_date
    );

    let mut calendar = request.calendar;
    match state
        .holiday_service
        .delete_holiday(&mut calendar, request.holiday_date)
    {
        Ok(()) => (StatusCode::OK, Json(calendar)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /calendar/leave: plan leave across a range.
pub async fn plan_leave(
    State(state): State<AppState>,
    Json(request): Json<PlannedLeaveRequest>,
) -> impl IntoResponse {
    info!(
        "POST /calendar/leave - {}..={}",
        request.from_date, request.to_date
    );

    let mut calendar = request.calendar;
    match state.leave_service.plan_leave(
        &mut calendar,
        request.from_date,
        request.to_date,
        request.leave_reason.as_deref(),
    ) {
        Ok(_) => (StatusCode::OK, Json(calendar)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /calendar/leave/cancel: cancel leave across a range.
pub async fn cancel_leave(
    State(state): State<AppState>,
    Json(request): Json<LeaveRangeRequest>,
) -> impl IntoResponse {
    info!(
        "POST /calendar/leave/cancel - {}..={}",
        request.from_date, request.to_date
    );

    let mut calendar = request.calendar;
    match state
        .leave_service
        .cancel_leave(&mut calendar, request.from_date, request.to_date)
    {
        Ok(_) => (StatusCode::OK, Json(calendar)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /calendar/preferred: mark a preferred leave period.
pub async fn mark_preferred(
    State(state): State<AppState>,
    Json(request): Json<LeaveRangeRequest>,
) -> impl IntoResponse {
    info!(
        "POST /calendar/preferred - {}..={}",
        request.from_date, request.to_date
    );

    let mut calendar = request.calendar;
    match state
        .leave_service
        .mark_preferred(&mut calendar, request.from_date, request.to_date)
    {
        Ok(_) => (StatusCode::OK, Json(calendar)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /calendar/unpreferred: mark an unpreferred leave period.
pub async fn mark_unpreferred(
    State(state): State<AppState>,
    Json(request): Json<LeaveRangeRequest>,
) -> impl IntoResponse {
    info!(
        "POST /calendar/unpreferred - {}..={}",
        request.from_date, request.to_date
    );

    let mut calendar = request.calendar;
    match state
        .leave_service
        .mark_unpreferred(&mut calendar, request.from_date, request.to_date)
    {
        Ok(_) => (StatusCode::OK, Json(calendar)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Map a rejected operation to an HTTP response. The request's calendar
/// is never echoed back on failure; the client keeps its own copy.
fn error_response(err: PlannerError) -> Response {
    let status = match err {
        PlannerError::DateNotFound(_) | PlannerError::NoHolidayOnDate(_) => StatusCode::NOT_FOUND,
        PlannerError::InvalidRange { .. }
        | PlannerError::InsufficientBalance { .. }
        | PlannerError::UnsupportedCountry(_) => StatusCode::BAD_REQUEST,
    };
    warn!("Rejected operation: {}", err);
    (status, err.to_string()).into_response()
}
