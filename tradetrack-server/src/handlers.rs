use crate::error::{ServerError, ServerResult};
use crate::models::{ApiResponse, HealthResponse, MatchRequest, SearchParams, VerifyRequest, VerifyResponse};
use crate::persistence::save_after_write;
use crate::state::AppState;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{debug, info};
use tradetrack_core::{
    clock, lookup, registration, verification, ClockStatus, EmployeeDirectory, EmployeeUpdate, EmployeeView,
    MatchResult, NewEmployee, TimeEntry,
};

/// Shortest prefix accepted by the search endpoint.
pub const MIN_SEARCH_PREFIX_LEN: usize = 3;

type ApiJson<T> = Json<ApiResponse<T>>;

/// Handler for `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        employees: state.directory.len(),
    }))
}

/// Handler for `POST /employees`
pub async fn register_employee(
    State(state): State<AppState>,
    Json(payload): Json<NewEmployee>,
) -> ServerResult<impl IntoResponse> {
    info!(employee_id = %payload.employee_id, "Received request to register employee");
    if payload.employee_id.trim().is_empty() || payload.name.trim().is_empty() {
        return Err(ServerError::BadRequest("employee_id and name must not be empty".to_string()));
    }
    let view = registration::register_employee(state.directory.as_ref(), payload, &state.matching)?;
    save_after_write(&state).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(view))))
}

/// Handler for `GET /employees`
pub async fn list_employees(State(state): State<AppState>) -> ServerResult<ApiJson<Vec<EmployeeView>>> {
    let views = lookup::list_employees(state.directory.as_ref())?;
    debug!(count = views.len(), "Returning employee list");
    Ok(Json(ApiResponse::ok(views)))
}

/// Handler for `GET /employees/search?prefix=`
pub async fn search_employees(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ServerResult<ApiJson<Vec<EmployeeView>>> {
    let prefix = params.prefix.trim();
    if prefix.chars().count() < MIN_SEARCH_PREFIX_LEN {
        return Err(ServerError::BadRequest(format!(
            "Search prefix must be at least {} characters",
            MIN_SEARCH_PREFIX_LEN
        )));
    }
    let views = lookup::search_employees(state.directory.as_ref(), prefix)?;
    Ok(Json(ApiResponse::ok(views)))
}

/// Handler for `GET /employees/:employee_id`
pub async fn get_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ServerResult<ApiJson<EmployeeView>> {
    let view = lookup::get_employee(state.directory.as_ref(), &employee_id)?;
    Ok(Json(ApiResponse::ok(view)))
}

/// Handler for `PATCH /employees/:employee_id`
pub async fn update_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> ServerResult<ApiJson<EmployeeView>> {
    if payload.is_empty() {
        return Err(ServerError::BadRequest("Update contains no fields".to_string()));
    }
    if payload.name.as_deref().map_or(false, |n| n.trim().is_empty()) {
        return Err(ServerError::BadRequest("name must not be empty".to_string()));
    }
    let view = registration::update_employee(state.directory.as_ref(), &employee_id, payload, &state.matching)?;
    save_after_write(&state).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// Handler for `DELETE /employees/:employee_id`
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ServerResult<ApiJson<EmployeeView>> {
    let view = lookup::get_employee(state.directory.as_ref(), &employee_id)?;
    registration::remove_employee(state.directory.as_ref(), &employee_id)?;
    save_after_write(&state).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// Handler for `POST /employees/verify`
pub async fn verify_employee(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> ServerResult<ApiJson<VerifyResponse>> {
    let score = verification::verify_face(
        state.directory.as_ref(),
        &payload.employee_id,
        &payload.embedding,
        &state.matching,
    )?;
    Ok(Json(ApiResponse::ok(VerifyResponse {
        employee_id: payload.employee_id,
        score,
        threshold: state.matching.match_threshold,
    })))
}

/// Handler for `POST /employees/match`
pub async fn match_employee(
    State(state): State<AppState>,
    Json(payload): Json<MatchRequest>,
) -> ServerResult<ApiJson<MatchResult>> {
    let found = verification::find_best_match(state.directory.as_ref(), &payload.embedding, &state.matching)?;
    Ok(Json(ApiResponse::ok(found)))
}

/// Handler for `POST /clock/:employee_id/in`
///
/// Only registered employees can open a shift.
pub async fn clock_in(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ServerResult<ApiJson<TimeEntry>> {
    state.directory.get_by_id(&employee_id)?;
    let entry = clock::clock_in(state.time_entries.as_ref(), &employee_id)?;
    save_after_write(&state).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// Handler for `POST /clock/:employee_id/out`
pub async fn clock_out(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ServerResult<ApiJson<TimeEntry>> {
    let entry = clock::clock_out(state.time_entries.as_ref(), &employee_id)?;
    save_after_write(&state).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// Handler for `GET /clock/:employee_id/status`
pub async fn clock_status(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ServerResult<ApiJson<ClockStatus>> {
    let status = clock::clock_status(state.time_entries.as_ref(), &employee_id)?;
    Ok(Json(ApiResponse::ok(status)))
}

/// Handler for `GET /clock/:employee_id/entries`
pub async fn shift_history(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> ServerResult<ApiJson<Vec<TimeEntry>>> {
    let entries = clock::shift_history(state.time_entries.as_ref(), &employee_id)?;
    Ok(Json(ApiResponse::ok(entries)))
}
