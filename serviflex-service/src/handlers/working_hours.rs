use crate::dtos::{
    CreateWorkingHoursRequest, CreateWorkingHoursResponse, MessageResponse,
    UpdateWorkingHoursRequest, WorkingHoursResponse,
};
use crate::models::WorkingHours;
use crate::services::scheduling::TimeWindow;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use std::collections::HashSet;

/// Declare one window on several weekdays at once
///
/// Weekdays the professional already has hours for are skipped, as are
/// repeats within the request.
#[utoipa::path(
    post,
    path = "/api/working-hours",
    request_body = CreateWorkingHoursRequest,
    responses(
        (status = 201, description = "Hours created", body = CreateWorkingHoursResponse),
        (status = 400, description = "Invalid times", body = ErrorResponse)
    ),
    tag = "Working hours"
)]
pub async fn create_working_hours(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateWorkingHoursRequest>,
) -> Result<impl IntoResponse, AppError> {
    TimeWindow::parse(&req.start_time, &req.end_time)?;

    let mut taken: HashSet<_> = state
        .repo
        .list_working_hours(&req.professional_id, None)
        .await?
        .into_iter()
        .map(|h| h.weekday)
        .collect();

    let mut created = Vec::new();
    let mut skipped = Vec::new();
    for weekday in req.weekdays {
        if !taken.insert(weekday) {
            skipped.push(weekday);
            continue;
        }
        let hours = WorkingHours::new(
            req.professional_id.clone(),
            weekday,
            req.start_time.trim().to_string(),
            req.end_time.trim().to_string(),
        );
        state.repo.insert_working_hours(&hours).await?;
        created.push(WorkingHoursResponse::from(hours));
    }

    tracing::info!(
        professional_id = %req.professional_id,
        created = created.len(),
        skipped = skipped.len(),
        "Working hours created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateWorkingHoursResponse { created, skipped }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/working-hours/{professional_id}",
    params(("professional_id" = String, Path, description = "Professional id")),
    responses(
        (status = 200, description = "Professional's working hours", body = Vec<WorkingHoursResponse>)
    ),
    tag = "Working hours"
)]
pub async fn list_working_hours(
    State(state): State<AppState>,
    Path(professional_id): Path<String>,
) -> Result<Json<Vec<WorkingHoursResponse>>, AppError> {
    let mut hours = state.repo.list_working_hours(&professional_id, None).await?;
    hours.sort_by(|a, b| (a.weekday, &a.start_time).cmp(&(b.weekday, &b.start_time)));
    Ok(Json(hours.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/api/working-hours/{id}",
    params(("id" = String, Path, description = "Working hours id")),
    request_body = UpdateWorkingHoursRequest,
    responses(
        (status = 200, description = "Hours updated", body = WorkingHoursResponse),
        (status = 400, description = "Invalid times", body = ErrorResponse),
        (status = 404, description = "Working hours not found", body = ErrorResponse),
        (status = 409, description = "Weekday already has working hours", body = ErrorResponse)
    ),
    tag = "Working hours"
)]
pub async fn update_working_hours(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateWorkingHoursRequest>,
) -> Result<Json<WorkingHoursResponse>, AppError> {
    TimeWindow::parse(&req.start_time, &req.end_time)?;

    let mut hours = state
        .repo
        .find_working_hours(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Working hours not found"))?;

    if req.weekday != hours.weekday {
        let taken = state
            .repo
            .list_working_hours(&hours.professional_id, Some(req.weekday))
            .await?
            .iter()
            .any(|other| other.id != hours.id);
        if taken {
            return Err(AppError::conflict(format!(
                "Working hours already declared for {}",
                req.weekday
            )));
        }
    }

    hours.weekday = req.weekday;
    hours.start_time = req.start_time.trim().to_string();
    hours.end_time = req.end_time.trim().to_string();
    hours.available = req.available;

    if !state.repo.replace_working_hours(&hours).await? {
        return Err(AppError::not_found("Working hours not found"));
    }
    Ok(Json(hours.into()))
}

#[utoipa::path(
    delete,
    path = "/api/working-hours/{id}",
    params(("id" = String, Path, description = "Working hours id")),
    responses(
        (status = 200, description = "Hours deleted", body = MessageResponse),
        (status = 404, description = "Working hours not found", body = ErrorResponse)
    ),
    tag = "Working hours"
)]
pub async fn delete_working_hours(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.repo.delete_working_hours(&id).await? {
        return Err(AppError::not_found("Working hours not found"));
    }
    Ok(Json(MessageResponse::new("Working hours deleted")))
}
