//! Revenue, rating and monthly booking reports for professionals and
//! establishments.

use crate::dtos::{MonthlyAppointmentsReport, RatingReport, RevenueReport};
use crate::services::reports::{appointments_per_month, rating_summary, revenue};
use crate::services::{AppointmentQuery, RatingQuery};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Duration, Utc};
use service_core::error::AppError;

async fn monthly_report(
    state: &AppState,
    query: AppointmentQuery,
) -> Result<Json<MonthlyAppointmentsReport>, AppError> {
    let now = Utc::now();
    // Twelve calendar months never span more than 366 days; future bookings
    // are not counted.
    let query = query.between(now - Duration::days(366), now);
    let appointments = state.repo.query_appointments(&query).await?;
    Ok(Json(MonthlyAppointmentsReport {
        months: appointments_per_month(&appointments, now, state.config.schedule.utc_offset),
    }))
}

#[utoipa::path(
    get,
    path = "/api/reports/professionals/{id}/revenue",
    params(("id" = String, Path, description = "Professional id")),
    responses((status = 200, description = "Revenue from the professional's appointments", body = RevenueReport)),
    tag = "Reports"
)]
pub async fn professional_revenue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RevenueReport>, AppError> {
    let appointments = state
        .repo
        .query_appointments(&AppointmentQuery::for_professional(&id))
        .await?;
    let procedures = state.repo.list_procedures(Some(&id)).await?;
    Ok(Json(revenue(&appointments, &procedures).into()))
}

#[utoipa::path(
    get,
    path = "/api/reports/professionals/{id}/ratings",
    params(("id" = String, Path, description = "Professional id")),
    responses((status = 200, description = "Ratings received by the professional", body = RatingReport)),
    tag = "Reports"
)]
pub async fn professional_ratings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RatingReport>, AppError> {
    let ratings = state
        .repo
        .query_ratings(&RatingQuery::for_professional(&id))
        .await?;
    Ok(Json(rating_summary(ratings).into()))
}

#[utoipa::path(
    get,
    path = "/api/reports/professionals/{id}/appointments-per-month",
    params(("id" = String, Path, description = "Professional id")),
    responses((status = 200, description = "Appointments per month over the last twelve months", body = MonthlyAppointmentsReport)),
    tag = "Reports"
)]
pub async fn professional_appointments_per_month(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MonthlyAppointmentsReport>, AppError> {
    monthly_report(&state, AppointmentQuery::for_professional(&id)).await
}

/// Each appointment is priced by its own professional's procedure.
#[utoipa::path(
    get,
    path = "/api/reports/establishments/{id}/revenue",
    params(("id" = String, Path, description = "Establishment id")),
    responses((status = 200, description = "Revenue from the establishment's appointments", body = RevenueReport)),
    tag = "Reports"
)]
pub async fn establishment_revenue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RevenueReport>, AppError> {
    let appointments = state
        .repo
        .query_appointments(&AppointmentQuery::for_establishment(&id))
        .await?;
    let procedures = state.repo.list_procedures(None).await?;
    Ok(Json(revenue(&appointments, &procedures).into()))
}

#[utoipa::path(
    get,
    path = "/api/reports/establishments/{id}/ratings",
    params(("id" = String, Path, description = "Establishment id")),
    responses((status = 200, description = "Ratings linked to the establishment", body = RatingReport)),
    tag = "Reports"
)]
pub async fn establishment_ratings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RatingReport>, AppError> {
    let ratings = state
        .repo
        .query_ratings(&RatingQuery::for_establishment(&id))
        .await?;
    Ok(Json(rating_summary(ratings).into()))
}

#[utoipa::path(
    get,
    path = "/api/reports/establishments/{id}/appointments-per-month",
    params(("id" = String, Path, description = "Establishment id")),
    responses((status = 200, description = "Appointments per month over the last twelve months", body = MonthlyAppointmentsReport)),
    tag = "Reports"
)]
pub async fn establishment_appointments_per_month(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MonthlyAppointmentsReport>, AppError> {
    monthly_report(&state, AppointmentQuery::for_establishment(&id)).await
}
