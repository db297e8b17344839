use crate::dtos::{
    AppointmentResponse, CreateAppointmentRequest, ProfessionalAppointmentResponse,
};
use crate::models::{Appointment, UserKind};
use crate::services::metrics::record_appointment;
use crate::services::scheduling::{fits_working_hours, requested_slot};
use crate::services::AppointmentQuery;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use std::collections::HashMap;

/// Rejects the booking unless the professional offers the procedure and has
/// an available window covering the whole slot.
async fn check_booking(state: &AppState, req: &CreateAppointmentRequest) -> Result<(), AppError> {
    let procedure = state
        .repo
        .find_procedure_by_name(&req.professional_id, &req.procedure)
        .await?
        .ok_or_else(|| AppError::bad_request("Procedure not offered by this professional"))?;

    let slot = requested_slot(
        req.date_time,
        state.config.schedule.utc_offset,
        procedure.duration_minutes,
    )?;

    let hours = state
        .repo
        .list_working_hours(&req.professional_id, Some(slot.weekday))
        .await?;
    if hours.is_empty() {
        return Err(AppError::bad_request(format!(
            "Professional does not work on {}",
            slot.weekday
        )));
    }
    if !fits_working_hours(&slot, &hours) {
        return Err(AppError::bad_request(
            "Requested time is outside the professional's working hours",
        ));
    }

    Ok(())
}

/// Book an appointment
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentResponse),
        (status = 400, description = "Unknown procedure or time outside working hours", body = ErrorResponse)
    ),
    tag = "Appointments"
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_booking(&state, &req).await.inspect_err(|e| {
        if let AppError::BadRequest(reason) = e {
            record_appointment("rejected");
            tracing::info!(professional_id = %req.professional_id, reason = %reason, "Appointment rejected");
        }
    })?;

    let appointment = Appointment::new(
        req.client_id,
        req.professional_id,
        req.establishment_id,
        req.procedure,
        req.date_time,
    );
    state.repo.insert_appointment(&appointment).await?;
    record_appointment("booked");

    tracing::info!(
        appointment_id = %appointment.id,
        professional_id = %appointment.professional_id,
        date_time = %appointment.date_time,
        "Appointment booked"
    );

    Ok((StatusCode::CREATED, Json(AppointmentResponse::from(appointment))))
}

#[utoipa::path(
    get,
    path = "/api/appointments/client/{id}",
    params(("id" = String, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client's appointments, earliest first", body = Vec<AppointmentResponse>)
    ),
    tag = "Appointments"
)]
pub async fn list_client_appointments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let appointments = state
        .repo
        .query_appointments(&AppointmentQuery::for_client(&id))
        .await?;
    Ok(Json(appointments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/appointments/professional/{id}",
    params(("id" = String, Path, description = "Professional id")),
    responses(
        (status = 200, description = "Professional's appointments with client names", body = Vec<ProfessionalAppointmentResponse>)
    ),
    tag = "Appointments"
)]
pub async fn list_professional_appointments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ProfessionalAppointmentResponse>>, AppError> {
    let appointments = state
        .repo
        .query_appointments(&AppointmentQuery::for_professional(&id))
        .await?;

    let mut names: HashMap<String, String> = HashMap::new();
    let mut response = Vec::with_capacity(appointments.len());
    for appointment in appointments {
        let client_name = match names.get(&appointment.client_id) {
            Some(name) => name.clone(),
            None => {
                let name = state
                    .repo
                    .find_user(UserKind::Clients, &appointment.client_id)
                    .await?
                    .map(|client| client.name)
                    .unwrap_or_default();
                names.insert(appointment.client_id.clone(), name.clone());
                name
            }
        };
        response.push(ProfessionalAppointmentResponse {
            appointment: appointment.into(),
            client_name,
        });
    }

    Ok(Json(response))
}
