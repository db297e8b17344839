use crate::dtos::{
    CreateProcedureRequest, MessageResponse, ProcedureResponse,
    UpdateProcedureRequest,
};
use crate::models::Procedure;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

#[utoipa::path(
    post,
    path = "/api/procedures",
    request_body = CreateProcedureRequest,
    responses(
        (status = 201, description = "Procedure created", body = ProcedureResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Procedures"
)]
pub async fn create_procedure(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateProcedureRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut procedure = Procedure::new(
        req.professional_id,
        req.name,
        req.description,
        req.price,
        req.duration_minutes,
    );
    procedure.image_url = req.image_url;

    state.repo.insert_procedure(&procedure).await?;
    tracing::info!(procedure_id = %procedure.id, professional_id = %procedure.professional_id, "Procedure created");

    Ok((StatusCode::CREATED, Json(ProcedureResponse::from(procedure))))
}

#[utoipa::path(
    get,
    path = "/api/procedures/{professional_id}",
    params(("professional_id" = String, Path, description = "Professional id")),
    responses(
        (status = 200, description = "Procedures offered by the professional", body = Vec<ProcedureResponse>)
    ),
    tag = "Procedures"
)]
pub async fn list_procedures(
    State(state): State<AppState>,
    Path(professional_id): Path<String>,
) -> Result<Json<Vec<ProcedureResponse>>, AppError> {
    let procedures = state.repo.list_procedures(Some(&professional_id)).await?;
    Ok(Json(procedures.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/api/procedures/{id}",
    params(("id" = String, Path, description = "Procedure id")),
    request_body = UpdateProcedureRequest,
    responses(
        (status = 200, description = "Procedure updated", body = ProcedureResponse),
        (status = 404, description = "Procedure not found", body = ErrorResponse)
    ),
    tag = "Procedures"
)]
pub async fn update_procedure(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateProcedureRequest>,
) -> Result<Json<ProcedureResponse>, AppError> {
    let mut procedure = state
        .repo
        .find_procedure(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Procedure not found"))?;

    procedure.name = req.name;
    procedure.description = req.description;
    procedure.price = req.price;
    procedure.duration_minutes = req.duration_minutes;
    if req.image_url.is_some() {
        procedure.image_url = req.image_url;
    }

    if !state.repo.replace_procedure(&procedure).await? {
        return Err(AppError::not_found("Procedure not found"));
    }
    Ok(Json(procedure.into()))
}

#[utoipa::path(
    delete,
    path = "/api/procedures/{id}",
    params(("id" = String, Path, description = "Procedure id")),
    responses(
        (status = 200, description = "Procedure deleted", body = MessageResponse),
        (status = 404, description = "Procedure not found", body = ErrorResponse)
    ),
    tag = "Procedures"
)]
pub async fn delete_procedure(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.repo.delete_procedure(&id).await? {
        return Err(AppError::not_found("Procedure not found"));
    }
    tracing::info!(procedure_id = %id, "Procedure deleted");
    Ok(Json(MessageResponse::new("Procedure deleted")))
}
