use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument, warn};

// Import domain entities and services
use vitals_log_domain::entities::reading::{
    CreateReadingRequest as DomainCreateReadingRequest, Reading as DomainReading,
};
use vitals_log_domain::services::ReadingsServiceTrait;

// Import our entities
use crate::entities::common::ErrorResponse;
use crate::entities::reading::{CreateReadingRequest, DeletedReadingResponse, Reading};

/// Service type for dependency injection
pub type ReadingsService = Arc<dyn ReadingsServiceTrait + Send + Sync>;

/// List every stored reading in collection order
#[utoipa::path(
    get,
    path = "/api/readings",
    responses(
        (status = 200, description = "All stored readings", body = [Reading]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(service))]
pub async fn list_readings(
    State(service): State<ReadingsService>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let readings = service.list_readings().await?;
    info!("Returning {} readings", readings.len());

    let public_readings: Vec<Reading> = readings.into_iter().map(convert_to_public_reading).collect();
    Ok((StatusCode::OK, Json(public_readings)))
}

/// Record a new reading
#[utoipa::path(
    post,
    path = "/api/readings",
    request_body = CreateReadingRequest,
    responses(
        (status = 201, description = "Reading created", body = Reading),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "A reading with the requested id already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(service, payload))]
pub async fn create_reading(
    State(service): State<ReadingsService>,
    payload: Result<Json<CreateReadingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected reading payload: {}", rejection.body_text());
        ErrorResponse::validation_error(rejection.body_text())
    })?;

    // Convert public request to domain request
    let domain_request = convert_to_domain_request(request);

    let reading = service.add_reading(domain_request).await.map_err(|e| {
        warn!("Failed to create reading: {}", e);
        ErrorResponse::from(e)
    })?;

    info!("Reading created with ID: {}", reading.id);
    Ok((StatusCode::CREATED, Json(convert_to_public_reading(reading))))
}

/// Delete a reading by identifier
#[utoipa::path(
    delete,
    path = "/api/readings/{id}",
    params(
        ("id" = i64, Path, description = "Reading identifier")
    ),
    responses(
        (status = 200, description = "Reading deleted", body = DeletedReadingResponse),
        (status = 400, description = "Identifier is not an integer", body = ErrorResponse),
        (status = 404, description = "Reading not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "readings"
)]
#[instrument(skip(service, id))]
pub async fn delete_reading(
    State(service): State<ReadingsService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let Path(id) = id.map_err(|rejection| {
        warn!("Rejected reading id: {}", rejection.body_text());
        ErrorResponse::validation_error("id must be an integer")
    })?;

    let deleted = service.delete_reading(id).await.map_err(|e| {
        warn!("Failed to delete reading {}: {}", id, e);
        ErrorResponse::from(e)
    })?;

    info!("Reading {} deleted", deleted);
    Ok((StatusCode::OK, Json(DeletedReadingResponse { deleted })))
}

/// Convert a public request to the domain request
fn convert_to_domain_request(request: CreateReadingRequest) -> DomainCreateReadingRequest {
    DomainCreateReadingRequest {
        id: request.id,
        date: request.date,
        time: request.time,
        systolic: request.systolic,
        diastolic: request.diastolic,
        heart_rate: request.heart_rate,
        total_chol: request.total_chol,
        hdl: request.hdl,
        ldl: request.ldl,
        trig: request.trig,
        creatinine: request.creatinine,
    }
}

/// Convert a domain reading to its public representation
fn convert_to_public_reading(reading: DomainReading) -> Reading {
    Reading {
        id: reading.id,
        date: reading.date,
        time: reading.time,
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        heart_rate: reading.heart_rate,
        total_chol: reading.total_chol,
        hdl: reading.hdl,
        ldl: reading.ldl,
        trig: reading.trig,
        creatinine: reading.creatinine,
    }
}
