use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};

use models::employee;
use service::employee_service::{self, CreateEmployeeInput, UpdateEmployeeInput};

use crate::errors::ApiError;
use crate::routes::{AppState, UpdateReport};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list).post(create))
        .route("/employees/:id", get(get_one).patch(update).delete(remove))
        .route("/employees/:id/department", patch(unset_department))
        .route("/employees/:id/department/:department_id", patch(set_department))
}

#[utoipa::path(post, path = "/employees", tag = "employees", request_body = crate::openapi::CreateEmployeeDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 404, description = "Referenced record not found")))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEmployeeInput>,
) -> Result<(StatusCode, Json<employee::Model>), ApiError> {
    let created = employee_service::create_employee(&state.db, input)
        .await
        .map_err(ApiError::from_service)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/employees", tag = "employees", responses((status = 200, description = "OK")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<employee::Model>>, ApiError> {
    let items = employee_service::list_employees(&state.db)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(items))
}

#[utoipa::path(get, path = "/employees/{id}", tag = "employees",
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<employee::Model>, ApiError> {
    let found = employee_service::get_employee(&state.db, id)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(found))
}

#[utoipa::path(patch, path = "/employees/{id}", tag = "employees", request_body = crate::openapi::UpdateEmployeeDoc,
    responses((status = 200, description = "OK"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateEmployeeInput>,
) -> Result<Json<UpdateReport>, ApiError> {
    let rows_affected = employee_service::update_employee(&state.db, id, input)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(UpdateReport { rows_affected }))
}

#[utoipa::path(delete, path = "/employees/{id}", tag = "employees",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    employee_service::remove_employee(&state.db, id)
        .await
        .map_err(ApiError::from_service)?;
    Ok(StatusCode::NO_CONTENT)
}

/* Relationships */

#[utoipa::path(patch, path = "/employees/{id}/department/{department_id}", tag = "employees",
    responses((status = 204, description = "Set"), (status = 404, description = "Not Found")))]
pub async fn set_department(
    State(state): State<AppState>,
    Path((id, department_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    employee_service::set_department(&state.db, id, department_id)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(patch, path = "/employees/{id}/department", tag = "employees",
    responses((status = 204, description = "Unset"), (status = 404, description = "Not Found")))]
pub async fn unset_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    employee_service::unset_department(&state.db, id)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}
