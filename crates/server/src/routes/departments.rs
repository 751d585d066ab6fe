use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};

use models::department;
use service::department_service::{self, CreateDepartmentInput, UpdateDepartmentInput};

use crate::errors::ApiError;
use crate::routes::{parse_id_params, AppState, UpdateReport};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list).post(create))
        .route("/departments/:id", get(get_one).patch(update).delete(remove))
        .route("/departments/:id/employees", patch(add_employees).delete(remove_employees))
        .route(
            "/departments/:id/employees/:employee_id",
            patch(add_employee).delete(remove_employee),
        )
}

#[utoipa::path(post, path = "/departments", tag = "departments", request_body = crate::openapi::CreateDepartmentDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDepartmentInput>,
) -> Result<(StatusCode, Json<department::Model>), ApiError> {
    let created = department_service::create_department(&state.db, input)
        .await
        .map_err(ApiError::from_service)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/departments", tag = "departments", responses((status = 200, description = "OK")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<department::Model>>, ApiError> {
    let items = department_service::list_departments(&state.db)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(items))
}

#[utoipa::path(get, path = "/departments/{id}", tag = "departments",
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<department::Model>, ApiError> {
    let found = department_service::get_department(&state.db, id)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(found))
}

#[utoipa::path(patch, path = "/departments/{id}", tag = "departments", request_body = crate::openapi::UpdateDepartmentDoc,
    responses((status = 200, description = "OK"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateDepartmentInput>,
) -> Result<Json<UpdateReport>, ApiError> {
    let rows_affected = department_service::update_department(&state.db, id, input)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(UpdateReport { rows_affected }))
}

#[utoipa::path(delete, path = "/departments/{id}", tag = "departments",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    department_service::remove_department(&state.db, id)
        .await
        .map_err(ApiError::from_service)?;
    Ok(StatusCode::NO_CONTENT)
}

/* Relationships */

#[utoipa::path(patch, path = "/departments/{id}/employees/{employee_id}", tag = "departments",
    responses((status = 204, description = "Attached"), (status = 404, description = "Not Found")))]
pub async fn add_employee(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    department_service::add_employee(&state.db, id, employee_id)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(patch, path = "/departments/{id}/employees", tag = "departments",
    responses((status = 204, description = "Attached"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn add_employees(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<StatusCode, ApiError> {
    let employee_ids = parse_id_params(&params, "employeeId")?;
    department_service::add_employees(&state.db, id, &employee_ids)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/departments/{id}/employees/{employee_id}", tag = "departments",
    responses((status = 204, description = "Detached"), (status = 404, description = "Not Found")))]
pub async fn remove_employee(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    department_service::remove_employee(&state.db, id, employee_id)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/departments/{id}/employees", tag = "departments",
    responses((status = 204, description = "Detached"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn remove_employees(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<StatusCode, ApiError> {
    let employee_ids = parse_id_params(&params, "employeeId")?;
    department_service::remove_employees(&state.db, id, &employee_ids)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}
