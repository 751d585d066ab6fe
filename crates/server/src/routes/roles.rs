use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use models::role;
use service::role_service::{self, CreateRoleInput, UpdateRoleInput};

use crate::errors::ApiError;
use crate::routes::{AppState, UpdateReport};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(list).post(create))
        .route("/roles/:id", get(get_one).patch(update).delete(remove))
}

#[utoipa::path(post, path = "/roles", tag = "roles", request_body = crate::openapi::CreateRoleDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRoleInput>,
) -> Result<(StatusCode, Json<role::Model>), ApiError> {
    let created = role_service::create_role(&state.db, input)
        .await
        .map_err(ApiError::from_service)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/roles", tag = "roles", responses((status = 200, description = "OK")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<role::Model>>, ApiError> {
    let items = role_service::list_roles(&state.db)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(items))
}

#[utoipa::path(get, path = "/roles/{id}", tag = "roles",
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<role::Model>, ApiError> {
    let found = role_service::get_role(&state.db, id)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(found))
}

#[utoipa::path(patch, path = "/roles/{id}", tag = "roles", request_body = crate::openapi::UpdateRoleDoc,
    responses((status = 200, description = "OK"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateRoleInput>,
) -> Result<Json<UpdateReport>, ApiError> {
    let rows_affected = role_service::update_role(&state.db, id, input)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(UpdateReport { rows_affected }))
}

#[utoipa::path(delete, path = "/roles/{id}", tag = "roles",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    role_service::remove_role(&state.db, id)
        .await
        .map_err(ApiError::from_service)?;
    Ok(StatusCode::NO_CONTENT)
}
