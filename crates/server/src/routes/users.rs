use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Serialize;

use models::user;
use service::query::ListOptions;
use service::user_service::{self, CreateUserInput, UpdateUserInput};

use crate::errors::ApiError;
use crate::routes::{parse_id_params, AppState, UpdateReport};

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub items: Vec<user::Model>,
    pub total: u64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/:id", get(get_one).patch(update).delete(remove))
        .route("/users/:id/roles", patch(add_roles).delete(remove_roles))
        .route("/users/:id/roles/:role_id", patch(add_role).delete(remove_role))
        .route("/users/:id/user-profile", patch(unset_user_profile))
        .route("/users/:id/user-profile/:user_profile_id", patch(set_user_profile))
        .route("/users/:id/employee", patch(unset_employee))
        .route("/users/:id/employee/:employee_id", patch(set_employee))
}

#[utoipa::path(post, path = "/users", tag = "users", request_body = crate::openapi::CreateUserDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<user::Model>), ApiError> {
    let created = user_service::create_user(&state.db, input)
        .await
        .map_err(ApiError::from_service)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/users", tag = "users",
    responses((status = 200, description = "OK"), (status = 400, description = "Bad Request")))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<UserListResponse>, ApiError> {
    let (items, total) = if params.is_empty() {
        user_service::list_users(&state.db).await
    } else {
        let opts = ListOptions::from_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .map_err(ApiError::from_service)?;
        user_service::list_users_with_options(&state.db, &opts).await
    }
    .map_err(ApiError::from_service)?;
    Ok(Json(UserListResponse { items, total }))
}

#[utoipa::path(get, path = "/users/{id}", tag = "users",
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<user::Model>, ApiError> {
    let found = user_service::get_user(&state.db, id)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(found))
}

#[utoipa::path(patch, path = "/users/{id}", tag = "users", request_body = crate::openapi::UpdateUserDoc,
    responses((status = 200, description = "OK"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<UpdateReport>, ApiError> {
    let rows_affected = user_service::update_user(&state.db, id, input)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(UpdateReport { rows_affected }))
}

#[utoipa::path(delete, path = "/users/{id}", tag = "users",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    user_service::remove_user(&state.db, id)
        .await
        .map_err(ApiError::from_service)?;
    Ok(StatusCode::NO_CONTENT)
}

/* Relationships */

#[utoipa::path(patch, path = "/users/{id}/roles/{role_id}", tag = "users",
    responses((status = 204, description = "Attached"), (status = 404, description = "Not Found"), (status = 409, description = "Already attached")))]
pub async fn add_role(
    State(state): State<AppState>,
    Path((id, role_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    user_service::assign_role(&state.db, id, role_id)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(patch, path = "/users/{id}/roles", tag = "users",
    responses((status = 204, description = "Attached"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found"), (status = 409, description = "Already attached")))]
pub async fn add_roles(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<StatusCode, ApiError> {
    let role_ids = parse_id_params(&params, "roleId")?;
    user_service::assign_roles(&state.db, id, &role_ids)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/users/{id}/roles/{role_id}", tag = "users",
    responses((status = 204, description = "Detached"), (status = 404, description = "Not Found")))]
pub async fn remove_role(
    State(state): State<AppState>,
    Path((id, role_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    user_service::revoke_role(&state.db, id, role_id)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/users/{id}/roles", tag = "users",
    responses((status = 204, description = "Detached"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn remove_roles(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<StatusCode, ApiError> {
    let role_ids = parse_id_params(&params, "roleId")?;
    user_service::revoke_roles(&state.db, id, &role_ids)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(patch, path = "/users/{id}/user-profile/{user_profile_id}", tag = "users",
    responses((status = 204, description = "Set"), (status = 404, description = "Not Found")))]
pub async fn set_user_profile(
    State(state): State<AppState>,
    Path((id, user_profile_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    user_service::set_user_profile(&state.db, id, user_profile_id)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(patch, path = "/users/{id}/user-profile", tag = "users",
    responses((status = 204, description = "Unset"), (status = 404, description = "Not Found")))]
pub async fn unset_user_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user_service::unset_user_profile(&state.db, id)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(patch, path = "/users/{id}/employee/{employee_id}", tag = "users",
    responses((status = 204, description = "Set"), (status = 404, description = "Not Found")))]
pub async fn set_employee(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    user_service::set_employee(&state.db, id, employee_id)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(patch, path = "/users/{id}/employee", tag = "users",
    responses((status = 204, description = "Unset"), (status = 404, description = "Not Found")))]
pub async fn unset_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user_service::unset_employee(&state.db, id)
        .await
        .map_err(ApiError::from_relation)?;
    Ok(StatusCode::NO_CONTENT)
}
