use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use models::user_profile;
use service::user_profile_service::{self, CreateUserProfileInput, UpdateUserProfileInput};

use crate::errors::ApiError;
use crate::routes::{AppState, UpdateReport};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user-profiles", get(list).post(create))
        .route("/user-profiles/:id", get(get_one).patch(update).delete(remove))
}

#[utoipa::path(post, path = "/user-profiles", tag = "user-profiles", request_body = crate::openapi::CreateUserProfileDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 404, description = "Referenced user not found")))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserProfileInput>,
) -> Result<(StatusCode, Json<user_profile::Model>), ApiError> {
    let created = user_profile_service::create_user_profile(&state.db, input)
        .await
        .map_err(ApiError::from_service)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/user-profiles", tag = "user-profiles", responses((status = 200, description = "OK")))]
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<user_profile::Model>>, ApiError> {
    let items = user_profile_service::list_user_profiles(&state.db)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(items))
}

#[utoipa::path(get, path = "/user-profiles/{id}", tag = "user-profiles",
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<user_profile::Model>, ApiError> {
    let found = user_profile_service::get_user_profile(&state.db, id)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(found))
}

#[utoipa::path(patch, path = "/user-profiles/{id}", tag = "user-profiles", request_body = crate::openapi::UpdateUserProfileDoc,
    responses((status = 200, description = "OK"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateUserProfileInput>,
) -> Result<Json<UpdateReport>, ApiError> {
    let rows_affected = user_profile_service::update_user_profile(&state.db, id, input)
        .await
        .map_err(ApiError::from_service)?;
    Ok(Json(UpdateReport { rows_affected }))
}

#[utoipa::path(delete, path = "/user-profiles/{id}", tag = "user-profiles",
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    user_profile_service::remove_user_profile(&state.db, id)
        .await
        .map_err(ApiError::from_service)?;
    Ok(StatusCode::NO_CONTENT)
}
