use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;

pub mod departments;
pub mod employees;
pub mod roles;
pub mod user_profiles;
pub mod users;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// Result summary for PATCH endpoints: how many rows the partial
/// update touched.
#[derive(Debug, Serialize)]
pub struct UpdateReport {
    pub rows_affected: u64,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Collect repeated `?key=a&key=b` identifier parameters, rejecting
/// anything else in the query string.
pub(crate) fn parse_id_params(params: &[(String, String)], key: &str) -> Result<Vec<i32>, ApiError> {
    let mut ids = Vec::new();
    for (k, v) in params {
        if k != key {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                format!("unknown query parameter: {k}"),
            ));
        }
        ids.push(v.parse::<i32>().map_err(|_| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                format!("{key} expects a numeric identifier, got `{v}`"),
            )
        })?);
    }
    if ids.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("at least one {key} query parameter is required"),
        ));
    }
    Ok(ids)
}

/// Build the full application router: interactive docs, health, and the
/// per-resource routes.
pub fn build_router(cors: CorsLayer, state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health))
        .merge(users::router())
        .merge(employees::router())
        .merge(departments::router())
        .merge(roles::router())
        .merge(user_profiles::router())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
