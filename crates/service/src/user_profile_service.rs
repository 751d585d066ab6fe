use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::info;

use models::user_profile;

use crate::errors::{db_err, ServiceError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserProfileInput {
    pub photo: Option<String>,
    pub photo_mime_type: Option<String>,
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserProfileInput {
    pub photo: Option<String>,
    pub photo_mime_type: Option<String>,
}

pub async fn create_user_profile(
    db: &DatabaseConnection,
    input: CreateUserProfileInput,
) -> Result<user_profile::Model, ServiceError> {
    if let Some(user_id) = input.user_id {
        crate::user_service::ensure_user(db, user_id).await?;
    }
    let created = user_profile::ActiveModel {
        photo: Set(input.photo),
        photo_mime_type: Set(input.photo_mime_type),
        user_id: Set(input.user_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)?;
    info!(user_profile_id = created.id, "user_profile_created");
    Ok(created)
}

pub async fn update_user_profile(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateUserProfileInput,
) -> Result<u64, ServiceError> {
    let mut am = <user_profile::ActiveModel as ActiveModelTrait>::default();
    if let Some(v) = input.photo {
        am.photo = Set(Some(v));
    }
    if let Some(v) = input.photo_mime_type {
        am.photo_mime_type = Set(Some(v));
    }
    if !am.is_changed() {
        return Err(ServiceError::Validation("no fields to update".into()));
    }
    let result = user_profile::Entity::update_many()
        .set(am)
        .filter(user_profile::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("user profile"));
    }
    Ok(result.rows_affected)
}

pub async fn list_user_profiles(
    db: &DatabaseConnection,
) -> Result<Vec<user_profile::Model>, ServiceError> {
    user_profile::Entity::find().all(db).await.map_err(db_err)
}

pub async fn get_user_profile(
    db: &DatabaseConnection,
    id: i32,
) -> Result<user_profile::Model, ServiceError> {
    user_profile::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("user profile"))
}

pub async fn remove_user_profile(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let result = user_profile::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("user profile"));
    }
    info!(user_profile_id = id, "user_profile_removed");
    Ok(result.rows_affected)
}

pub(crate) async fn ensure_user_profile(
    db: &DatabaseConnection,
    id: i32,
) -> Result<(), ServiceError> {
    user_profile::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found("user profile"))
}
