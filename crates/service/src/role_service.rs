use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::info;

use models::role;

use crate::errors::{db_err, ServiceError};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoleInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoleInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn create_role(
    db: &DatabaseConnection,
    input: CreateRoleInput,
) -> Result<role::Model, ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("role name required".into()));
    }
    let created = role::ActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)?;
    info!(role_id = created.id, "role_created");
    Ok(created)
}

pub async fn update_role(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateRoleInput,
) -> Result<u64, ServiceError> {
    let mut am = <role::ActiveModel as ActiveModelTrait>::default();
    if let Some(v) = input.name {
        if v.trim().is_empty() {
            return Err(ServiceError::Validation("role name required".into()));
        }
        am.name = Set(v);
    }
    if let Some(v) = input.description {
        am.description = Set(Some(v));
    }
    if !am.is_changed() {
        return Err(ServiceError::Validation("no fields to update".into()));
    }
    let result = role::Entity::update_many()
        .set(am)
        .filter(role::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("role"));
    }
    Ok(result.rows_affected)
}

pub async fn list_roles(db: &DatabaseConnection) -> Result<Vec<role::Model>, ServiceError> {
    role::Entity::find().all(db).await.map_err(db_err)
}

pub async fn get_role(db: &DatabaseConnection, id: i32) -> Result<role::Model, ServiceError> {
    role::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("role"))
}

pub async fn remove_role(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let result = role::Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("role"));
    }
    info!(role_id = id, "role_removed");
    Ok(result.rows_affected)
}

pub(crate) async fn ensure_role(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    role::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found("role"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    fn name() -> String {
        format!("role_{}", Uuid::new_v4())
    }

    #[tokio::test]
    async fn role_crud() -> anyhow::Result<()> {
        let db = get_db().await?;

        let n = name();
        let created = create_role(&db, CreateRoleInput { name: n.clone(), description: None }).await?;
        assert_eq!(created.name, n);

        let rows = update_role(
            &db,
            created.id,
            UpdateRoleInput { description: Some("may audit".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(rows, 1);

        let fetched = get_role(&db, created.id).await?;
        assert_eq!(fetched.description.as_deref(), Some("may audit"));
        assert_eq!(fetched.name, n, "name untouched by partial update");

        assert_eq!(remove_role(&db, created.id).await?, 1);
        assert!(matches!(get_role(&db, created.id).await.unwrap_err(), ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() -> anyhow::Result<()> {
        let db = get_db().await?;
        let n = name();
        create_role(&db, CreateRoleInput { name: n.clone(), description: None }).await?;
        let err = create_role(&db, CreateRoleInput { name: n, description: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() -> anyhow::Result<()> {
        let db = get_db().await?;
        let err = create_role(&db, CreateRoleInput { name: "  ".into(), description: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }
}
