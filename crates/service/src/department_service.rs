use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::info;

use models::{department, employee};

use crate::errors::{db_err, ServiceError};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartmentInput {
    pub name: String,
    pub description: Option<String>,
    pub location: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDepartmentInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

pub async fn create_department(
    db: &DatabaseConnection,
    input: CreateDepartmentInput,
) -> Result<department::Model, ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("department name required".into()));
    }
    if input.location.trim().is_empty() {
        return Err(ServiceError::Validation("department location required".into()));
    }
    let created = department::ActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        location: Set(input.location),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)?;
    info!(department_id = created.id, "department_created");
    Ok(created)
}

pub async fn update_department(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateDepartmentInput,
) -> Result<u64, ServiceError> {
    let mut am = <department::ActiveModel as ActiveModelTrait>::default();
    if let Some(v) = input.name {
        if v.trim().is_empty() {
            return Err(ServiceError::Validation("department name required".into()));
        }
        am.name = Set(v);
    }
    if let Some(v) = input.description {
        am.description = Set(Some(v));
    }
    if let Some(v) = input.location {
        am.location = Set(v);
    }
    if !am.is_changed() {
        return Err(ServiceError::Validation("no fields to update".into()));
    }
    let result = department::Entity::update_many()
        .set(am)
        .filter(department::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("department"));
    }
    Ok(result.rows_affected)
}

pub async fn list_departments(
    db: &DatabaseConnection,
) -> Result<Vec<department::Model>, ServiceError> {
    department::Entity::find().all(db).await.map_err(db_err)
}

pub async fn get_department(
    db: &DatabaseConnection,
    id: i32,
) -> Result<department::Model, ServiceError> {
    department::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("department"))
}

/// Hard delete. Member employees survive with a cleared reference
/// (FK is ON DELETE SET NULL).
pub async fn remove_department(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let result = department::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("department"));
    }
    info!(department_id = id, "department_removed");
    Ok(result.rows_affected)
}

pub(crate) async fn ensure_department(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    department::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found("department"))
}

/* Relationships */

pub async fn add_employee(
    db: &DatabaseConnection,
    department_id: i32,
    employee_id: i32,
) -> Result<(), ServiceError> {
    ensure_department(db, department_id).await?;
    crate::employee_service::ensure_employee(db, employee_id).await?;
    let am = employee::ActiveModel { department_id: Set(Some(department_id)), ..Default::default() };
    employee::Entity::update_many()
        .set(am)
        .filter(employee::Column::Id.eq(employee_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(department_id, employee_id, "employee_added");
    Ok(())
}

pub async fn add_employees(
    db: &DatabaseConnection,
    department_id: i32,
    employee_ids: &[i32],
) -> Result<(), ServiceError> {
    ensure_department(db, department_id).await?;
    let mut ids = employee_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    let found = employee::Entity::find()
        .filter(employee::Column::Id.is_in(ids.clone()))
        .all(db)
        .await
        .map_err(db_err)?;
    if found.len() != ids.len() {
        return Err(ServiceError::not_found("employee"));
    }
    let am = employee::ActiveModel { department_id: Set(Some(department_id)), ..Default::default() };
    employee::Entity::update_many()
        .set(am)
        .filter(employee::Column::Id.is_in(ids.clone()))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(department_id, count = ids.len(), "employees_added");
    Ok(())
}

/// Detach is idempotent: removing an employee that is not in the
/// department is a no-op.
pub async fn remove_employee(
    db: &DatabaseConnection,
    department_id: i32,
    employee_id: i32,
) -> Result<(), ServiceError> {
    ensure_department(db, department_id).await?;
    crate::employee_service::ensure_employee(db, employee_id).await?;
    let am = employee::ActiveModel { department_id: Set(None), ..Default::default() };
    employee::Entity::update_many()
        .set(am)
        .filter(employee::Column::Id.eq(employee_id))
        .filter(employee::Column::DepartmentId.eq(department_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(department_id, employee_id, "employee_removed_from_department");
    Ok(())
}

pub async fn remove_employees(
    db: &DatabaseConnection,
    department_id: i32,
    employee_ids: &[i32],
) -> Result<(), ServiceError> {
    ensure_department(db, department_id).await?;
    let mut ids = employee_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    let found = employee::Entity::find()
        .filter(employee::Column::Id.is_in(ids.clone()))
        .all(db)
        .await
        .map_err(db_err)?;
    if found.len() != ids.len() {
        return Err(ServiceError::not_found("employee"));
    }
    let am = employee::ActiveModel { department_id: Set(None), ..Default::default() };
    employee::Entity::update_many()
        .set(am)
        .filter(employee::Column::Id.is_in(ids.clone()))
        .filter(employee::Column::DepartmentId.eq(department_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(department_id, count = ids.len(), "employees_removed_from_department");
    Ok(())
}
