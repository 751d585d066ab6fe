use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::info;

use models::employee;

use crate::errors::{db_err, ServiceError};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeInput {
    pub employee_number: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub job_position: Option<String>,
    pub job_title: Option<String>,
    pub photo: Option<String>,
    pub user_id: Option<i32>,
    pub department_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployeeInput {
    pub employee_number: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub job_position: Option<String>,
    pub job_title: Option<String>,
    pub photo: Option<String>,
}

pub async fn create_employee(
    db: &DatabaseConnection,
    input: CreateEmployeeInput,
) -> Result<employee::Model, ServiceError> {
    models::user::validate_name(&input.first_name)?;
    models::user::validate_name(&input.last_name)?;
    if let Some(user_id) = input.user_id {
        crate::user_service::ensure_user(db, user_id).await?;
    }
    if let Some(department_id) = input.department_id {
        crate::department_service::ensure_department(db, department_id).await?;
    }
    let created = employee::ActiveModel {
        employee_number: Set(input.employee_number),
        first_name: Set(input.first_name),
        middle_name: Set(input.middle_name),
        last_name: Set(input.last_name),
        job_position: Set(input.job_position),
        job_title: Set(input.job_title),
        photo: Set(input.photo),
        user_id: Set(input.user_id),
        department_id: Set(input.department_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)?;
    info!(employee_id = created.id, "employee_created");
    Ok(created)
}

pub async fn update_employee(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateEmployeeInput,
) -> Result<u64, ServiceError> {
    let mut am = <employee::ActiveModel as ActiveModelTrait>::default();
    if let Some(v) = input.employee_number {
        am.employee_number = Set(Some(v));
    }
    if let Some(v) = input.first_name {
        models::user::validate_name(&v)?;
        am.first_name = Set(v);
    }
    if let Some(v) = input.middle_name {
        am.middle_name = Set(Some(v));
    }
    if let Some(v) = input.last_name {
        models::user::validate_name(&v)?;
        am.last_name = Set(v);
    }
    if let Some(v) = input.job_position {
        am.job_position = Set(Some(v));
    }
    if let Some(v) = input.job_title {
        am.job_title = Set(Some(v));
    }
    if let Some(v) = input.photo {
        am.photo = Set(Some(v));
    }
    if !am.is_changed() {
        return Err(ServiceError::Validation("no fields to update".into()));
    }
    let result = employee::Entity::update_many()
        .set(am)
        .filter(employee::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("employee"));
    }
    Ok(result.rows_affected)
}

pub async fn list_employees(db: &DatabaseConnection) -> Result<Vec<employee::Model>, ServiceError> {
    employee::Entity::find().all(db).await.map_err(db_err)
}

pub async fn get_employee(db: &DatabaseConnection, id: i32) -> Result<employee::Model, ServiceError> {
    employee::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("employee"))
}

pub async fn remove_employee(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let result = employee::Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("employee"));
    }
    info!(employee_id = id, "employee_removed");
    Ok(result.rows_affected)
}

pub(crate) async fn ensure_employee(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    employee::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found("employee"))
}

/* Relationships */

pub async fn set_department(
    db: &DatabaseConnection,
    employee_id: i32,
    department_id: i32,
) -> Result<(), ServiceError> {
    ensure_employee(db, employee_id).await?;
    crate::department_service::ensure_department(db, department_id).await?;
    let am = employee::ActiveModel { department_id: Set(Some(department_id)), ..Default::default() };
    employee::Entity::update_many()
        .set(am)
        .filter(employee::Column::Id.eq(employee_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(employee_id, department_id, "department_set");
    Ok(())
}

pub async fn unset_department(db: &DatabaseConnection, employee_id: i32) -> Result<(), ServiceError> {
    ensure_employee(db, employee_id).await?;
    let am = employee::ActiveModel { department_id: Set(None), ..Default::default() };
    employee::Entity::update_many()
        .set(am)
        .filter(employee::Column::Id.eq(employee_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(employee_id, "department_unset");
    Ok(())
}
