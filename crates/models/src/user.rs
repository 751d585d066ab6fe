//! `user` entity: directory identity, contact, and authentication columns.
//!
//! Secret columns (password hash, tokens, OTP secret) are skipped during
//! serialization so they can never appear in an API response.
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub common_name: Option<String>,
    pub home_address: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<Date>,
    pub nationality: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub zip: Option<String>,
    pub photo: Option<String>,
    pub photo_mime_type: Option<String>,
    pub is_active: bool,
    pub is_soft_deleted: bool,
    pub primary_email_address: String,
    pub backup_email_address: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub phone: Option<Phone>,
    pub is_primary_email_address_verified: bool,
    pub is_backup_email_address_verified: bool,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_password_change_required: bool,
    #[serde(skip_serializing, default)]
    pub reset_password_token: Option<String>,
    pub reset_password_expiration: Option<DateTimeWithTimeZone>,
    #[serde(skip_serializing, default)]
    pub primary_email_verification_token: Option<String>,
    #[serde(skip_serializing, default)]
    pub backup_email_verification_token: Option<String>,
    pub email_verification_token_expiration: Option<DateTimeWithTimeZone>,
    pub otp_enabled: bool,
    #[serde(skip_serializing, default)]
    pub otp_secret: Option<String>,
}

/// Gender stored as a short string column.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Phone book stored as a JSON column: number lists per line type.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Phone {
    #[serde(default)]
    pub mobile: Vec<String>,
    #[serde(default)]
    pub office: Vec<String>,
    #[serde(default)]
    pub home: Vec<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_profile::Entity")]
    UserProfile,
    #[sea_orm(has_one = "super::employee::Entity")]
    Employee,
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRoles,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProfile.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::Role.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email address".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}
