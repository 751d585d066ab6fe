use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use chrono::NaiveDate;
use rand::rngs::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use serde::Deserialize;
use tracing::{info, instrument};

use models::{employee, user, user_profile, user_role};

use crate::errors::{db_err, ServiceError};
use crate::query::ListOptions;
use crate::user_profile_service::CreateUserProfileInput;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub common_name: Option<String>,
    pub home_address: Option<String>,
    pub gender: Option<user::Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub zip: Option<String>,
    pub photo: Option<String>,
    pub photo_mime_type: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub primary_email_address: String,
    pub backup_email_address: Option<String>,
    pub phone: Option<user::Phone>,
    /// Plaintext at the boundary only; hashed before persistence.
    pub password: String,
    #[serde(default)]
    pub is_password_change_required: bool,
    #[serde(default)]
    pub otp_enabled: bool,
    /// Optional nested profile, created right after the user row.
    pub user_profile: Option<CreateUserProfileInput>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub common_name: Option<String>,
    pub home_address: Option<String>,
    pub gender: Option<user::Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub zip: Option<String>,
    pub photo: Option<String>,
    pub photo_mime_type: Option<String>,
    pub is_active: Option<bool>,
    pub is_soft_deleted: Option<bool>,
    pub primary_email_address: Option<String>,
    pub backup_email_address: Option<String>,
    pub phone: Option<user::Phone>,
    /// Re-hashed when present and non-empty; an empty string is ignored.
    pub password: Option<String>,
    pub is_password_change_required: Option<bool>,
    pub otp_enabled: Option<bool>,
}

fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| ServiceError::Db(format!("password hashing failed: {e}")))?
        .to_string())
}

/// Create a new user; the plaintext password never reaches storage.
#[instrument(skip(db, input), fields(email = %input.primary_email_address))]
pub async fn create_user(
    db: &DatabaseConnection,
    input: CreateUserInput,
) -> Result<user::Model, ServiceError> {
    user::validate_email(&input.primary_email_address)?;
    user::validate_name(&input.first_name)?;
    user::validate_name(&input.last_name)?;
    if input.password.is_empty() {
        return Err(ServiceError::Validation("password required".into()));
    }

    let am = user::ActiveModel {
        first_name: Set(input.first_name),
        middle_name: Set(input.middle_name),
        last_name: Set(input.last_name),
        common_name: Set(input.common_name),
        home_address: Set(input.home_address),
        gender: Set(input.gender),
        date_of_birth: Set(input.date_of_birth),
        nationality: Set(input.nationality),
        state: Set(input.state),
        city: Set(input.city),
        county: Set(input.county),
        zip: Set(input.zip),
        photo: Set(input.photo),
        photo_mime_type: Set(input.photo_mime_type),
        is_active: Set(input.is_active),
        is_soft_deleted: Set(false),
        primary_email_address: Set(input.primary_email_address),
        backup_email_address: Set(input.backup_email_address),
        phone: Set(input.phone),
        is_primary_email_address_verified: Set(false),
        is_backup_email_address_verified: Set(false),
        password_hash: Set(hash_password(&input.password)?),
        is_password_change_required: Set(input.is_password_change_required),
        otp_enabled: Set(input.otp_enabled),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(db_err)?;

    if let Some(profile) = input.user_profile {
        // Second statement on purpose; composite creates are not atomic.
        user_profile::ActiveModel {
            photo: Set(profile.photo),
            photo_mime_type: Set(profile.photo_mime_type),
            user_id: Set(Some(created.id)),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(db_err)?;
    }

    info!(user_id = created.id, "user_created");
    Ok(created)
}

/// Partial update; returns the number of rows touched.
pub async fn update_user(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateUserInput,
) -> Result<u64, ServiceError> {
    let mut am = <user::ActiveModel as ActiveModelTrait>::default();
    if let Some(v) = input.first_name {
        user::validate_name(&v)?;
        am.first_name = Set(v);
    }
    if let Some(v) = input.middle_name {
        am.middle_name = Set(Some(v));
    }
    if let Some(v) = input.last_name {
        user::validate_name(&v)?;
        am.last_name = Set(v);
    }
    if let Some(v) = input.common_name {
        am.common_name = Set(Some(v));
    }
    if let Some(v) = input.home_address {
        am.home_address = Set(Some(v));
    }
    if let Some(v) = input.gender {
        am.gender = Set(Some(v));
    }
    if let Some(v) = input.date_of_birth {
        am.date_of_birth = Set(Some(v));
    }
    if let Some(v) = input.nationality {
        am.nationality = Set(Some(v));
    }
    if let Some(v) = input.state {
        am.state = Set(Some(v));
    }
    if let Some(v) = input.city {
        am.city = Set(Some(v));
    }
    if let Some(v) = input.county {
        am.county = Set(Some(v));
    }
    if let Some(v) = input.zip {
        am.zip = Set(Some(v));
    }
    if let Some(v) = input.photo {
        am.photo = Set(Some(v));
    }
    if let Some(v) = input.photo_mime_type {
        am.photo_mime_type = Set(Some(v));
    }
    if let Some(v) = input.is_active {
        am.is_active = Set(v);
    }
    if let Some(v) = input.is_soft_deleted {
        am.is_soft_deleted = Set(v);
    }
    if let Some(v) = input.primary_email_address {
        user::validate_email(&v)?;
        am.primary_email_address = Set(v);
    }
    if let Some(v) = input.backup_email_address {
        am.backup_email_address = Set(Some(v));
    }
    if let Some(v) = input.phone {
        am.phone = Set(Some(v));
    }
    if let Some(v) = input.is_password_change_required {
        am.is_password_change_required = Set(v);
    }
    if let Some(v) = input.otp_enabled {
        am.otp_enabled = Set(v);
    }
    match input.password.as_deref() {
        Some(p) if !p.is_empty() => am.password_hash = Set(hash_password(p)?),
        _ => {}
    }

    if !am.is_changed() {
        return Err(ServiceError::Validation("no fields to update".into()));
    }
    let result = user::Entity::update_many()
        .set(am)
        .filter(user::Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("user"));
    }
    info!(user_id = id, "user_updated");
    Ok(result.rows_affected)
}

/// All users paired with the total count.
pub async fn list_users(db: &DatabaseConnection) -> Result<(Vec<user::Model>, u64), ServiceError> {
    let total = user::Entity::find().count(db).await.map_err(db_err)?;
    let items = user::Entity::find().all(db).await.map_err(db_err)?;
    Ok((items, total))
}

/// Filtered/sorted/paginated listing; the total counts every match
/// before pagination is applied.
pub async fn list_users_with_options(
    db: &DatabaseConnection,
    opts: &ListOptions,
) -> Result<(Vec<user::Model>, u64), ServiceError> {
    let select = opts.apply(user::Entity::find())?;
    let total = select.clone().count(db).await.map_err(db_err)?;
    let (page_idx, per_page) = opts.page.normalize();
    let items = select
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(db_err)?;
    Ok((items, total))
}

/// Fetch by id; absence is a distinct NotFound outcome.
pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("user"))
}

/// Hard delete; returns the number of rows removed.
pub async fn remove_user(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let result = user::Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    if result.rows_affected == 0 {
        return Err(ServiceError::not_found("user"));
    }
    info!(user_id = id, "user_removed");
    Ok(result.rows_affected)
}

pub(crate) async fn ensure_user(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .map(|_| ())
        .ok_or_else(|| ServiceError::not_found("user"))
}

/* Relationships */

pub async fn assign_role(
    db: &DatabaseConnection,
    user_id: i32,
    role_id: i32,
) -> Result<(), ServiceError> {
    ensure_user(db, user_id).await?;
    crate::role_service::ensure_role(db, role_id).await?;
    user_role::ActiveModel { user_id: Set(user_id), role_id: Set(role_id) }
        .insert(db)
        .await
        .map_err(db_err)?;
    info!(user_id, role_id, "role_assigned");
    Ok(())
}

pub async fn assign_roles(
    db: &DatabaseConnection,
    user_id: i32,
    role_ids: &[i32],
) -> Result<(), ServiceError> {
    ensure_user(db, user_id).await?;
    for &role_id in role_ids {
        crate::role_service::ensure_role(db, role_id).await?;
    }
    // One statement per pair; a duplicate aborts the remainder.
    for &role_id in role_ids {
        user_role::ActiveModel { user_id: Set(user_id), role_id: Set(role_id) }
            .insert(db)
            .await
            .map_err(db_err)?;
    }
    info!(user_id, count = role_ids.len(), "roles_assigned");
    Ok(())
}

/// Detach is idempotent: revoking an absent association is a no-op.
pub async fn revoke_role(
    db: &DatabaseConnection,
    user_id: i32,
    role_id: i32,
) -> Result<(), ServiceError> {
    ensure_user(db, user_id).await?;
    crate::role_service::ensure_role(db, role_id).await?;
    user_role::Entity::delete_many()
        .filter(user_role::Column::UserId.eq(user_id))
        .filter(user_role::Column::RoleId.eq(role_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(user_id, role_id, "role_revoked");
    Ok(())
}

pub async fn revoke_roles(
    db: &DatabaseConnection,
    user_id: i32,
    role_ids: &[i32],
) -> Result<(), ServiceError> {
    ensure_user(db, user_id).await?;
    for &role_id in role_ids {
        crate::role_service::ensure_role(db, role_id).await?;
    }
    user_role::Entity::delete_many()
        .filter(user_role::Column::UserId.eq(user_id))
        .filter(user_role::Column::RoleId.is_in(role_ids.to_vec()))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(user_id, count = role_ids.len(), "roles_revoked");
    Ok(())
}

pub async fn set_user_profile(
    db: &DatabaseConnection,
    user_id: i32,
    user_profile_id: i32,
) -> Result<(), ServiceError> {
    ensure_user(db, user_id).await?;
    crate::user_profile_service::ensure_user_profile(db, user_profile_id).await?;
    let am = user_profile::ActiveModel { user_id: Set(Some(user_id)), ..Default::default() };
    user_profile::Entity::update_many()
        .set(am)
        .filter(user_profile::Column::Id.eq(user_profile_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(user_id, user_profile_id, "user_profile_set");
    Ok(())
}

pub async fn unset_user_profile(db: &DatabaseConnection, user_id: i32) -> Result<(), ServiceError> {
    ensure_user(db, user_id).await?;
    let am = user_profile::ActiveModel { user_id: Set(None), ..Default::default() };
    user_profile::Entity::update_many()
        .set(am)
        .filter(user_profile::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(user_id, "user_profile_unset");
    Ok(())
}

pub async fn set_employee(
    db: &DatabaseConnection,
    user_id: i32,
    employee_id: i32,
) -> Result<(), ServiceError> {
    ensure_user(db, user_id).await?;
    crate::employee_service::ensure_employee(db, employee_id).await?;
    let am = employee::ActiveModel { user_id: Set(Some(user_id)), ..Default::default() };
    employee::Entity::update_many()
        .set(am)
        .filter(employee::Column::Id.eq(employee_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(user_id, employee_id, "employee_set");
    Ok(())
}

pub async fn unset_employee(db: &DatabaseConnection, user_id: i32) -> Result<(), ServiceError> {
    ensure_user(db, user_id).await?;
    let am = employee::ActiveModel { user_id: Set(None), ..Default::default() };
    employee::Entity::update_many()
        .set(am)
        .filter(employee::Column::UserId.eq(user_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    info!(user_id, "employee_unset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role_service;
    use crate::test_support::get_db;
    use crate::user_profile_service;
    use sea_orm::ModelTrait;
    use uuid::Uuid;

    fn create_input(email: &str) -> CreateUserInput {
        CreateUserInput {
            first_name: "Ada".into(),
            middle_name: None,
            last_name: "Lovelace".into(),
            common_name: None,
            home_address: None,
            gender: None,
            date_of_birth: None,
            nationality: None,
            state: None,
            city: None,
            county: None,
            zip: None,
            photo: None,
            photo_mime_type: None,
            is_active: true,
            primary_email_address: email.into(),
            backup_email_address: None,
            phone: None,
            password: "correct horse battery staple".into(),
            is_password_change_required: false,
            otp_enabled: false,
            user_profile: None,
        }
    }

    fn email() -> String {
        format!("svc_{}@example.com", Uuid::new_v4())
    }

    #[tokio::test]
    async fn plaintext_password_is_never_persisted() -> anyhow::Result<()> {
        let db = get_db().await?;
        let created = create_user(&db, create_input(&email())).await?;

        let stored = user::Entity::find_by_id(created.id).one(&db).await?.unwrap();
        assert_ne!(stored.password_hash, "correct horse battery staple");
        assert!(stored.password_hash.starts_with("$argon2"));

        let json = serde_json::to_value(&stored)?;
        assert!(json.get("password_hash").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() -> anyhow::Result<()> {
        let db = get_db().await?;
        let addr = email();
        create_user(&db, create_input(&addr)).await?;
        let err = create_user(&db, create_input(&addr)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn nested_profile_is_created_with_the_user() -> anyhow::Result<()> {
        let db = get_db().await?;
        let mut input = create_input(&email());
        input.user_profile = Some(CreateUserProfileInput {
            photo: Some("/photos/ada.png".into()),
            photo_mime_type: Some("image/png".into()),
            user_id: None,
        });
        let created = create_user(&db, input).await?;

        let profile = created
            .find_related(user_profile::Entity)
            .one(&db)
            .await?
            .expect("profile created alongside user");
        assert_eq!(profile.photo.as_deref(), Some("/photos/ada.png"));
        Ok(())
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_alone() -> anyhow::Result<()> {
        let db = get_db().await?;
        let created = create_user(&db, create_input(&email())).await?;

        let rows = update_user(
            &db,
            created.id,
            UpdateUserInput { city: Some("Boston".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(rows, 1);

        let reloaded = get_user(&db, created.id).await?;
        assert_eq!(reloaded.city.as_deref(), Some("Boston"));
        assert_eq!(reloaded.first_name, created.first_name);
        assert_eq!(reloaded.primary_email_address, created.primary_email_address);
        assert_eq!(reloaded.password_hash, created.password_hash);
        Ok(())
    }

    #[tokio::test]
    async fn update_rehashes_only_nonempty_password() -> anyhow::Result<()> {
        let db = get_db().await?;
        let created = create_user(&db, create_input(&email())).await?;

        // Empty password is ignored; the old hash survives.
        update_user(
            &db,
            created.id,
            UpdateUserInput {
                password: Some(String::new()),
                city: Some("Lagos".into()),
                ..Default::default()
            },
        )
        .await?;
        let after_noop = get_user(&db, created.id).await?;
        assert_eq!(after_noop.password_hash, created.password_hash);

        update_user(
            &db,
            created.id,
            UpdateUserInput { password: Some("a brand new passphrase".into()), ..Default::default() },
        )
        .await?;
        let after_change = get_user(&db, created.id).await?;
        assert_ne!(after_change.password_hash, created.password_hash);
        assert!(after_change.password_hash.starts_with("$argon2"));
        Ok(())
    }

    #[tokio::test]
    async fn absence_is_a_distinct_outcome() -> anyhow::Result<()> {
        let db = get_db().await?;
        let err = get_user(&db, 999_999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = update_user(
            &db,
            999_999,
            UpdateUserInput { city: Some("Nowhere".into()), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = remove_user(&db, 999_999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn role_attach_detach_round_trip() -> anyhow::Result<()> {
        let db = get_db().await?;
        let u = create_user(&db, create_input(&email())).await?;
        let r = role_service::create_role(
            &db,
            role_service::CreateRoleInput { name: format!("role_{}", Uuid::new_v4()), description: None },
        )
        .await?;

        assign_role(&db, u.id, r.id).await?;
        let roles = u.find_related(models::role::Entity).all(&db).await?;
        assert_eq!(roles.len(), 1);

        // Attaching the same pair twice is a conflict.
        let err = assign_role(&db, u.id, r.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        revoke_role(&db, u.id, r.id).await?;
        let roles = u.find_related(models::role::Entity).all(&db).await?;
        assert!(roles.is_empty());

        // Revoking again stays a no-op success.
        revoke_role(&db, u.id, r.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn bulk_role_assignment_checks_every_child() -> anyhow::Result<()> {
        let db = get_db().await?;
        let u = create_user(&db, create_input(&email())).await?;
        let r = role_service::create_role(
            &db,
            role_service::CreateRoleInput { name: format!("role_{}", Uuid::new_v4()), description: None },
        )
        .await?;

        let err = assign_roles(&db, u.id, &[r.id, 999_999]).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        // Nothing was written for the valid half either.
        let roles = u.find_related(models::role::Entity).all(&db).await?;
        assert!(roles.is_empty());

        assign_roles(&db, u.id, &[r.id]).await?;
        revoke_roles(&db, u.id, &[r.id]).await?;
        let roles = u.find_related(models::role::Entity).all(&db).await?;
        assert!(roles.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn profile_set_unset_round_trip() -> anyhow::Result<()> {
        let db = get_db().await?;
        let u = create_user(&db, create_input(&email())).await?;
        let p = user_profile_service::create_user_profile(
            &db,
            CreateUserProfileInput { photo: None, photo_mime_type: None, user_id: None },
        )
        .await?;

        set_user_profile(&db, u.id, p.id).await?;
        let linked = user_profile::Entity::find_by_id(p.id).one(&db).await?.unwrap();
        assert_eq!(linked.user_id, Some(u.id));

        unset_user_profile(&db, u.id).await?;
        let unlinked = user_profile::Entity::find_by_id(p.id).one(&db).await?.unwrap();
        assert_eq!(unlinked.user_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn relation_mutators_reject_missing_sides() -> anyhow::Result<()> {
        let db = get_db().await?;
        let u = create_user(&db, create_input(&email())).await?;

        let err = assign_role(&db, u.id, 999_999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = set_user_profile(&db, 999_999, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = set_employee(&db, u.id, 999_999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn list_with_options_filters_sorts_and_counts() -> anyhow::Result<()> {
        let db = get_db().await?;
        for (first, city) in [("Ada", "Boston"), ("Grace", "Boston"), ("Edsger", "Austin")] {
            let mut input = create_input(&email());
            input.first_name = first.into();
            input.city = Some(city.into());
            create_user(&db, input).await?;
        }

        let opts = ListOptions::from_pairs([
            ("filter", "city:eq:Boston"),
            ("sort", "first_name:desc"),
        ])?;
        let (items, total) = list_users_with_options(&db, &opts).await?;
        assert_eq!(total, 2);
        let names: Vec<_> = items.iter().map(|u| u.first_name.as_str()).collect();
        assert_eq!(names, vec!["Grace", "Ada"]);

        // Pagination caps the page but not the total.
        let opts = ListOptions::from_pairs([
            ("filter", "city:contains:o"),
            ("sort", "first_name"),
            ("page", "1"),
            ("per_page", "1"),
        ])?;
        let (items, total) = list_users_with_options(&db, &opts).await?;
        assert_eq!(items.len(), 1);
        assert_eq!(total, 2);
        Ok(())
    }
}
