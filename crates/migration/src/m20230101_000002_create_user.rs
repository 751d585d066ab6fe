//! Create `user` table.
//!
//! Holds identity, contact, and authentication columns; the secret
//! columns (password hash, tokens, OTP secret) are hidden at the
//! serialization layer, not here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_len(User::FirstName, 128).not_null())
                    .col(string_null(User::MiddleName))
                    .col(string_len(User::LastName, 128).not_null())
                    .col(string_null(User::CommonName))
                    .col(string_null(User::HomeAddress))
                    .col(string_len_null(User::Gender, 16))
                    .col(date_null(User::DateOfBirth))
                    .col(string_null(User::Nationality))
                    .col(string_null(User::State))
                    .col(string_null(User::City))
                    .col(string_null(User::County))
                    .col(string_null(User::Zip))
                    .col(string_null(User::Photo))
                    .col(string_null(User::PhotoMimeType))
                    .col(boolean(User::IsActive).default(true))
                    .col(boolean(User::IsSoftDeleted).default(false))
                    .col(string_len(User::PrimaryEmailAddress, 255).unique_key().not_null())
                    .col(string_null(User::BackupEmailAddress))
                    .col(json_null(User::Phone))
                    .col(boolean(User::IsPrimaryEmailAddressVerified).default(false))
                    .col(boolean(User::IsBackupEmailAddressVerified).default(false))
                    .col(string_len(User::PasswordHash, 255).not_null())
                    .col(boolean(User::IsPasswordChangeRequired).default(false))
                    .col(string_null(User::ResetPasswordToken).unique_key())
                    .col(timestamp_with_time_zone_null(User::ResetPasswordExpiration))
                    .col(string_null(User::PrimaryEmailVerificationToken))
                    .col(string_null(User::BackupEmailVerificationToken))
                    .col(timestamp_with_time_zone_null(User::EmailVerificationTokenExpiration))
                    .col(boolean(User::OtpEnabled).default(false))
                    .col(string_null(User::OtpSecret))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    FirstName,
    MiddleName,
    LastName,
    CommonName,
    HomeAddress,
    Gender,
    DateOfBirth,
    Nationality,
    State,
    City,
    County,
    Zip,
    Photo,
    PhotoMimeType,
    IsActive,
    IsSoftDeleted,
    PrimaryEmailAddress,
    BackupEmailAddress,
    Phone,
    IsPrimaryEmailAddressVerified,
    IsBackupEmailAddressVerified,
    PasswordHash,
    IsPasswordChangeRequired,
    ResetPasswordToken,
    ResetPasswordExpiration,
    PrimaryEmailVerificationToken,
    BackupEmailVerificationToken,
    EmailVerificationTokenExpiration,
    OtpEnabled,
    OtpSecret,
}
