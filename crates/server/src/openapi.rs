use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct UpdateReportDoc {
    pub rows_affected: u64,
}

#[derive(ToSchema)]
pub struct PhoneDoc {
    pub mobile: Vec<String>,
    pub office: Vec<String>,
    pub home: Vec<String>,
}

#[derive(ToSchema)]
pub struct CreateUserDoc {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub common_name: Option<String>,
    pub home_address: Option<String>,
    /// `male`, `female`, or `other`
    pub gender: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub nationality: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub zip: Option<String>,
    pub photo: Option<String>,
    pub photo_mime_type: Option<String>,
    pub is_active: Option<bool>,
    pub primary_email_address: String,
    pub backup_email_address: Option<String>,
    pub phone: Option<PhoneDoc>,
    /// Plaintext; hashed before persistence and never returned.
    pub password: String,
    pub is_password_change_required: Option<bool>,
    pub otp_enabled: Option<bool>,
    pub user_profile: Option<CreateUserProfileDoc>,
}

#[derive(ToSchema)]
pub struct UpdateUserDoc {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub common_name: Option<String>,
    pub home_address: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
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
    pub phone: Option<PhoneDoc>,
    /// Re-hashed when present and non-empty; an empty string is ignored.
    pub password: Option<String>,
    pub is_password_change_required: Option<bool>,
    pub otp_enabled: Option<bool>,
}

#[derive(ToSchema)]
pub struct CreateEmployeeDoc {
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

#[derive(ToSchema)]
pub struct UpdateEmployeeDoc {
    pub employee_number: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub job_position: Option<String>,
    pub job_title: Option<String>,
    pub photo: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateDepartmentDoc {
    pub name: String,
    pub description: Option<String>,
    pub location: String,
}

#[derive(ToSchema)]
pub struct UpdateDepartmentDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateRoleDoc {
    pub name: String,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateRoleDoc {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateUserProfileDoc {
    pub photo: Option<String>,
    pub photo_mime_type: Option<String>,
    pub user_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct UpdateUserProfileDoc {
    pub photo: Option<String>,
    pub photo_mime_type: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create,
        crate::routes::users::list,
        crate::routes::users::get_one,
        crate::routes::users::update,
        crate::routes::users::remove,
        crate::routes::users::add_role,
        crate::routes::users::add_roles,
        crate::routes::users::remove_role,
        crate::routes::users::remove_roles,
        crate::routes::users::set_user_profile,
        crate::routes::users::unset_user_profile,
        crate::routes::users::set_employee,
        crate::routes::users::unset_employee,
        crate::routes::employees::create,
        crate::routes::employees::list,
        crate::routes::employees::get_one,
        crate::routes::employees::update,
        crate::routes::employees::remove,
        crate::routes::employees::set_department,
        crate::routes::employees::unset_department,
        crate::routes::departments::create,
        crate::routes::departments::list,
        crate::routes::departments::get_one,
        crate::routes::departments::update,
        crate::routes::departments::remove,
        crate::routes::departments::add_employee,
        crate::routes::departments::add_employees,
        crate::routes::departments::remove_employee,
        crate::routes::departments::remove_employees,
        crate::routes::roles::create,
        crate::routes::roles::list,
        crate::routes::roles::get_one,
        crate::routes::roles::update,
        crate::routes::roles::remove,
        crate::routes::user_profiles::create,
        crate::routes::user_profiles::list,
        crate::routes::user_profiles::get_one,
        crate::routes::user_profiles::update,
        crate::routes::user_profiles::remove,
    ),
    components(
        schemas(
            HealthResponse,
            UpdateReportDoc,
            PhoneDoc,
            CreateUserDoc,
            UpdateUserDoc,
            CreateEmployeeDoc,
            UpdateEmployeeDoc,
            CreateDepartmentDoc,
            UpdateDepartmentDoc,
            CreateRoleDoc,
            UpdateRoleDoc,
            CreateUserProfileDoc,
            UpdateUserProfileDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "employees"),
        (name = "departments"),
        (name = "roles"),
        (name = "user-profiles")
    )
)]
pub struct ApiDoc;
