//! Service layer providing business-oriented CRUD operations on top of models.
//! - One module per resource, mirroring the HTTP surface.
//! - Relation mutators check both sides exist before touching the
//!   association, and absence is always a distinct NotFound outcome.

pub mod errors;
pub mod query;

pub mod department_service;
pub mod employee_service;
pub mod role_service;
pub mod user_profile_service;
pub mod user_service;

#[cfg(test)]
pub mod test_support;
