//! Librarian model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{admin::AdminSummary, profile::LibrarianProfile};

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct LibrarianRow {
    id: i32,
    first_name: String,
    last_name: String,
    full_name: String,
    email: String,
    password: String,
    phone: String,
    age: i32,
    designation: String,
    is_active: bool,
    supervisor_id: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LibrarianRow {
    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn supervisor_id(&self) -> Option<i32> {
        self.supervisor_id
    }
}

impl From<LibrarianRow> for Librarian {
    fn from(row: LibrarianRow) -> Self {
        Librarian {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            full_name: row.full_name,
            email: row.email,
            password: row.password,
            phone: row.phone,
            age: row.age,
            designation: row.designation,
            is_active: row.is_active,
            profile: None,
            supervisor: None,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Full librarian model from database
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Librarian {
    /// 6-digit numeric id, generated at creation when absent
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Built from first and last name when not supplied
    pub full_name: String,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: String,
    pub age: i32,
    pub designation: String,
    pub is_active: bool,
    pub profile: Option<LibrarianProfile>,
    /// The supervising admin, if assigned
    pub supervisor: Option<AdminSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short librarian representation embedded in admin responses
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LibrarianSummary {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub designation: String,
    pub is_active: bool,
}

/// Librarian search query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct LibrarianQuery {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Create librarian request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLibrarian {
    #[validate(length(min = 2, message = "First name must be at least 2 characters long"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters long"))]
    pub last_name: String,
    /// Derived from first and last name when omitted
    pub full_name: Option<String>,
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(custom(function = "crate::models::validate_digits"))]
    pub phone: String,
    #[validate(range(min = 18, max = 70, message = "Age must be between 18 and 70"))]
    pub age: i32,
    pub designation: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial librarian update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLibrarian {
    #[validate(length(min = 2, message = "First name must be at least 2 characters long"))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters long"))]
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    #[validate(email(message = "Email is not valid"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: Option<String>,
    #[validate(custom(function = "crate::models::validate_digits"))]
    pub phone: Option<String>,
    #[validate(range(min = 18, max = 70, message = "Age must be between 18 and 70"))]
    pub age: Option<i32>,
    pub designation: Option<String>,
    pub is_active: Option<bool>,
}

/// Narrow active-flag mutation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeActive {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateLibrarian {
        CreateLibrarian {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            full_name: None,
            email: "ann@x.com".to_string(),
            password: "Secret1".to_string(),
            phone: "12345".to_string(),
            age: 30,
            designation: Some("Clerk".to_string()),
            is_active: Some(true),
        }
    }

    #[test]
    fn valid_payload_passes_validation() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn librarian_age_cap_is_seventy() {
        let mut dto = valid_create();
        dto.age = 70;
        assert!(dto.validate().is_ok());
        dto.age = 71;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn short_last_name_is_rejected() {
        let mut dto = valid_create();
        dto.last_name = "L".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn password_shorter_than_six_is_rejected() {
        let mut dto = valid_create();
        dto.password = "abc".to_string();
        assert!(dto.validate().is_err());
    }
}
