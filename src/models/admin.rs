//! Admin model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{
    librarian::LibrarianSummary,
    profile::AdminProfile,
    StaffRole,
};

/// Admin account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
    Active,
    Inactive,
}

impl AdminStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminStatus::Active => "active",
            AdminStatus::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for AdminStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AdminStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AdminStatus::Active),
            "inactive" => Ok(AdminStatus::Inactive),
            _ => Err(format!("Invalid admin status: {}", s)),
        }
    }
}

// SQLx conversion for AdminStatus (stored as TEXT)
impl sqlx::Type<Postgres> for AdminStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for AdminStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for AdminStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Internal row structure for database queries
#[derive(Debug, Clone, FromRow)]
pub struct AdminRow {
    id: i32,
    full_name: String,
    email: String,
    password: String,
    phone: String,
    age: i32,
    role: String,
    status: AdminStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            password: row.password,
            phone: row.phone,
            age: row.age,
            role: row.role,
            status: row.status,
            profile: None,
            librarians: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Full admin model from database
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Admin {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: String,
    pub age: i32,
    pub role: String,
    pub status: AdminStatus,
    pub profile: Option<AdminProfile>,
    /// Librarians supervised by this admin
    pub librarians: Vec<LibrarianSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short admin representation embedded in librarian responses
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AdminSummary {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub status: AdminStatus,
}

/// Admin list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AdminQuery {
    pub status: Option<AdminStatus>,
}

/// Name search query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct NameQuery {
    pub name: Option<String>,
}

/// Create admin request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdmin {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    pub full_name: String,
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(custom(function = "crate::models::validate_digits"))]
    pub phone: String,
    #[validate(range(min = 18, max = 80, message = "Age must be between 18 and 80"))]
    pub age: i32,
    pub role: Option<StaffRole>,
    pub status: Option<AdminStatus>,
}

/// Partial admin update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAdmin {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    pub full_name: Option<String>,
    #[validate(email(message = "Email is not valid"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: Option<String>,
    #[validate(custom(function = "crate::models::validate_digits"))]
    pub phone: Option<String>,
    #[validate(range(min = 18, max = 80, message = "Age must be between 18 and 80"))]
    pub age: Option<i32>,
    pub role: Option<StaffRole>,
    pub status: Option<AdminStatus>,
}

/// Narrow status mutation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeStatus {
    pub status: AdminStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateAdmin {
        CreateAdmin {
            full_name: "Grace Hopper".to_string(),
            email: "grace@example.org".to_string(),
            password: "Secret1".to_string(),
            phone: "0123456789".to_string(),
            age: 45,
            role: None,
            status: None,
        }
    }

    #[test]
    fn valid_payload_passes_validation() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn short_name_is_rejected() {
        let mut dto = valid_create();
        dto.full_name = "G".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut dto = valid_create();
        dto.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn age_outside_range_is_rejected() {
        let mut dto = valid_create();
        dto.age = 17;
        assert!(dto.validate().is_err());
        dto.age = 81;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn non_numeric_phone_is_rejected() {
        let mut dto = valid_create();
        dto.phone = "555-HELLO".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn partial_update_allows_absent_fields() {
        let dto = UpdateAdmin {
            full_name: None,
            email: None,
            password: None,
            phone: Some("987654".to_string()),
            age: None,
            role: None,
            status: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!("active".parse::<AdminStatus>().is_ok());
        assert!("retired".parse::<AdminStatus>().is_err());
    }
}
