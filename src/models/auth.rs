//! Authentication types: roles, JWT claims and login payloads

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Staff role carried in issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Librarian,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Librarian => "librarian",
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(StaffRole::Admin),
            "librarian" => Ok(StaffRole::Librarian),
            _ => Err(format!("Invalid staff role: {}", s)),
        }
    }
}

/// JWT claims for authenticated staff members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the staff member's id
    pub sub: i32,
    pub email: String,
    pub role: StaffRole,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Build claims for a staff member with the configured expiry window
    pub fn new(id: i32, email: &str, role: StaffRole, expiration_hours: u64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: id,
            email: email.to_string(),
            role,
            exp: now + (expiration_hours as i64 * 3600),
            iat: now,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

/// Login request (shared by both roles)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    pub password: String,
}

/// Login response with the issued bearer token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_preserves_claims() {
        let claims = Claims::new(42, "ann@x.com", StaffRole::Librarian, 24);
        let token = claims.create_token("test-secret").expect("token");
        let parsed = Claims::from_token(&token, "test-secret").expect("claims");

        assert_eq!(parsed.sub, 42);
        assert_eq!(parsed.email, "ann@x.com");
        assert_eq!(parsed.role, StaffRole::Librarian);
        assert_eq!(parsed.exp, parsed.iat + 24 * 3600);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let claims = Claims::new(1, "a@b.com", StaffRole::Admin, 24);
        let token = claims.create_token("secret-a").expect("token");
        assert!(Claims::from_token(&token, "secret-b").is_err());
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("ADMIN".parse::<StaffRole>().unwrap(), StaffRole::Admin);
        assert_eq!("librarian".parse::<StaffRole>().unwrap(), StaffRole::Librarian);
        assert!("reader".parse::<StaffRole>().is_err());
    }
}
