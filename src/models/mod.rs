//! Data models for the staff management server

pub mod admin;
pub mod auth;
pub mod librarian;
pub mod profile;

// Re-export commonly used types
pub use admin::{Admin, AdminStatus, AdminSummary};
pub use auth::{Claims, StaffRole};
pub use librarian::{Librarian, LibrarianSummary};
pub use profile::{AdminProfile, LibrarianProfile};

use validator::ValidationError;

/// Phone numbers are numeric strings (digits only, no separators)
pub fn validate_digits(phone: &str) -> Result<(), ValidationError> {
    if !phone.is_empty() && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("digits");
        err.message = Some("Phone must contain only digits".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::validate_digits;

    #[test]
    fn digits_only_phone_is_accepted() {
        assert!(validate_digits("0123456789").is_ok());
    }

    #[test]
    fn phone_with_separators_is_rejected() {
        assert!(validate_digits("01-23-45").is_err());
        assert!(validate_digits("+33123456").is_err());
        assert!(validate_digits("").is_err());
    }
}
