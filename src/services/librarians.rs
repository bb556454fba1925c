//! Librarian account management service

use rand::Rng;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        admin::AdminSummary,
        auth::{Claims, LoginRequest, LoginResponse},
        librarian::{ChangeActive, CreateLibrarian, Librarian, LibrarianQuery, UpdateLibrarian},
        profile::{LibrarianProfile, UpsertProfile},
        StaffRole,
    },
    repository::Repository,
    services::{auth, email::EmailService},
};

/// Librarian ids are 6-digit numbers generated at creation
const ID_GENERATION_ATTEMPTS: u32 = 5;

/// Pick a random candidate id in the 6-digit range
fn generate_candidate_id() -> i32 {
    rand::thread_rng().gen_range(100_000..=999_999)
}

/// Full name defaults to "first last" when not supplied
fn build_full_name(first: &str, last: &str, supplied: Option<&str>) -> String {
    match supplied {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("{} {}", first, last),
    }
}

#[derive(Clone)]
pub struct LibrariansService {
    repository: Repository,
    config: AuthConfig,
    email: EmailService,
}

impl LibrariansService {
    pub fn new(repository: Repository, config: AuthConfig, email: EmailService) -> Self {
        Self {
            repository,
            config,
            email,
        }
    }

    /// Register a new librarian account with a generated 6-digit id
    pub async fn register(&self, create: CreateLibrarian) -> AppResult<Librarian> {
        if self
            .repository
            .librarians
            .email_exists(&create.email, None)
            .await?
        {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let id = self.generate_id().await?;
        let full_name = build_full_name(
            &create.first_name,
            &create.last_name,
            create.full_name.as_deref(),
        );
        let password = auth::hash_password(&create.password)?;

        let librarian = self
            .repository
            .librarians
            .create(id, &create, &full_name, &password)
            .await?;

        // Welcome email is best-effort: never fails the registration
        if let Err(e) = self
            .email
            .send_welcome(&librarian.email, &librarian.first_name, StaffRole::Librarian)
            .await
        {
            tracing::warn!("Failed to send welcome email to {}: {}", librarian.email, e);
        }

        Ok(librarian)
    }

    /// Authenticate a librarian by email and issue a bearer token
    pub async fn login(&self, login: LoginRequest) -> AppResult<LoginResponse> {
        let librarian = self
            .repository
            .librarians
            .get_by_email(&login.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if !auth::verify_password(&librarian.password, &login.password)? {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let claims = Claims::new(
            librarian.id,
            &librarian.email,
            StaffRole::Librarian,
            self.config.jwt_expiration_hours,
        );
        let access_token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            access_token,
        })
    }

    /// List librarians newest-first
    pub async fn find_all(&self) -> AppResult<Vec<Librarian>> {
        self.repository.librarians.list().await
    }

    /// Get one librarian by id
    pub async fn find_by_id(&self, id: i32) -> AppResult<Librarian> {
        self.repository.librarians.get_by_id(id).await
    }

    /// Get one librarian by email
    pub async fn find_by_email(&self, email: &str) -> AppResult<Librarian> {
        self.repository
            .librarians
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Librarian with email \"{}\" not found", email)))
    }

    /// Get one librarian by exact phone number
    pub async fn find_by_phone(&self, phone: &str) -> AppResult<Librarian> {
        self.repository
            .librarians
            .get_by_phone(phone)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Librarian not found for phone: {}", phone)))
    }

    /// Search by name and/or phone substring; zero matches is an empty list
    pub async fn search(&self, query: &LibrarianQuery) -> AppResult<Vec<Librarian>> {
        self.repository.librarians.search(query).await
    }

    /// Partial update; a changed email is re-checked for uniqueness
    pub async fn update(&self, id: i32, update: UpdateLibrarian) -> AppResult<Librarian> {
        let existing = self.repository.librarians.get_by_id(id).await?;

        if let Some(ref email) = update.email {
            if email != &existing.email
                && self
                    .repository
                    .librarians
                    .email_exists(email, Some(id))
                    .await?
            {
                return Err(AppError::Conflict("Email is already registered".to_string()));
            }
        }

        let password = match update.password {
            Some(ref password) => Some(auth::hash_password(password)?),
            None => None,
        };

        self.repository.librarians.update(id, &update, password).await
    }

    /// Narrow single-field active-flag mutation
    pub async fn change_active(&self, id: i32, change: ChangeActive) -> AppResult<Librarian> {
        self.repository.librarians.get_by_id(id).await?;
        self.repository.librarians.set_active(id, change.is_active).await
    }

    /// Delete a librarian by id
    pub async fn remove(&self, id: i32) -> AppResult<String> {
        self.repository.librarians.get_by_id(id).await?;
        self.repository.librarians.delete(id).await?;
        Ok(format!("Librarian with id {} deleted", id))
    }

    /// Delete a librarian by email
    pub async fn remove_by_email(&self, email: &str) -> AppResult<String> {
        let librarian = self.find_by_email(email).await?;
        self.repository.librarians.delete(librarian.id).await?;
        Ok(format!("Librarian with email {} deleted", email))
    }

    /// Delete a librarian by phone
    pub async fn remove_by_phone(&self, phone: &str) -> AppResult<String> {
        let librarian = self.find_by_phone(phone).await?;
        self.repository.librarians.delete(librarian.id).await?;
        Ok(format!("Librarian with phone {} deleted", phone))
    }

    /// Get the librarian's profile (null when absent)
    pub async fn get_profile(&self, librarian_id: i32) -> AppResult<Option<LibrarianProfile>> {
        self.repository.librarians.get_by_id(librarian_id).await?;
        self.repository.librarians.get_profile(librarian_id).await
    }

    /// Create or merge the librarian's profile and return the updated librarian
    pub async fn upsert_profile(
        &self,
        librarian_id: i32,
        profile: UpsertProfile,
    ) -> AppResult<Librarian> {
        self.repository.librarians.get_by_id(librarian_id).await?;
        self.repository
            .librarians
            .upsert_profile(librarian_id, &profile)
            .await?;
        self.repository.librarians.get_by_id(librarian_id).await
    }

    /// Delete the librarian's profile
    pub async fn delete_profile(&self, librarian_id: i32) -> AppResult<()> {
        self.repository.librarians.get_by_id(librarian_id).await?;
        self.repository.librarians.delete_profile(librarian_id).await
    }

    /// Assign a supervising admin; both sides must exist
    pub async fn assign_supervisor(
        &self,
        librarian_id: i32,
        admin_id: i32,
    ) -> AppResult<Librarian> {
        self.repository.librarians.get_by_id(librarian_id).await?;
        self.repository.admins.get_by_id(admin_id).await?;
        self.repository
            .librarians
            .assign_supervisor(librarian_id, admin_id)
            .await
    }

    /// The librarian's supervisor; null when unassigned, not an error
    pub async fn get_supervisor(&self, librarian_id: i32) -> AppResult<Option<AdminSummary>> {
        self.repository.librarians.get_by_id(librarian_id).await?;
        self.repository.librarians.get_supervisor(librarian_id).await
    }

    /// All librarians assigned to the given supervisor
    pub async fn by_supervisor(&self, admin_id: i32) -> AppResult<Vec<Librarian>> {
        self.repository.librarians.list_by_supervisor(admin_id).await
    }

    /// Generate a unique 6-digit id, retrying on collision
    async fn generate_id(&self) -> AppResult<i32> {
        for _ in 0..ID_GENERATION_ATTEMPTS {
            let candidate = generate_candidate_id();
            if !self.repository.librarians.id_exists(candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AppError::Internal(
            "Could not allocate a unique librarian id".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_ids_are_six_digits() {
        for _ in 0..1000 {
            let id = generate_candidate_id();
            assert!((100_000..=999_999).contains(&id));
        }
    }

    #[test]
    fn full_name_is_derived_when_absent() {
        assert_eq!(build_full_name("Ann", "Lee", None), "Ann Lee");
        assert_eq!(build_full_name("Ann", "Lee", Some("  ")), "Ann Lee");
    }

    #[test]
    fn supplied_full_name_wins() {
        assert_eq!(build_full_name("Ann", "Lee", Some("A. Lee")), "A. Lee");
    }
}
