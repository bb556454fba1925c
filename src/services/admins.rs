//! Admin account management service

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        admin::{Admin, AdminStatus, CreateAdmin, UpdateAdmin},
        auth::{Claims, LoginRequest, LoginResponse},
        librarian::Librarian,
        profile::{AdminProfile, UpsertProfile},
        StaffRole,
    },
    repository::Repository,
    services::{auth, email::EmailService},
};

#[derive(Clone)]
pub struct AdminsService {
    repository: Repository,
    config: AuthConfig,
    email: EmailService,
}

impl AdminsService {
    pub fn new(repository: Repository, config: AuthConfig, email: EmailService) -> Self {
        Self {
            repository,
            config,
            email,
        }
    }

    /// Register a new admin account
    pub async fn register(&self, create: CreateAdmin) -> AppResult<Admin> {
        if self.repository.admins.email_exists(&create.email, None).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let password = auth::hash_password(&create.password)?;
        let admin = self.repository.admins.create(&create, &password).await?;

        // Welcome email is best-effort: never fails the registration
        if let Err(e) = self
            .email
            .send_welcome(&admin.email, &admin.full_name, StaffRole::Admin)
            .await
        {
            tracing::warn!("Failed to send welcome email to {}: {}", admin.email, e);
        }

        Ok(admin)
    }

    /// Authenticate an admin by email and issue a bearer token
    pub async fn login(&self, login: LoginRequest) -> AppResult<LoginResponse> {
        let admin = self
            .repository
            .admins
            .get_by_email(&login.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if !auth::verify_password(&admin.password, &login.password)? {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let claims = Claims::new(
            admin.id,
            &admin.email,
            StaffRole::Admin,
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

    /// List admins, optionally filtered by status
    pub async fn find_all(&self, status: Option<AdminStatus>) -> AppResult<Vec<Admin>> {
        self.repository.admins.list(status).await
    }

    /// Get one admin by id
    pub async fn find_by_id(&self, id: i32) -> AppResult<Admin> {
        self.repository.admins.get_by_id(id).await
    }

    /// Search admins by name substring
    pub async fn search_by_name(&self, name: &str) -> AppResult<Vec<Admin>> {
        self.repository.admins.search_by_name(name).await
    }

    /// Admins strictly older than the given age
    pub async fn older_than(&self, age: i32) -> AppResult<Vec<Admin>> {
        self.repository.admins.older_than(age).await
    }

    /// Partial update; a changed email is re-checked for uniqueness
    pub async fn update(&self, id: i32, update: UpdateAdmin) -> AppResult<Admin> {
        let existing = self.repository.admins.get_by_id(id).await?;

        if let Some(ref email) = update.email {
            if email != &existing.email
                && self.repository.admins.email_exists(email, Some(id)).await?
            {
                return Err(AppError::Conflict("Email is already registered".to_string()));
            }
        }

        let password = match update.password {
            Some(ref password) => Some(auth::hash_password(password)?),
            None => None,
        };

        self.repository.admins.update(id, &update, password).await
    }

    /// Narrow single-field status mutation
    pub async fn change_status(&self, id: i32, status: AdminStatus) -> AppResult<Admin> {
        self.repository.admins.get_by_id(id).await?;
        self.repository.admins.set_status(id, status).await
    }

    /// Delete an admin; supervised librarians keep existing with a null supervisor
    pub async fn remove(&self, id: i32) -> AppResult<String> {
        self.repository.admins.get_by_id(id).await?;
        self.repository.admins.delete(id).await?;
        Ok(format!("Admin with id {} deleted", id))
    }

    /// Get the admin's profile (null when absent)
    pub async fn get_profile(&self, admin_id: i32) -> AppResult<Option<AdminProfile>> {
        self.repository.admins.get_by_id(admin_id).await?;
        self.repository.admins.get_profile(admin_id).await
    }

    /// Create or merge the admin's profile and return the updated admin
    pub async fn upsert_profile(&self, admin_id: i32, profile: UpsertProfile) -> AppResult<Admin> {
        self.repository.admins.get_by_id(admin_id).await?;
        self.repository.admins.upsert_profile(admin_id, &profile).await?;
        self.repository.admins.get_by_id(admin_id).await
    }

    /// Delete the admin's profile
    pub async fn delete_profile(&self, admin_id: i32) -> AppResult<()> {
        self.repository.admins.get_by_id(admin_id).await?;
        self.repository.admins.delete_profile(admin_id).await
    }

    /// Librarians supervised by this admin
    pub async fn supervised_librarians(&self, admin_id: i32) -> AppResult<Vec<Librarian>> {
        self.repository.admins.get_by_id(admin_id).await?;
        self.repository.librarians.list_by_supervisor(admin_id).await
    }

    /// Assign a librarian to this admin (admin-side supervision assignment)
    pub async fn assign_librarian(&self, admin_id: i32, librarian_id: i32) -> AppResult<Librarian> {
        self.repository.admins.get_by_id(admin_id).await?;
        self.repository.librarians.get_by_id(librarian_id).await?;
        self.repository
            .librarians
            .assign_supervisor(librarian_id, admin_id)
            .await
    }
}
