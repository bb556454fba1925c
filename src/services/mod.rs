//! Business logic services

pub mod admins;
pub mod auth;
pub mod email;
pub mod librarians;

use crate::{
    config::{AuthConfig, EmailConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub admins: admins::AdminsService,
    pub librarians: librarians::LibrariansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig, email_config: EmailConfig) -> Self {
        let email = email::EmailService::new(email_config);
        Self {
            admins: admins::AdminsService::new(
                repository.clone(),
                auth_config.clone(),
                email.clone(),
            ),
            librarians: librarians::LibrariansService::new(repository, auth_config, email),
        }
    }
}
