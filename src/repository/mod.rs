//! Repository layer for database operations

pub mod admins;
pub mod librarians;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub admins: admins::AdminsRepository,
    pub librarians: librarians::LibrariansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            admins: admins::AdminsRepository::new(pool.clone()),
            librarians: librarians::LibrariansRepository::new(pool.clone()),
            pool,
        }
    }
}
