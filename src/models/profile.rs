//! One-to-one profile records attached to staff entities

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Optional auxiliary record owned by exactly one admin
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdminProfile {
    pub id: i32,
    pub address: Option<String>,
    pub bio: Option<String>,
}

/// Optional auxiliary record sharing its id with the owning librarian
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LibrarianProfile {
    pub id: i32,
    pub address: Option<String>,
    pub bio: Option<String>,
}

/// Profile upsert payload: absent fields leave stored values unchanged
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertProfile {
    pub address: Option<String>,
    pub bio: Option<String>,
}
