//! Admins repository for database operations

use std::collections::HashMap;

use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        admin::{Admin, AdminRow, AdminStatus, CreateAdmin, UpdateAdmin},
        librarian::LibrarianSummary,
        profile::{AdminProfile, UpsertProfile},
    },
};

/// Profile row carrying its owner id, used when batching profile lookups
#[derive(Debug, FromRow)]
struct OwnedProfileRow {
    id: i32,
    admin_id: i32,
    address: Option<String>,
    bio: Option<String>,
}

/// Librarian summary carrying its supervisor id, used when batching lookups
#[derive(Debug, FromRow)]
struct SupervisedRow {
    supervisor_id: i32,
    id: i32,
    full_name: String,
    email: String,
    designation: String,
    is_active: bool,
}

#[derive(Clone)]
pub struct AdminsRepository {
    pool: Pool<Postgres>,
}

impl AdminsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get admin by ID with profile and supervised librarians
    pub async fn get_by_id(&self, id: i32) -> AppResult<Admin> {
        let row = sqlx::query_as::<_, AdminRow>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Admin with id {} not found", id)))?;

        let mut admin = Admin::from(row);
        admin.profile = self.get_profile(id).await?;
        admin.librarians = self.supervised_librarians(id).await?;

        Ok(admin)
    }

    /// Get admin by email (no relations, used for login)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT * FROM admins WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Admin::from))
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM admins WHERE LOWER(email) = LOWER($1) AND id != $2)",
            )
            .bind(email)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admins WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// List admins newest-first, optionally filtered by status,
    /// with profile and supervised librarians attached
    pub async fn list(&self, status: Option<AdminStatus>) -> AppResult<Vec<Admin>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, AdminRow>(
                    "SELECT * FROM admins WHERE status = $1 ORDER BY created_at DESC",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AdminRow>("SELECT * FROM admins ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        let mut admins: Vec<Admin> = rows.into_iter().map(Admin::from).collect();
        let ids: Vec<i32> = admins.iter().map(|a| a.id).collect();

        // Attach relations in two batched queries instead of per-admin lookups
        let profile_rows = sqlx::query_as::<_, OwnedProfileRow>(
            "SELECT id, admin_id, address, bio FROM admin_profiles WHERE admin_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut profiles: HashMap<i32, AdminProfile> = profile_rows
            .into_iter()
            .map(|p| {
                (
                    p.admin_id,
                    AdminProfile {
                        id: p.id,
                        address: p.address,
                        bio: p.bio,
                    },
                )
            })
            .collect();

        let supervised = sqlx::query_as::<_, SupervisedRow>(
            r#"
            SELECT supervisor_id, id, full_name, email, designation, is_active
            FROM librarians
            WHERE supervisor_id = ANY($1)
            ORDER BY full_name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_supervisor: HashMap<i32, Vec<LibrarianSummary>> = HashMap::new();
        for row in supervised {
            by_supervisor
                .entry(row.supervisor_id)
                .or_default()
                .push(LibrarianSummary {
                    id: row.id,
                    full_name: row.full_name,
                    email: row.email,
                    designation: row.designation,
                    is_active: row.is_active,
                });
        }

        for admin in &mut admins {
            admin.profile = profiles.remove(&admin.id);
            admin.librarians = by_supervisor.remove(&admin.id).unwrap_or_default();
        }

        Ok(admins)
    }

    /// Search admins by full name substring (case-insensitive)
    pub async fn search_by_name(&self, name: &str) -> AppResult<Vec<Admin>> {
        let rows = sqlx::query_as::<_, AdminRow>(
            "SELECT * FROM admins WHERE full_name ILIKE $1 ORDER BY created_at DESC",
        )
        .bind(format!("%{}%", name))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Admin::from).collect())
    }

    /// Admins strictly older than the given age, descending
    pub async fn older_than(&self, age: i32) -> AppResult<Vec<Admin>> {
        let rows =
            sqlx::query_as::<_, AdminRow>("SELECT * FROM admins WHERE age > $1 ORDER BY age DESC")
                .bind(age)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Admin::from).collect())
    }

    /// Create a new admin
    pub async fn create(&self, admin: &CreateAdmin, password: &str) -> AppResult<Admin> {
        let role = admin.role.map(|r| r.as_str()).unwrap_or("admin");
        let status = admin.status.unwrap_or(AdminStatus::Active);

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO admins (full_name, email, password, phone, age, role, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&admin.full_name)
        .bind(&admin.email)
        .bind(password)
        .bind(&admin.phone)
        .bind(admin.age)
        .bind(role)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing admin (partial)
    pub async fn update(
        &self,
        id: i32,
        admin: &UpdateAdmin,
        password: Option<String>,
    ) -> AppResult<Admin> {
        let role = admin.role.map(|r| r.as_str().to_string());

        // Build dynamic update query
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut param_idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(admin.full_name, "full_name");
        add_field!(admin.email, "email");
        add_field!(admin.phone, "phone");
        add_field!(admin.age, "age");
        add_field!(role, "role");
        add_field!(admin.status, "status");

        if password.is_some() {
            sets.push(format!("password = ${}", param_idx));
        }

        let query = format!("UPDATE admins SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(admin.full_name);
        bind_field!(admin.email);
        bind_field!(admin.phone);
        bind_field!(admin.age);
        bind_field!(role);
        bind_field!(admin.status);

        if let Some(ref hash) = password {
            builder = builder.bind(hash);
        }

        builder.execute(&self.pool).await?;

        self.get_by_id(id).await
    }

    /// Set the status field only
    pub async fn set_status(&self, id: i32, status: AdminStatus) -> AppResult<Admin> {
        sqlx::query("UPDATE admins SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get_by_id(id).await
    }

    /// Delete an admin; the profile cascades and supervised librarians
    /// get their supervisor reference nulled by the foreign keys
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get the admin's profile, if any
    pub async fn get_profile(&self, admin_id: i32) -> AppResult<Option<AdminProfile>> {
        let profile = sqlx::query_as::<_, AdminProfile>(
            "SELECT id, address, bio FROM admin_profiles WHERE admin_id = $1",
        )
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Create or merge the admin's profile; absent fields keep stored values
    pub async fn upsert_profile(
        &self,
        admin_id: i32,
        profile: &UpsertProfile,
    ) -> AppResult<AdminProfile> {
        let saved = sqlx::query_as::<_, AdminProfile>(
            r#"
            INSERT INTO admin_profiles (admin_id, address, bio)
            VALUES ($1, $2, $3)
            ON CONFLICT (admin_id) DO UPDATE SET
                address = COALESCE(EXCLUDED.address, admin_profiles.address),
                bio = COALESCE(EXCLUDED.bio, admin_profiles.bio)
            RETURNING id, address, bio
            "#,
        )
        .bind(admin_id)
        .bind(&profile.address)
        .bind(&profile.bio)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    /// Delete the admin's profile; the owner remains
    pub async fn delete_profile(&self, admin_id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM admin_profiles WHERE admin_id = $1")
            .bind(admin_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Short summaries of the librarians supervised by this admin
    pub async fn supervised_librarians(&self, admin_id: i32) -> AppResult<Vec<LibrarianSummary>> {
        let librarians = sqlx::query_as::<_, LibrarianSummary>(
            r#"
            SELECT id, full_name, email, designation, is_active
            FROM librarians
            WHERE supervisor_id = $1
            ORDER BY full_name
            "#,
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(librarians)
    }
}
