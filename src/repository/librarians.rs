//! Librarians repository for database operations

use std::collections::HashMap;

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        admin::AdminSummary,
        librarian::{CreateLibrarian, Librarian, LibrarianQuery, LibrarianRow, UpdateLibrarian},
        profile::{LibrarianProfile, UpsertProfile},
    },
};

#[derive(Clone)]
pub struct LibrariansRepository {
    pool: Pool<Postgres>,
}

impl LibrariansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get librarian by ID with profile and supervisor
    pub async fn get_by_id(&self, id: i32) -> AppResult<Librarian> {
        let row = sqlx::query_as::<_, LibrarianRow>("SELECT * FROM librarians WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Librarian with id {} not found", id)))?;

        self.hydrate(row).await
    }

    /// Get librarian by email, with relations
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Librarian>> {
        let row = sqlx::query_as::<_, LibrarianRow>(
            "SELECT * FROM librarians WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Get librarian by exact phone number
    pub async fn get_by_phone(&self, phone: &str) -> AppResult<Option<Librarian>> {
        let row = sqlx::query_as::<_, LibrarianRow>("SELECT * FROM librarians WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM librarians WHERE LOWER(email) = LOWER($1) AND id != $2)",
            )
            .bind(email)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM librarians WHERE LOWER(email) = LOWER($1))",
            )
            .bind(email)
            .fetch_one(&self.pool)
            .await?
        };
        Ok(exists)
    }

    /// Check if an id is already taken (generated ids must be unique)
    pub async fn id_exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM librarians WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// List librarians newest-first with profile and supervisor attached
    pub async fn list(&self) -> AppResult<Vec<Librarian>> {
        let rows =
            sqlx::query_as::<_, LibrarianRow>("SELECT * FROM librarians ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        self.hydrate_all(rows).await
    }

    /// Search by name substring (case-insensitive on first/last name)
    /// and/or phone substring; empty query returns all
    pub async fn search(&self, query: &LibrarianQuery) -> AppResult<Vec<Librarian>> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref name) = query.name {
            params.push(format!("%{}%", name));
            conditions.push(format!(
                "(first_name ILIKE ${} OR last_name ILIKE ${})",
                params.len(),
                params.len()
            ));
        }

        if let Some(ref phone) = query.phone {
            params.push(format!("%{}%", phone));
            conditions.push(format!("phone LIKE ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!(
            "SELECT * FROM librarians {} ORDER BY created_at DESC",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, LibrarianRow>(&select_query);
        for param in &params {
            builder = builder.bind(param);
        }
        let rows = builder.fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Librarian::from).collect())
    }

    /// Create a new librarian with a pre-generated id and derived full name
    pub async fn create(
        &self,
        id: i32,
        librarian: &CreateLibrarian,
        full_name: &str,
        password: &str,
    ) -> AppResult<Librarian> {
        let designation = librarian.designation.as_deref().unwrap_or("Librarian");
        let is_active = librarian.is_active.unwrap_or(true);

        sqlx::query(
            r#"
            INSERT INTO librarians (
                id, first_name, last_name, full_name, email, password,
                phone, age, designation, is_active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(id)
        .bind(&librarian.first_name)
        .bind(&librarian.last_name)
        .bind(full_name)
        .bind(&librarian.email)
        .bind(password)
        .bind(&librarian.phone)
        .bind(librarian.age)
        .bind(designation)
        .bind(is_active)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing librarian (partial)
    pub async fn update(
        &self,
        id: i32,
        librarian: &UpdateLibrarian,
        password: Option<String>,
    ) -> AppResult<Librarian> {
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

        add_field!(librarian.first_name, "first_name");
        add_field!(librarian.last_name, "last_name");
        add_field!(librarian.full_name, "full_name");
        add_field!(librarian.email, "email");
        add_field!(librarian.phone, "phone");
        add_field!(librarian.age, "age");
        add_field!(librarian.designation, "designation");
        add_field!(librarian.is_active, "is_active");

        if password.is_some() {
            sets.push(format!("password = ${}", param_idx));
        }

        let query = format!("UPDATE librarians SET {} WHERE id = {}", sets.join(", "), id);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(librarian.first_name);
        bind_field!(librarian.last_name);
        bind_field!(librarian.full_name);
        bind_field!(librarian.email);
        bind_field!(librarian.phone);
        bind_field!(librarian.age);
        bind_field!(librarian.designation);
        bind_field!(librarian.is_active);

        if let Some(ref hash) = password {
            builder = builder.bind(hash);
        }

        builder.execute(&self.pool).await?;

        self.get_by_id(id).await
    }

    /// Set the active flag only
    pub async fn set_active(&self, id: i32, is_active: bool) -> AppResult<Librarian> {
        sqlx::query("UPDATE librarians SET is_active = $1, updated_at = NOW() WHERE id = $2")
            .bind(is_active)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get_by_id(id).await
    }

    /// Delete a librarian; the profile cascades via the foreign key
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM librarians WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get the librarian's profile, if any
    pub async fn get_profile(&self, librarian_id: i32) -> AppResult<Option<LibrarianProfile>> {
        let profile = sqlx::query_as::<_, LibrarianProfile>(
            "SELECT id, address, bio FROM librarian_profiles WHERE id = $1",
        )
        .bind(librarian_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Create or merge the librarian's profile (shares the owner's id);
    /// absent fields keep stored values
    pub async fn upsert_profile(
        &self,
        librarian_id: i32,
        profile: &UpsertProfile,
    ) -> AppResult<LibrarianProfile> {
        let saved = sqlx::query_as::<_, LibrarianProfile>(
            r#"
            INSERT INTO librarian_profiles (id, address, bio)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                address = COALESCE(EXCLUDED.address, librarian_profiles.address),
                bio = COALESCE(EXCLUDED.bio, librarian_profiles.bio)
            RETURNING id, address, bio
            "#,
        )
        .bind(librarian_id)
        .bind(&profile.address)
        .bind(&profile.bio)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    /// Delete the librarian's profile; the owner remains
    pub async fn delete_profile(&self, librarian_id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM librarian_profiles WHERE id = $1")
            .bind(librarian_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Point the librarian at a new supervising admin
    pub async fn assign_supervisor(&self, librarian_id: i32, admin_id: i32) -> AppResult<Librarian> {
        sqlx::query("UPDATE librarians SET supervisor_id = $1, updated_at = NOW() WHERE id = $2")
            .bind(admin_id)
            .bind(librarian_id)
            .execute(&self.pool)
            .await?;

        self.get_by_id(librarian_id).await
    }

    /// The supervising admin of a librarian, if assigned
    pub async fn get_supervisor(&self, librarian_id: i32) -> AppResult<Option<AdminSummary>> {
        let supervisor = sqlx::query_as::<_, AdminSummary>(
            r#"
            SELECT a.id, a.full_name, a.email, a.status
            FROM admins a
            JOIN librarians l ON l.supervisor_id = a.id
            WHERE l.id = $1
            "#,
        )
        .bind(librarian_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supervisor)
    }

    /// All librarians supervised by the given admin
    pub async fn list_by_supervisor(&self, admin_id: i32) -> AppResult<Vec<Librarian>> {
        let rows = sqlx::query_as::<_, LibrarianRow>(
            "SELECT * FROM librarians WHERE supervisor_id = $1 ORDER BY created_at DESC",
        )
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate_all(rows).await
    }

    /// Attach profile and supervisor to a single row
    async fn hydrate(&self, row: LibrarianRow) -> AppResult<Librarian> {
        let id = row.id();
        let supervisor_id = row.supervisor_id();
        let mut librarian = Librarian::from(row);

        librarian.profile = self.get_profile(id).await?;

        if let Some(admin_id) = supervisor_id {
            librarian.supervisor = sqlx::query_as::<_, AdminSummary>(
                "SELECT id, full_name, email, status FROM admins WHERE id = $1",
            )
            .bind(admin_id)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(librarian)
    }

    /// Attach profiles and supervisors to a row set with batched queries
    async fn hydrate_all(&self, rows: Vec<LibrarianRow>) -> AppResult<Vec<Librarian>> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id()).collect();
        let supervisor_ids: Vec<i32> = rows.iter().filter_map(|r| r.supervisor_id()).collect();
        let mut librarians: Vec<(Option<i32>, Librarian)> = rows
            .into_iter()
            .map(|r| (r.supervisor_id(), Librarian::from(r)))
            .collect();

        let profile_rows = sqlx::query_as::<_, LibrarianProfile>(
            "SELECT id, address, bio FROM librarian_profiles WHERE id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        let mut profiles: HashMap<i32, LibrarianProfile> =
            profile_rows.into_iter().map(|p| (p.id, p)).collect();

        let supervisor_rows = sqlx::query_as::<_, AdminSummary>(
            "SELECT id, full_name, email, status FROM admins WHERE id = ANY($1)",
        )
        .bind(&supervisor_ids)
        .fetch_all(&self.pool)
        .await?;
        let supervisors: HashMap<i32, AdminSummary> =
            supervisor_rows.into_iter().map(|a| (a.id, a)).collect();

        let result = librarians
            .drain(..)
            .map(|(supervisor_id, mut librarian)| {
                librarian.profile = profiles.remove(&librarian.id);
                librarian.supervisor =
                    supervisor_id.and_then(|sid| supervisors.get(&sid).cloned());
                librarian
            })
            .collect();

        Ok(result)
    }
}
