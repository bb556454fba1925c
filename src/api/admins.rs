//! Admin management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        admin::{Admin, AdminQuery, ChangeStatus, CreateAdmin, NameQuery, UpdateAdmin},
        auth::{LoginRequest, LoginResponse},
        librarian::Librarian,
        profile::{AdminProfile, UpsertProfile},
    },
};

use super::{AuthenticatedStaff, MessageResponse};

/// Register a new admin account
#[utoipa::path(
    post,
    path = "/admin/register",
    tag = "admins",
    request_body = CreateAdmin,
    responses(
        (status = 201, description = "Admin created", body = Admin),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateAdmin>,
) -> AppResult<(StatusCode, Json<Admin>)> {
    payload.validate()?;

    let created = state.services.admins.register(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Log in as an admin
#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "admins",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    let response = state.services.admins.login(payload).await?;
    Ok(Json(response))
}

/// List admins, optionally filtered by status
#[utoipa::path(
    get,
    path = "/admin",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(AdminQuery),
    responses(
        (status = 200, description = "List of admins", body = [Admin]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Query(query): Query<AdminQuery>,
) -> AppResult<Json<Vec<Admin>>> {
    let admins = state.services.admins.find_all(query.status).await?;
    Ok(Json(admins))
}

/// Search admins by name substring
#[utoipa::path(
    get,
    path = "/admin/search",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(NameQuery),
    responses(
        (status = 200, description = "Matching admins (possibly empty)", body = [Admin]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn search(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Query(query): Query<NameQuery>,
) -> AppResult<Json<Vec<Admin>>> {
    let admins = state
        .services
        .admins
        .search_by_name(query.name.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(admins))
}

/// Admins strictly older than the given age, descending
#[utoipa::path(
    get,
    path = "/admin/older-than/{age}",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(("age" = i32, Path, description = "Age threshold (exclusive)")),
    responses(
        (status = 200, description = "Matching admins", body = [Admin])
    )
)]
pub async fn older_than(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(age): Path<i32>,
) -> AppResult<Json<Vec<Admin>>> {
    let admins = state.services.admins.older_than(age).await?;
    Ok(Json(admins))
}

/// Get admin details by ID
#[utoipa::path(
    get,
    path = "/admin/{id}",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin details", body = Admin),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn get(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<Json<Admin>> {
    let admin = state.services.admins.find_by_id(id).await?;
    Ok(Json(admin))
}

/// Update an existing admin (partial)
#[utoipa::path(
    put,
    path = "/admin/{id}",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    request_body = UpdateAdmin,
    responses(
        (status = 200, description = "Admin updated", body = Admin),
        (status = 404, description = "Admin not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAdmin>,
) -> AppResult<Json<Admin>> {
    payload.validate()?;

    let updated = state.services.admins.update(id, payload).await?;
    Ok(Json(updated))
}

/// Change the admin's status only
#[utoipa::path(
    patch,
    path = "/admin/{id}/status",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    request_body = ChangeStatus,
    responses(
        (status = 200, description = "Status changed", body = Admin),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn change_status(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(payload): Json<ChangeStatus>,
) -> AppResult<Json<Admin>> {
    let updated = state.services.admins.change_status(id, payload.status).await?;
    Ok(Json(updated))
}

/// Delete an admin
#[utoipa::path(
    delete,
    path = "/admin/{id}",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin deleted", body = MessageResponse),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn remove(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.services.admins.remove(id).await?;
    Ok(Json(MessageResponse { message }))
}

/// Create or merge the admin's profile
#[utoipa::path(
    put,
    path = "/admin/{id}/profile",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    request_body = UpsertProfile,
    responses(
        (status = 200, description = "Profile upserted", body = Admin),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn upsert_profile(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(payload): Json<UpsertProfile>,
) -> AppResult<Json<Admin>> {
    let admin = state.services.admins.upsert_profile(id, payload).await?;
    Ok(Json(admin))
}

/// Get the admin's profile (null when absent)
#[utoipa::path(
    get,
    path = "/admin/{id}/profile",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Profile or null", body = Option<AdminProfile>),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn get_profile(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<Json<Option<AdminProfile>>> {
    let profile = state.services.admins.get_profile(id).await?;
    Ok(Json(profile))
}

/// Delete the admin's profile
#[utoipa::path(
    delete,
    path = "/admin/{id}/profile",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn delete_profile(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.admins.delete_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Librarians supervised by this admin
#[utoipa::path(
    get,
    path = "/admin/{id}/librarians",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Supervised librarians", body = [Librarian]),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn supervised_librarians(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Librarian>>> {
    let librarians = state.services.admins.supervised_librarians(id).await?;
    Ok(Json(librarians))
}

/// Assign a librarian to this admin
#[utoipa::path(
    patch,
    path = "/admin/{id}/librarians/{librarian_id}",
    tag = "admins",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Admin ID"),
        ("librarian_id" = i32, Path, description = "Librarian ID")
    ),
    responses(
        (status = 200, description = "Librarian assigned", body = Librarian),
        (status = 404, description = "Admin or librarian not found")
    )
)]
pub async fn assign_librarian(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path((id, librarian_id)): Path<(i32, i32)>,
) -> AppResult<Json<Librarian>> {
    let librarian = state
        .services
        .admins
        .assign_librarian(id, librarian_id)
        .await?;
    Ok(Json(librarian))
}
