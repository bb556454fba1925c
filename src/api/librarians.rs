//! Librarian management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        admin::AdminSummary,
        auth::{LoginRequest, LoginResponse},
        librarian::{ChangeActive, CreateLibrarian, Librarian, LibrarianQuery, UpdateLibrarian},
        profile::{LibrarianProfile, UpsertProfile},
    },
};

use super::{AuthenticatedStaff, MessageResponse};

/// Register a new librarian account
#[utoipa::path(
    post,
    path = "/librarian/register",
    tag = "librarians",
    request_body = CreateLibrarian,
    responses(
        (status = 201, description = "Librarian created", body = Librarian),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateLibrarian>,
) -> AppResult<(StatusCode, Json<Librarian>)> {
    payload.validate()?;

    let created = state.services.librarians.register(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Log in as a librarian
#[utoipa::path(
    post,
    path = "/librarian/login",
    tag = "librarians",
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

    let response = state.services.librarians.login(payload).await?;
    Ok(Json(response))
}

/// List librarians newest-first
#[utoipa::path(
    get,
    path = "/librarian",
    tag = "librarians",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of librarians", body = [Librarian]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
) -> AppResult<Json<Vec<Librarian>>> {
    let librarians = state.services.librarians.find_all().await?;
    Ok(Json(librarians))
}

/// Search librarians by name and/or phone substring
#[utoipa::path(
    get,
    path = "/librarian/search",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(LibrarianQuery),
    responses(
        (status = 200, description = "Matching librarians (possibly empty)", body = [Librarian])
    )
)]
pub async fn search(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Query(query): Query<LibrarianQuery>,
) -> AppResult<Json<Vec<Librarian>>> {
    let librarians = state.services.librarians.search(&query).await?;
    Ok(Json(librarians))
}

/// Get librarian by email
#[utoipa::path(
    get,
    path = "/librarian/email/{email}",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Email address")),
    responses(
        (status = 200, description = "Librarian details", body = Librarian),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn get_by_email(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(email): Path<String>,
) -> AppResult<Json<Librarian>> {
    let librarian = state.services.librarians.find_by_email(&email).await?;
    Ok(Json(librarian))
}

/// Get librarian by exact phone number
#[utoipa::path(
    get,
    path = "/librarian/phone/{phone}",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("phone" = String, Path, description = "Phone number")),
    responses(
        (status = 200, description = "Librarian details", body = Librarian),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn get_by_phone(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(phone): Path<String>,
) -> AppResult<Json<Librarian>> {
    let librarian = state.services.librarians.find_by_phone(&phone).await?;
    Ok(Json(librarian))
}

/// Get librarian details by ID
#[utoipa::path(
    get,
    path = "/librarian/{id}",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Librarian ID")),
    responses(
        (status = 200, description = "Librarian details", body = Librarian),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn get(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<Json<Librarian>> {
    let librarian = state.services.librarians.find_by_id(id).await?;
    Ok(Json(librarian))
}

/// Update an existing librarian (partial)
#[utoipa::path(
    put,
    path = "/librarian/{id}",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Librarian ID")),
    request_body = UpdateLibrarian,
    responses(
        (status = 200, description = "Librarian updated", body = Librarian),
        (status = 404, description = "Librarian not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLibrarian>,
) -> AppResult<Json<Librarian>> {
    payload.validate()?;

    let updated = state.services.librarians.update(id, payload).await?;
    Ok(Json(updated))
}

/// Change the librarian's active flag only
#[utoipa::path(
    patch,
    path = "/librarian/{id}/active",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Librarian ID")),
    request_body = ChangeActive,
    responses(
        (status = 200, description = "Active flag changed", body = Librarian),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn change_active(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(payload): Json<ChangeActive>,
) -> AppResult<Json<Librarian>> {
    let updated = state.services.librarians.change_active(id, payload).await?;
    Ok(Json(updated))
}

/// Delete a librarian
#[utoipa::path(
    delete,
    path = "/librarian/{id}",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Librarian ID")),
    responses(
        (status = 200, description = "Librarian deleted", body = MessageResponse),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn remove(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.services.librarians.remove(id).await?;
    Ok(Json(MessageResponse { message }))
}

/// Delete a librarian by email
#[utoipa::path(
    delete,
    path = "/librarian/email/{email}",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Email address")),
    responses(
        (status = 200, description = "Librarian deleted", body = MessageResponse),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn remove_by_email(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(email): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.services.librarians.remove_by_email(&email).await?;
    Ok(Json(MessageResponse { message }))
}

/// Delete a librarian by phone
#[utoipa::path(
    delete,
    path = "/librarian/phone/{phone}",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("phone" = String, Path, description = "Phone number")),
    responses(
        (status = 200, description = "Librarian deleted", body = MessageResponse),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn remove_by_phone(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(phone): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.services.librarians.remove_by_phone(&phone).await?;
    Ok(Json(MessageResponse { message }))
}

/// Create or merge the librarian's profile
#[utoipa::path(
    put,
    path = "/librarian/{id}/profile",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Librarian ID")),
    request_body = UpsertProfile,
    responses(
        (status = 200, description = "Profile upserted", body = Librarian),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn upsert_profile(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(payload): Json<UpsertProfile>,
) -> AppResult<Json<Librarian>> {
    let librarian = state.services.librarians.upsert_profile(id, payload).await?;
    Ok(Json(librarian))
}

/// Get the librarian's profile (null when absent)
#[utoipa::path(
    get,
    path = "/librarian/{id}/profile",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Librarian ID")),
    responses(
        (status = 200, description = "Profile or null", body = Option<LibrarianProfile>),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn get_profile(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<Json<Option<LibrarianProfile>>> {
    let profile = state.services.librarians.get_profile(id).await?;
    Ok(Json(profile))
}

/// Delete the librarian's profile
#[utoipa::path(
    delete,
    path = "/librarian/{id}/profile",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Librarian ID")),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn delete_profile(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.librarians.delete_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assign a supervising admin to the librarian
#[utoipa::path(
    put,
    path = "/librarian/{id}/supervisor/{admin_id}",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Librarian ID"),
        ("admin_id" = i32, Path, description = "Admin ID")
    ),
    responses(
        (status = 200, description = "Supervisor assigned", body = Librarian),
        (status = 404, description = "Librarian or admin not found")
    )
)]
pub async fn assign_supervisor(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path((id, admin_id)): Path<(i32, i32)>,
) -> AppResult<Json<Librarian>> {
    let librarian = state
        .services
        .librarians
        .assign_supervisor(id, admin_id)
        .await?;
    Ok(Json(librarian))
}

/// The librarian's supervisor (null when unassigned)
#[utoipa::path(
    get,
    path = "/librarian/{id}/supervisor",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Librarian ID")),
    responses(
        (status = 200, description = "Supervisor or null", body = Option<AdminSummary>),
        (status = 404, description = "Librarian not found")
    )
)]
pub async fn get_supervisor(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<Json<Option<AdminSummary>>> {
    let supervisor = state.services.librarians.get_supervisor(id).await?;
    Ok(Json(supervisor))
}

/// All librarians assigned to the given supervisor
#[utoipa::path(
    get,
    path = "/librarian/supervisor/{admin_id}",
    tag = "librarians",
    security(("bearer_auth" = [])),
    params(("admin_id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Supervised librarians", body = [Librarian])
    )
)]
pub async fn by_supervisor(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(admin_id): Path<i32>,
) -> AppResult<Json<Vec<Librarian>>> {
    let librarians = state.services.librarians.by_supervisor(admin_id).await?;
    Ok(Json(librarians))
}
