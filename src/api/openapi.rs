//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admins, health, librarians};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BiblioStaff API",
        version = "0.1.0",
        description = "Library staff management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Admins
        admins::register,
        admins::login,
        admins::list,
        admins::search,
        admins::older_than,
        admins::get,
        admins::update,
        admins::change_status,
        admins::remove,
        admins::upsert_profile,
        admins::get_profile,
        admins::delete_profile,
        admins::supervised_librarians,
        admins::assign_librarian,
        // Librarians
        librarians::register,
        librarians::login,
        librarians::list,
        librarians::search,
        librarians::get_by_email,
        librarians::get_by_phone,
        librarians::get,
        librarians::update,
        librarians::change_active,
        librarians::remove,
        librarians::remove_by_email,
        librarians::remove_by_phone,
        librarians::upsert_profile,
        librarians::get_profile,
        librarians::delete_profile,
        librarians::assign_supervisor,
        librarians::get_supervisor,
        librarians::by_supervisor,
    ),
    components(
        schemas(
            // Auth
            crate::models::auth::StaffRole,
            crate::models::auth::LoginRequest,
            crate::models::auth::LoginResponse,
            // Admins
            crate::models::admin::Admin,
            crate::models::admin::AdminSummary,
            crate::models::admin::AdminStatus,
            crate::models::admin::AdminQuery,
            crate::models::admin::NameQuery,
            crate::models::admin::CreateAdmin,
            crate::models::admin::UpdateAdmin,
            crate::models::admin::ChangeStatus,
            // Librarians
            crate::models::librarian::Librarian,
            crate::models::librarian::LibrarianSummary,
            crate::models::librarian::LibrarianQuery,
            crate::models::librarian::CreateLibrarian,
            crate::models::librarian::UpdateLibrarian,
            crate::models::librarian::ChangeActive,
            // Profiles
            crate::models::profile::AdminProfile,
            crate::models::profile::LibrarianProfile,
            crate::models::profile::UpsertProfile,
            // Misc
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "admins", description = "Admin account management"),
        (name = "librarians", description = "Librarian account management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
