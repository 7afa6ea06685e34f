//! OpenAPI documentation, served as JSON at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::api::handlers::{asset_handler, health_handler, user_handler};
use crate::domain::{Asset, UserResponse};
use crate::errors::ErrorResponse;

/// OpenAPI documentation for the portfolio tracker
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio Tracker",
        description = "Asset and user records over in-memory or relational storage",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        health_handler::health,
        asset_handler::create_asset,
        asset_handler::get_asset,
        asset_handler::list_assets,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::get_user_by_email,
    ),
    components(
        schemas(
            Asset,
            UserResponse,
            ErrorResponse,
            health_handler::HealthResponse,
            asset_handler::CreateAssetRequest,
            user_handler::CreateUserRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Assets", description = "Tracked financial assets"),
        (name = "Users", description = "User accounts")
    )
)]
pub struct ApiDoc;
