//! Asset handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::parse_id;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::ENTITY_ASSET;
use crate::domain::{Asset, NewAsset};
use crate::errors::{AppError, AppResult, ErrorResponse};

/// Asset creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssetRequest {
    /// Ticker symbol
    #[validate(length(min = 1, message = "symbol is required"))]
    #[schema(example = "BTC")]
    pub symbol: String,
    /// Display name
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "Bitcoin")]
    pub name: String,
}

/// Create asset routes
pub fn asset_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assets).post(create_asset))
        .route("/:id", get(get_asset))
}

/// Create an asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "Assets",
    request_body = CreateAssetRequest,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_asset(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAssetRequest>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    let asset = state
        .assets
        .create(NewAsset::new(payload.symbol, payload.name))
        .await
        .map_err(|e| AppError::from_repo(ENTITY_ASSET, e))?;

    tracing::info!(id = asset.id, symbol = %asset.symbol, "asset created");
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Get asset by ID
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "Assets",
    params(
        ("id" = i64, Path, description = "Asset ID")
    ),
    responses(
        (status = 200, description = "Asset", body = Asset),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Asset>> {
    let id = parse_id(&id)?;
    let asset = state
        .assets
        .get_by_id(id)
        .await
        .map_err(|e| AppError::from_repo(ENTITY_ASSET, e))?;

    tracing::debug!(id, "asset fetched");
    Ok(Json(asset))
}

/// List all assets
#[utoipa::path(
    get,
    path = "/assets",
    tag = "Assets",
    responses(
        (status = 200, description = "All stored assets", body = Vec<Asset>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_assets(State(state): State<AppState>) -> AppResult<Json<Vec<Asset>>> {
    let assets = state
        .assets
        .list()
        .await
        .map_err(|e| AppError::from_repo(ENTITY_ASSET, e))?;

    tracing::debug!(count = assets.len(), "assets listed");
    Ok(Json(assets))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request};
    use mockall::predicate::eq;
    use sea_orm::DbErr;
    use tower::ServiceExt;

    use super::*;
    use crate::api::create_router;
    use crate::infra::{InMemoryUserStore, MockAssetRepository, RepoError};

    fn app(repo: MockAssetRepository) -> Router {
        let state = AppState::new(Arc::new(repo), Arc::new(InMemoryUserStore::new()));
        create_router(state, Duration::from_secs(5))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_asset(body: &str) -> Request<Body> {
        Request::post("/assets")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_echoes_stored_asset() {
        let mut repo = MockAssetRepository::new();
        repo.expect_create()
            .with(eq(NewAsset::new("BTC", "Bitcoin")))
            .times(1)
            .returning(|asset| Ok(asset.into_asset(41)));

        let response = app(repo)
            .oneshot(post_asset(r#"{"symbol":"BTC","name":"Bitcoin"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "id": 41, "symbol": "BTC", "name": "Bitcoin" })
        );
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_repository() {
        for body in [
            r#"{"symbol":"","name":"Bitcoin"}"#,
            r#"{"name":"Bitcoin"}"#,
            r#"not json"#,
        ] {
            let mut repo = MockAssetRepository::new();
            repo.expect_create().never();

            let response = app(repo).oneshot(post_asset(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic_500() {
        let mut repo = MockAssetRepository::new();
        repo.expect_create().returning(|_| {
            Err(RepoError::Storage(DbErr::Custom(
                "relation \"assets\" does not exist".into(),
            )))
        });

        let response = app(repo)
            .oneshot(post_asset(r#"{"symbol":"BTC","name":"Bitcoin"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "internal server error" })
        );
    }

    #[tokio::test]
    async fn test_get_missing_asset_is_404() {
        let mut repo = MockAssetRepository::new();
        repo.expect_get_by_id()
            .with(eq(999))
            .returning(|_| Err(RepoError::NotFound));

        let response = app(repo)
            .oneshot(Request::get("/assets/999").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "asset not found" })
        );
    }

    #[tokio::test]
    async fn test_malformed_id_is_400() {
        let mut repo = MockAssetRepository::new();
        repo.expect_get_by_id().never();

        let response = app(repo)
            .oneshot(Request::get("/assets/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "invalid id format" })
        );
    }

    #[tokio::test]
    async fn test_list_failure_is_500() {
        let mut repo = MockAssetRepository::new();
        repo.expect_list()
            .returning(|| Err(RepoError::Storage(DbErr::Custom("cursor closed".into()))));

        let response = app(repo)
            .oneshot(Request::get("/assets").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
