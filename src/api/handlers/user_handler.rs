//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::parse_id;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::ENTITY_USER;
use crate::domain::{NewUser, Password, UserResponse};
use crate::errors::{AppError, AppResult, ErrorResponse};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// User email address
    #[validate(email(message = "invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Plain-text password (minimum 8 characters), hashed before storage
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user))
        .route("/by-email/:email", get(get_user_by_email))
}

/// Create a user account
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    // Argon2 is deliberately slow; keep it off the async workers
    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || Password::new(&password))
        .await
        .map_err(|e| AppError::internal(format!("password hashing task failed: {}", e)))??
        .into_string();

    let user = state
        .users
        .create(NewUser::new(payload.email, password_hash))
        .await
        .map_err(|e| AppError::from_repo(ENTITY_USER, e))?;

    tracing::info!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let id = parse_id(&id)?;
    let user = state
        .users
        .get_by_id(id)
        .await
        .map_err(|e| AppError::from_repo(ENTITY_USER, e))?;

    tracing::debug!(id, "user fetched");
    Ok(Json(UserResponse::from(user)))
}

/// Get user by email
#[utoipa::path(
    get,
    path = "/users/by-email/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "Exact email address")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .users
        .get_by_email(&email)
        .await
        .map_err(|e| AppError::from_repo(ENTITY_USER, e))?;

    tracing::debug!(id = user.id, "user fetched by email");
    Ok(Json(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use argon2::password_hash::{PasswordHash, PasswordVerifier};
    use argon2::Argon2;
    use axum::body::Body;
    use axum::http::{header, Request};
    use chrono::Utc;
    use sea_orm::DbErr;
    use tower::ServiceExt;

    use super::*;
    use crate::api::create_router;
    use crate::domain::User;
    use crate::infra::{InMemoryAssetStore, MockUserRepository, RepoError};

    fn app(repo: MockUserRepository) -> Router {
        let state = AppState::new(Arc::new(InMemoryAssetStore::new()), Arc::new(repo));
        create_router(state, Duration::from_secs(5))
    }

    fn post_user(body: &str) -> Request<Body> {
        Request::post("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn hash_matches(hash: &str, plain_text: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_password_is_hashed_before_storage() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|user| {
                user.email == "carol@example.com"
                    && user.password_hash != "CorrectHorse9"
                    && hash_matches(&user.password_hash, "CorrectHorse9")
            })
            .times(1)
            .returning(|user| {
                let now = Utc::now();
                Ok(User {
                    id: 5,
                    email: user.email,
                    password_hash: user.password_hash,
                    created_at: now,
                    updated_at: now,
                })
            });

        let response = app(repo)
            .oneshot(post_user(
                r#"{"email":"carol@example.com","password":"CorrectHorse9"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], 5);
        assert_eq!(body["email"], "carol@example.com");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_409() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|_| Err(RepoError::DuplicateEmail));

        let response = app(repo)
            .oneshot(post_user(
                r#"{"email":"dave@example.com","password":"password123"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "email already in use" })
        );
    }

    #[tokio::test]
    async fn test_bad_email_or_short_password_is_400() {
        for body in [
            r#"{"email":"not-an-email","password":"password123"}"#,
            r#"{"email":"erin@example.com","password":"short"}"#,
            r#"{"email":"erin@example.com"}"#,
        ] {
            let mut repo = MockUserRepository::new();
            repo.expect_create().never();

            let response = app(repo).oneshot(post_user(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_lookup_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .withf(|email| email == "ghost@example.com")
            .returning(|_| Err(RepoError::NotFound));
        repo.expect_get_by_id()
            .returning(|_| Err(RepoError::Storage(DbErr::Custom("timeout".into()))));
        let app = app(repo);

        let response = app
            .clone()
            .oneshot(
                Request::get("/users/by-email/ghost@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "user not found" })
        );

        let response = app
            .oneshot(Request::get("/users/3").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
