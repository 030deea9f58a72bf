//! Authentication service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    AppState,
    models::{NewUser, UserResponse},
    phone::format_phone_number,
    repositories::UserCreateOutcome,
    validation::validate_email,
};

/// Request for user signup
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
}

/// Response for user signup
#[derive(Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Request for user login
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response for user login
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// User signup endpoint
///
/// Normalizes the phone number, rejects duplicate emails, hashes the
/// password, and returns the created user with credential material
/// stripped.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AuthError> {
    if payload.email.is_empty() || payload.phone_number.is_empty() || payload.password.is_empty() {
        return Err(AuthError::BadRequest(
            "Please provide all required fields.".to_string(),
        ));
    }

    validate_email(&payload.email).map_err(AuthError::BadRequest)?;

    let phone_number = format_phone_number(&payload.phone_number);

    let existing = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up email: {}", e);
            AuthError::InternalServerError
        })?;

    if existing.is_some() {
        return Err(AuthError::BadRequest(
            "User with this email already exists.".to_string(),
        ));
    }

    let new_user = NewUser {
        email: payload.email,
        phone_number,
        password: payload.password,
    };

    let outcome = state.user_repository.create(&new_user).await.map_err(|e| {
        error!("Signup error: {}", e);
        AuthError::InternalServerError
    })?;

    // The email pre-check above can race a concurrent signup, and the
    // phone number has no pre-check at all; both surface here as unique
    // violations.
    let user = match outcome {
        UserCreateOutcome::Created(user) => user,
        UserCreateOutcome::DuplicateEmail => {
            return Err(AuthError::BadRequest(
                "User with this email already exists.".to_string(),
            ));
        }
        UserCreateOutcome::DuplicatePhoneNumber => {
            return Err(AuthError::BadRequest(
                "User with this phone number already exists.".to_string(),
            ));
        }
    };

    info!("User created: {}", user.id);

    let response = SignupResponse {
        message: "User created successfully!".to_string(),
        user: user.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// User login endpoint
///
/// Issues an HS256 token carrying the user id, valid for one hour.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Login attempt for: {}", payload.email);

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up email: {}", e);
            AuthError::InternalServerError
        })?
        .ok_or_else(|| AuthError::NotFound("User not found".to_string()))?;

    let matches = state
        .user_repository
        .verify_password(&user, &payload.password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            AuthError::InternalServerError
        })?;

    if !matches {
        return Err(AuthError::BadRequest("Invalid credentials".to_string()));
    }

    let token = state.jwt_service.sign_token(user.id).map_err(|e| {
        error!("Failed to sign token: {}", e);
        AuthError::InternalServerError
    })?;

    Ok((StatusCode::OK, Json(TokenResponse { token })))
}

/// Custom error type for authentication errors
#[derive(Debug)]
pub enum AuthError {
    BadRequest(String),
    NotFound(String),
    InternalServerError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AuthError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        };

        let body = Json(serde_json::json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
