//! Authentication middleware for bearer-token validation
//!
//! Tokens are verified against the shared HS256 secret, then the token
//! subject is re-resolved against the user store. A token whose user has
//! since been deleted is rejected with 404 before the handler runs.

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// JWT claims structure, matching what the auth service signs
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID of the token subject
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Authenticated user information attached to the request
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Decode and verify a bearer token against the given secret
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::NoToken)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::NoToken)?;

    let secret = std::env::var("JWT_SECRET").map_err(|_| {
        error!("JWT_SECRET environment variable not set");
        ApiError::Internal("Internal server error".to_string())
    })?;

    let claims = decode_claims(token, &secret).map_err(|e| {
        error!("Failed to validate token: {}", e);
        ApiError::InvalidToken
    })?;

    // Re-resolve the token subject against the user store; the subject
    // may have been deleted since the token was issued.
    let exists = state
        .user_repository
        .exists(claims.user_id)
        .await
        .map_err(|e| {
            error!("Failed to look up token subject: {}", e);
            ApiError::Internal("Internal server error".to_string())
        })?;

    if !exists {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    req.extensions_mut().insert(AuthUser {
        id: claims.user_id,
    });

    Ok(next.run(req).await)
}
