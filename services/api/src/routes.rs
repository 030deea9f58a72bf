//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::{AuthUser, auth_middleware},
    models::{NewCategory, NewComment, NewListing},
    repositories::CategoryCreateOutcome,
    state::AppState,
};

/// Request body for like/impression mutations
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRequest {
    pub listing_id: Uuid,
}

/// Query parameters for listing comments
#[derive(Deserialize)]
pub struct CommentsQuery {
    pub listing: Uuid,
}

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/listings/create", post(create_listing))
        .route("/api/categories/create", post(create_category))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/listings/listings", get(list_listings))
        .route("/api/listings/like", post(like_listing))
        .route("/api/listings/record-impression", post(record_impression))
        .route(
            "/api/listings/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/api/listings/:id",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
        .route("/api/categories/get_categories", get(get_categories))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}

/// Create a new listing; `host` always comes from the authenticated
/// caller, never from the request body
pub async fn create_listing(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewListing>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::BadRequest)?;

    let listing = state
        .listing_repository
        .create(user.id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to create listing: {}", e);
            ApiError::Internal("An error occurred while creating the listing.".to_string())
        })?;

    info!("Listing {} created by {}", listing.id, user.id);

    Ok((StatusCode::CREATED, Json(listing)))
}

/// Get all listings, newest first
pub async fn list_listings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let listings = state.listing_repository.get_all().await.map_err(|e| {
        error!("Failed to get listings: {}", e);
        ApiError::Internal("Server error".to_string())
    })?;

    Ok(Json(listings))
}

/// Get a listing by ID
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state
        .listing_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get listing: {}", e);
            ApiError::Internal("Server error".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Listing not found".to_string()))?;

    Ok(Json(listing))
}

/// Replace a listing's mutable fields
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewListing>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::BadRequest)?;

    let listing = state
        .listing_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update listing: {}", e);
            ApiError::Internal("Server error".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Listing not found".to_string()))?;

    Ok(Json(listing))
}

/// Delete a listing by ID
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.listing_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete listing: {}", e);
        ApiError::Internal("Server error".to_string())
    })?;

    Ok(Json(json!({"message": "Listing deleted"})))
}

/// Bump a listing's like counter by exactly one
pub async fn like_listing(
    State(state): State<AppState>,
    Json(payload): Json<EngagementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state
        .listing_repository
        .increment_likes(payload.listing_id)
        .await
        .map_err(|e| {
            error!("Failed to like listing: {}", e);
            ApiError::Internal("Server error".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Listing not found".to_string()))?;

    Ok(Json(listing))
}

/// Record one impression against a listing
pub async fn record_impression(
    State(state): State<AppState>,
    Json(payload): Json<EngagementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state
        .listing_repository
        .increment_impressions(payload.listing_id)
        .await
        .map_err(|e| {
            error!("Failed to record impression: {}", e);
            ApiError::Internal("Server error".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Listing not found".to_string()))?;

    Ok(Json(listing))
}

/// All comments for a listing, in store order
pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = state
        .comment_repository
        .for_listing(query.listing)
        .await
        .map_err(|e| {
            error!("Failed to get comments: {}", e);
            ApiError::Internal("Server error".to_string())
        })?;

    Ok(Json(comments))
}

/// Create a new comment against a listing
pub async fn create_comment(
    State(state): State<AppState>,
    Json(mut payload): Json<NewComment>,
) -> Result<impl IntoResponse, ApiError> {
    // Stored text is trimmed, whatever the caller sent.
    payload.text = payload.text.trim().to_string();
    if payload.text.is_empty() {
        return Err(ApiError::BadRequest("Comment text is required".to_string()));
    }

    let comment = state
        .comment_repository
        .create(&payload)
        .await
        .map_err(|e| {
            error!("Failed to create comment: {}", e);
            ApiError::Internal("Server error".to_string())
        })?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Create a new category; requires authentication
pub async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewCategory>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.name.is_empty() || payload.description.is_empty() || payload.image_url.is_empty() {
        return Err(ApiError::BadRequest(
            "Name, description, and image URL are required".to_string(),
        ));
    }

    let outcome = state
        .category_repository
        .create(user.id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to create category: {}", e);
            ApiError::Internal("Server error".to_string())
        })?;

    match outcome {
        CategoryCreateOutcome::Created(category) => Ok((StatusCode::CREATED, Json(category))),
        CategoryCreateOutcome::DuplicateName => Err(ApiError::BadRequest(
            "Category with this name already exists".to_string(),
        )),
    }
}

/// All categories, unfiltered
pub async fn get_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state.category_repository.get_all().await.map_err(|e| {
        error!("Failed to get categories: {}", e);
        ApiError::Internal("Server error".to_string())
    })?;

    Ok(Json(categories))
}
