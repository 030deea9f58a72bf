//! Application state shared across handlers

use sqlx::PgPool;

use crate::repositories::{
    CategoryRepository, CommentRepository, ListingRepository, UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub listing_repository: ListingRepository,
    pub comment_repository: CommentRepository,
    pub category_repository: CategoryRepository,
    pub user_repository: UserRepository,
}
