//! Repositories for database operations

mod category;
mod comment;
mod listing;
mod user;

pub use category::{CategoryCreateOutcome, CategoryRepository};
pub use comment::CommentRepository;
pub use listing::ListingRepository;
pub use user::UserRepository;
