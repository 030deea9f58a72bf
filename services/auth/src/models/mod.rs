//! Data models for the authentication service

mod user;

pub use user::{NewUser, Role, User, UserResponse};
