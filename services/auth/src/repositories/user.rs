//! User repository for database operations

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::credentials::{generate_otp, generate_referral_code, generate_username};
use crate::models::{NewUser, Role, User};

/// Result of a user insert; email and phone number are unique at the
/// store level, and two signups can race past the pre-check
pub enum UserCreateOutcome {
    Created(User),
    DuplicateEmail,
    DuplicatePhoneNumber,
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

fn user_from_row(row: &PgRow) -> Result<User> {
    let role: String = row.get("role");
    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        phone_number: row.get("phone_number"),
        password_hash: row.get("password_hash"),
        role: role.parse::<Role>().map_err(|e| anyhow::anyhow!(e))?,
        referral_code: row.get("referral_code"),
        unique_id: row.get("unique_id"),
        otp: row.get("otp"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

const USER_COLUMNS: &str = "id, username, email, phone_number, password_hash, role, \
                            referral_code, unique_id, otp, created_at, updated_at";

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user, hashing the password and generating the
    /// username, referral code, unique id, and OTP
    pub async fn create(&self, new_user: &NewUser) -> Result<UserCreateOutcome> {
        info!("Creating new user: {}", new_user.email);

        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(new_user.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();

        let username = generate_username();
        let referral_code = generate_referral_code();
        let unique_id = Uuid::new_v4();
        let otp = generate_otp();

        let result = sqlx::query(&format!(
            r#"
            INSERT INTO users (username, email, phone_number, password_hash, role,
                               referral_code, unique_id, otp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(&username)
        .bind(&new_user.email)
        .bind(&new_user.phone_number)
        .bind(&password_hash)
        .bind(Role::Customer.as_str())
        .bind(&referral_code)
        .bind(unique_id)
        .bind(&otp)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(UserCreateOutcome::Created(user_from_row(&row)?)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                match e.constraint() {
                    Some(c) if c.contains("phone_number") => {
                        Ok(UserCreateOutcome::DuplicatePhoneNumber)
                    }
                    _ => Ok(UserCreateOutcome::DuplicateEmail),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1",
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Verify a user's password against the stored hash
    pub async fn verify_password(&self, user: &User, password: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

        let argon2 = Argon2::default();
        let result = argon2.verify_password(password.as_bytes(), &parsed_hash);

        Ok(result.is_ok())
    }
}
