//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "customer")]
    Customer,
    #[serde(rename = "agent")]
    Agent,
    #[serde(rename = "superAdmin")]
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Agent => "agent",
            Role::SuperAdmin => "superAdmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "agent" => Ok(Role::Agent),
            "superAdmin" => Ok(Role::SuperAdmin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// User entity as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub role: Role,
    pub referral_code: String,
    pub unique_id: Uuid,
    pub otp: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user creation payload; the phone number is already normalized and
/// the password is still plaintext at this point
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// User shape returned by the API; credential material (password hash,
/// OTP) is deliberately stripped
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    pub referral_code: String,
    pub unique_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role,
            referral_code: user.referral_code,
            unique_id: user.unique_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Customer, Role::Agent, Role::SuperAdmin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_user_response_has_no_credential_material() {
        let user = User {
            id: Uuid::new_v4(),
            username: "BravePanda1".to_string(),
            email: "a@b.com".to_string(),
            phone_number: "254712345678".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: Role::Customer,
            referral_code: "deadbeefdeadbeef".to_string(),
            unique_id: Uuid::new_v4(),
            otp: Some("123456".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("otp").is_none());
        assert_eq!(json["phoneNumber"], "254712345678");
    }
}
