//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored comment against a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub listing: Uuid,
    pub text: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub likes: i64,
    pub dislikes: i64,
    pub date: DateTime<Utc>,
}

fn default_username() -> String {
    "Guest".to_string()
}

/// Client-supplied comment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub listing: Uuid,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_username_falls_back_to_guest() {
        let json = serde_json::json!({
            "listing": Uuid::new_v4(),
            "text": "Is this still available?",
        });
        let comment: NewComment = serde_json::from_value(json).unwrap();
        assert_eq!(comment.username, "Guest");
    }
}
