//! Comment repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{Comment, NewComment};

const COMMENT_COLUMNS: &str = "id, listing, text, username, avatar, likes, dislikes, date";

fn comment_from_row(row: &PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        listing: row.get("listing"),
        text: row.get("text"),
        username: row.get("username"),
        avatar: row.get("avatar"),
        likes: row.get("likes"),
        dislikes: row.get("dislikes"),
        date: row.get("date"),
    }
}

/// Comment repository
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All comments for a listing, in insertion order
    pub async fn for_listing(&self, listing: Uuid) -> Result<Vec<Comment>> {
        let rows = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE listing = $1 ORDER BY date"
        ))
        .bind(listing)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(comment_from_row).collect())
    }

    /// Persist a new comment
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO comments (listing, text, username, avatar)
            VALUES ($1, $2, $3, $4)
            RETURNING {COMMENT_COLUMNS}
            "#,
        ))
        .bind(new_comment.listing)
        .bind(&new_comment.text)
        .bind(&new_comment.username)
        .bind(&new_comment.avatar)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment_from_row(&row))
    }
}
