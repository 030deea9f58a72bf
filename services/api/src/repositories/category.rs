//! Category repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{Category, NewCategory};

const CATEGORY_COLUMNS: &str = "id, name, description, image_url, created_by, \
                                created_at, updated_at";

fn category_from_row(row: &PgRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        image_url: row.get("image_url"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Result of a category insert; names are unique at the store level
pub enum CategoryCreateOutcome {
    Created(Category),
    DuplicateName,
}

/// Category repository
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new category created by `created_by`
    pub async fn create(
        &self,
        created_by: Uuid,
        new_category: &NewCategory,
    ) -> Result<CategoryCreateOutcome> {
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO categories (name, description, image_url, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {CATEGORY_COLUMNS}
            "#,
        ))
        .bind(&new_category.name)
        .bind(&new_category.description)
        .bind(&new_category.image_url)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(CategoryCreateOutcome::Created(category_from_row(&row))),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(CategoryCreateOutcome::DuplicateName)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All categories, unfiltered
    pub async fn get_all(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(category_from_row).collect())
    }
}
