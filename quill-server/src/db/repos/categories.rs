//! Category repository
//!
//! - create: plain INSERT, duplicates surface as `DbError::UniqueViolation`
//! - delete: refused by `ON DELETE RESTRICT` while posts reference the row

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::NewCategory;

/// Category record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by name.
    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, description, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Insert a category and return the stored row.
    pub async fn create(&self, category: &NewCategory) -> Result<Category, DbError> {
        let created = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, description, created_at, updated_at
            "#,
        )
        .bind(&category.name)
        .bind(category.slug.as_str())
        .bind(category.description.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Get a single category by slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Category, DbError> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, description, created_at, updated_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "Category",
            id: slug.to_owned(),
        })
    }

    /// Delete a category. Returns whether a row was removed.
    ///
    /// Deleting a missing id is not an error.
    pub async fn delete(&self, id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
