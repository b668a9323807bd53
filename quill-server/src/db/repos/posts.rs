//! Post repository
//!
//! Every read resolves the category with a LEFT JOIN; writes use a
//! data-modifying CTE so the returned row carries the joined category too.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use super::DbError;
use crate::db::filter::PostFilter;
use crate::models::{PostDraft, Slug};

/// Select list shared by every post query (`p` = posts, `c` = categories).
pub(crate) const POST_COLUMNS: &str = "p.id, p.title, p.slug, p.content, p.excerpt, \
     p.category_id, p.published, p.views, p.created_at, p.updated_at, \
     c.name AS category_name, c.slug AS category_slug";

pub(crate) const POST_FROM: &str = "FROM posts p LEFT JOIN categories c ON c.id = p.category_id";

/// Category as seen through a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// Post record with its category resolved
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category_id: Option<i32>,
    pub category: Option<CategoryRef>,
    pub published: bool,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Post {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let category_id: Option<i32> = row.try_get("category_id")?;
        let category_name: Option<String> = row.try_get("category_name")?;
        let category_slug: Option<String> = row.try_get("category_slug")?;

        let category = match (category_id, category_name, category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(CategoryRef { id, name, slug }),
            _ => None,
        };

        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            content: row.try_get("content")?,
            excerpt: row.try_get("excerpt")?,
            category_id,
            category,
            published: row.try_get("published")?,
            views: row.try_get("views")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Post with approved comment count for public listings
#[derive(Debug, Clone)]
pub struct PostWithCount {
    pub post: Post,
    pub comment_count: i64,
}

impl<'r> FromRow<'r, PgRow> for PostWithCount {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            post: Post::from_row(row)?,
            comment_count: row.try_get("comment_count")?,
        })
    }
}

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single post by id.
    pub async fn get(&self, id: i32) -> Result<Post, DbError> {
        let sql = format!("SELECT {POST_COLUMNS} {POST_FROM} WHERE p.id = $1");

        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "Post",
                id: id.to_string(),
            })
    }

    /// Get a single post by slug, published or not.
    pub async fn get_by_slug(&self, slug: &Slug) -> Result<Post, DbError> {
        let sql = format!("SELECT {POST_COLUMNS} {POST_FROM} WHERE p.slug = $1");

        sqlx::query_as::<_, Post>(&sql)
            .bind(slug.as_str())
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "Post",
                id: slug.as_str().to_owned(),
            })
    }

    /// List posts matching `filter`, newest first.
    pub async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, DbError> {
        let mut qb = filter.to_query();
        tracing::debug!(sql = qb.sql(), "listing posts");

        let posts = qb.build_query_as::<Post>().fetch_all(self.pool).await?;
        Ok(posts)
    }

    /// Published posts with their approved comment counts, newest first.
    ///
    /// Single query: LEFT JOIN on approved comments, grouped per post.
    pub async fn list_published_with_comment_count(&self) -> Result<Vec<PostWithCount>, DbError> {
        let sql = format!(
            "SELECT {POST_COLUMNS}, COUNT(cm.id) AS comment_count \
             {POST_FROM} \
             LEFT JOIN comments cm ON cm.post_id = p.id AND cm.approved = TRUE \
             WHERE p.published = TRUE \
             GROUP BY p.id, c.id \
             ORDER BY p.created_at DESC, p.id DESC"
        );

        let posts = sqlx::query_as::<_, PostWithCount>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(posts)
    }

    /// Insert a post and return it with its category resolved.
    pub async fn create(&self, draft: &PostDraft) -> Result<Post, DbError> {
        let sql = format!(
            "WITH p AS ( \
                 INSERT INTO posts (title, slug, content, excerpt, category_id, published) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 RETURNING * \
             ) \
             SELECT {POST_COLUMNS} FROM p LEFT JOIN categories c ON c.id = p.category_id"
        );

        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(&draft.title)
            .bind(draft.slug.as_str())
            .bind(&draft.content)
            .bind(draft.excerpt.as_deref())
            .bind(draft.category_id)
            .bind(draft.published)
            .fetch_one(self.pool)
            .await?;

        Ok(post)
    }

    /// Replace a post's editable fields and refresh `updated_at`.
    pub async fn update(&self, id: i32, draft: &PostDraft) -> Result<Post, DbError> {
        let sql = format!(
            "WITH p AS ( \
                 UPDATE posts \
                 SET title = $1, slug = $2, content = $3, excerpt = $4, \
                     category_id = $5, published = $6, updated_at = NOW() \
                 WHERE id = $7 \
                 RETURNING * \
             ) \
             SELECT {POST_COLUMNS} FROM p LEFT JOIN categories c ON c.id = p.category_id"
        );

        sqlx::query_as::<_, Post>(&sql)
            .bind(&draft.title)
            .bind(draft.slug.as_str())
            .bind(&draft.content)
            .bind(draft.excerpt.as_deref())
            .bind(draft.category_id)
            .bind(draft.published)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "Post",
                id: id.to_string(),
            })
    }

    /// Delete a post; its comments go with it (`ON DELETE CASCADE`).
    ///
    /// Returns whether a row was removed. Deleting a missing id is not an error.
    pub async fn delete(&self, id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::{CategoryRepo, CommentRepo};
    use crate::models::{NewCategory, NewComment};

    fn draft(title: &str, slug: &str, category_id: Option<i32>, published: bool) -> PostDraft {
        PostDraft::new(title, slug, "Body", None, category_id, Some(published)).unwrap()
    }

    async fn seed_categories(pool: &PgPool) -> (i32, i32) {
        let repo = CategoryRepo::new(pool);
        let tech = repo
            .create(&NewCategory::new("Technology", "technology", None).unwrap())
            .await
            .unwrap();
        let design = repo
            .create(&NewCategory::new("Design", "design", None).unwrap())
            .await
            .unwrap();
        (tech.id, design.id)
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn create_then_get_round_trip(pool: PgPool) {
        let repo = PostRepo::new(&pool);
        let draft = PostDraft::new("T", "t", "C", None, None, None).unwrap();

        let created = repo.create(&draft).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();

        assert_eq!(fetched.title, "T");
        assert_eq!(fetched.slug, "t");
        assert_eq!(fetched.content, "C");
        assert_eq!(fetched.category_id, None);
        assert!(fetched.category.is_none());
        assert!(!fetched.published);
        assert_eq!(fetched.views, 0);
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn create_resolves_category(pool: PgPool) {
        let (tech, _) = seed_categories(&pool).await;
        let post = PostRepo::new(&pool)
            .create(&draft("Rust", "rust", Some(tech), true))
            .await
            .unwrap();

        let category = post.category.expect("category joined");
        assert_eq!(category.id, tech);
        assert_eq!(category.slug, "technology");
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn get_by_slug_finds_post_with_category(pool: PgPool) {
        let (tech, _) = seed_categories(&pool).await;
        let repo = PostRepo::new(&pool);
        let created = repo
            .create(&draft("Rust", "rust", Some(tech), true))
            .await
            .unwrap();

        let fetched = repo.get_by_slug(&Slug::new("rust").unwrap()).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.category.map(|c| c.slug).as_deref(), Some("technology"));
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn get_by_slug_returns_drafts(pool: PgPool) {
        let repo = PostRepo::new(&pool);
        repo.create(&draft("Draft", "draft", None, false)).await.unwrap();

        let fetched = repo.get_by_slug(&Slug::new("draft").unwrap()).await.unwrap();
        assert!(!fetched.published);
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn get_by_slug_missing_is_not_found(pool: PgPool) {
        let err = PostRepo::new(&pool)
            .get_by_slug(&Slug::new("nowhere").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound { resource: "Post", ref id } if id == "nowhere"
        ));
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn unknown_category_is_foreign_key_violation(pool: PgPool) {
        let err = PostRepo::new(&pool)
            .create(&draft("Rust", "rust", Some(999), true))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn duplicate_slug_is_unique_violation(pool: PgPool) {
        let repo = PostRepo::new(&pool);
        repo.create(&draft("One", "same", None, false)).await.unwrap();
        let err = repo.create(&draft("Two", "same", None, false)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn published_filter_excludes_drafts(pool: PgPool) {
        let repo = PostRepo::new(&pool);
        repo.create(&draft("Live", "live", None, true)).await.unwrap();
        repo.create(&draft("Draft", "draft", None, false)).await.unwrap();

        let posts = repo.list(&PostFilter::published()).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts.iter().all(|p| p.published));
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn category_and_published_filters_combine(pool: PgPool) {
        let (tech, design) = seed_categories(&pool).await;
        let repo = PostRepo::new(&pool);
        repo.create(&draft("A", "a", Some(tech), true)).await.unwrap();
        repo.create(&draft("B", "b", Some(tech), false)).await.unwrap();
        repo.create(&draft("C", "c", Some(design), true)).await.unwrap();
        repo.create(&draft("D", "d", None, true)).await.unwrap();

        let filter = PostFilter {
            category: Some("technology".into()),
            published: Some(true),
            ..PostFilter::default()
        };
        let posts = repo.list(&filter).await.unwrap();

        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["a"]);
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn list_is_newest_first_and_limited(pool: PgPool) {
        let repo = PostRepo::new(&pool);
        for slug in ["first", "second", "third"] {
            repo.create(&draft(slug, slug, None, true)).await.unwrap();
        }

        let filter = PostFilter {
            limit: Some(2),
            ..PostFilter::default()
        };
        let slugs: Vec<_> = repo
            .list(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, ["third", "second"]);
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn update_refreshes_timestamp_and_missing_is_not_found(pool: PgPool) {
        let repo = PostRepo::new(&pool);
        let created = repo.create(&draft("Old", "old", None, false)).await.unwrap();

        let updated = repo
            .update(created.id, &draft("New", "new", None, true))
            .await
            .unwrap();
        assert_eq!(updated.title, "New");
        assert!(updated.published);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);

        let err = repo
            .update(created.id + 1000, &draft("X", "x", None, false))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "Post", .. }));
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn delete_cascades_to_comments(pool: PgPool) {
        let repo = PostRepo::new(&pool);
        let post = repo.create(&draft("P", "p", None, true)).await.unwrap();
        let comments = CommentRepo::new(&pool);
        for i in 0..3 {
            comments
                .create(&NewComment::new(post.id.into(), &format!("a{i}"), "a@b.c", "hi").unwrap())
                .await
                .unwrap();
        }

        assert!(repo.delete(post.id).await.unwrap());

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);

        // Second delete is a no-op, not an error
        assert!(!repo.delete(post.id).await.unwrap());
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn comment_count_only_includes_approved(pool: PgPool) {
        let repo = PostRepo::new(&pool);
        let post = repo.create(&draft("P", "p", None, true)).await.unwrap();
        repo.create(&draft("Hidden", "hidden", None, false)).await.unwrap();

        let comments = CommentRepo::new(&pool);
        let first = comments
            .create(&NewComment::new(post.id.into(), "Ada", "ada@example.com", "one").unwrap())
            .await
            .unwrap();
        comments
            .create(&NewComment::new(post.id.into(), "Bob", "bob@example.com", "two").unwrap())
            .await
            .unwrap();

        let listed = repo.list_published_with_comment_count().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].comment_count, 0);

        comments.approve(first.id).await.unwrap();

        let listed = repo.list_published_with_comment_count().await.unwrap();
        assert_eq!(listed[0].comment_count, 1);
    }
}
