//! Demo content for a fresh database
//!
//! Idempotent: rows whose slug already exists are skipped.

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::DbError;

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Technology", "technology", "Latest tech news and updates"),
    ("Design", "design", "Design trends and best practices"),
    ("Business", "business", "Business insights and strategies"),
];

struct SeedPost {
    title: &'static str,
    slug: &'static str,
    content: &'static str,
    excerpt: &'static str,
    category: &'static str,
}

const POSTS: &[SeedPost] = &[
    SeedPost {
        title: "Getting Started with Rust",
        slug: "getting-started-rust",
        content: "Rust is a systems programming language focused on safety and speed...",
        excerpt: "Learn the basics of Rust",
        category: "technology",
    },
    SeedPost {
        title: "Design Principles",
        slug: "design-principles",
        content: "Good design is about...",
        excerpt: "Essential design principles",
        category: "design",
    },
    SeedPost {
        title: "Business Growth Strategies",
        slug: "business-growth",
        content: "Growing your business requires...",
        excerpt: "Strategies for business growth",
        category: "business",
    },
];

/// Rows inserted by [`run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: u64,
    pub posts: u64,
}

/// Insert demo categories and published posts.
pub async fn run(pool: &PgPool) -> Result<SeedReport, DbError> {
    let mut tx = pool.begin().await?;

    // Batch insert categories
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO categories (name, slug, description) ");
    builder.push_values(CATEGORIES.iter(), |mut b, &(name, slug, description)| {
        b.push_bind(name).push_bind(slug).push_bind(description);
    });
    builder.push(" ON CONFLICT (slug) DO NOTHING");
    let categories = builder.build().execute(&mut *tx).await?.rows_affected();

    // Posts resolve their category by slug, so seeded ids never matter
    let mut posts = 0u64;
    for post in POSTS {
        posts += sqlx::query(
            r#"
            INSERT INTO posts (title, slug, content, excerpt, category_id, published)
            VALUES ($1, $2, $3, $4, (SELECT id FROM categories WHERE slug = $5), TRUE)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(post.title)
        .bind(post.slug)
        .bind(post.content)
        .bind(post.excerpt)
        .bind(post.category)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;
    tracing::info!(categories, posts, "Seed data inserted");

    Ok(SeedReport { categories, posts })
}
