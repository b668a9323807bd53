//! Response shapes shared by the resource routes and the RPC procedures
//!
//! One mapping per entity: storage rows (snake_case columns) become
//! camelCase JSON, so both surfaces serve the same page contract.

use serde::Serialize;

use crate::db::repos::{Category, CategoryRef, Comment, Post, PostWithCount};

/// Category response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
        }
    }
}

/// Category nested inside a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<CategoryRef> for CategorySummary {
    fn from(c: CategoryRef) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
        }
    }
}

/// Post response
///
/// `category` is `null` for uncategorized posts; `commentCount` only
/// appears on listings that aggregate approved comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category_id: Option<i32>,
    pub category: Option<CategorySummary>,
    pub published: bool,
    pub views: i32,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<i64>,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            slug: p.slug,
            content: p.content,
            excerpt: p.excerpt,
            category_id: p.category_id,
            category: p.category.map(CategorySummary::from),
            published: p.published,
            views: p.views,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
            comment_count: None,
        }
    }
}

impl From<PostWithCount> for PostResponse {
    fn from(p: PostWithCount) -> Self {
        Self {
            comment_count: Some(p.comment_count),
            ..Self::from(p.post)
        }
    }
}

/// Comment response (the author's email is never exposed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i32,
    pub post_id: i32,
    pub author: String,
    pub content: String,
    pub approved: bool,
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            post_id: c.post_id,
            author: c.author,
            content: c.content,
            approved: c.approved,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Delete acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn post(category: Option<CategoryRef>) -> Post {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Post {
            id: 1,
            title: "T".into(),
            slug: "t".into(),
            content: "C".into(),
            excerpt: None,
            category_id: category.as_ref().map(|c| c.id),
            category,
            published: false,
            views: 0,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn post_maps_to_camel_case_with_null_category() {
        let value = serde_json::to_value(PostResponse::from(post(None))).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "title": "T",
                "slug": "t",
                "content": "C",
                "excerpt": null,
                "categoryId": null,
                "category": null,
                "published": false,
                "views": 0,
                "createdAt": "2024-05-01T12:00:00+00:00",
                "updatedAt": "2024-05-01T12:00:00+00:00",
            })
        );
    }

    #[test]
    fn post_nests_joined_category() {
        let category = CategoryRef {
            id: 3,
            name: "Technology".into(),
            slug: "technology".into(),
        };
        let value = serde_json::to_value(PostResponse::from(post(Some(category)))).unwrap();
        assert_eq!(value["categoryId"], 3);
        assert_eq!(
            value["category"],
            json!({ "id": 3, "name": "Technology", "slug": "technology" })
        );
    }

    #[test]
    fn comment_count_only_when_aggregated() {
        let counted = PostResponse::from(PostWithCount {
            post: post(None),
            comment_count: 2,
        });
        let value = serde_json::to_value(counted).unwrap();
        assert_eq!(value["commentCount"], 2);

        let plain = serde_json::to_value(PostResponse::from(post(None))).unwrap();
        assert!(plain.get("commentCount").is_none());
    }

    #[test]
    fn comment_hides_email() {
        let comment = Comment {
            id: 9,
            post_id: 1,
            author: "Ada".into(),
            email: "ada@example.com".into(),
            content: "Hi".into(),
            approved: false,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(CommentResponse::from(comment)).unwrap();
        assert!(value.get("email").is_none());
        assert_eq!(value["postId"], 1);
        assert_eq!(value["approved"], false);
    }
}
