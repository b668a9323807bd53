//! Typed procedure surface
//!
//! A fixed set of named procedures over the same repositories the resource
//! routes use. Inputs are validated before any query runs, and replies use
//! the shared response shapes so either surface can serve a page.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

use crate::db::repos::{CategoryRepo, CommentRepo, DbError, PostRepo};
use crate::db::PostFilter;
use crate::http::responses::{CategoryResponse, CommentResponse, PostResponse};
use crate::models::{NewComment, Slug, ValidationError};

/// Whether a procedure reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureKind {
    Query,
    Mutation,
}

impl ProcedureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// Known procedures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    Categories,
    Posts,
    PostBySlug,
    PostsByCategory,
    AddComment,
}

impl Procedure {
    pub const ALL: [Procedure; 5] = [
        Self::Categories,
        Self::Posts,
        Self::PostBySlug,
        Self::PostsByCategory,
        Self::AddComment,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Posts => "posts",
            Self::PostBySlug => "postBySlug",
            Self::PostsByCategory => "postsByCategory",
            Self::AddComment => "addComment",
        }
    }

    pub fn kind(self) -> ProcedureKind {
        match self {
            Self::AddComment => ProcedureKind::Mutation,
            _ => ProcedureKind::Query,
        }
    }

    /// Validate raw input into a ready-to-run call.
    ///
    /// Procedures without input ignore whatever was sent.
    pub fn bind(self, input: Option<Value>) -> Result<Call, ValidationError> {
        match self {
            Self::Categories => Ok(Call::Categories),
            Self::Posts => Ok(Call::Posts),
            Self::PostBySlug => Ok(Call::PostBySlug(slug_input(self, input)?)),
            Self::PostsByCategory => Ok(Call::PostsByCategory(slug_input(self, input)?)),
            Self::AddComment => {
                let input = input.ok_or(ValidationError::Malformed {
                    field: "input",
                    reason: "addComment expects {postId, author, email, content}".to_owned(),
                })?;
                let input: AddCommentInput =
                    serde_json::from_value(input).map_err(|e| ValidationError::Malformed {
                        field: "input",
                        reason: e.to_string(),
                    })?;

                Ok(Call::AddComment(NewComment::new(
                    input.post_id,
                    &input.author,
                    &input.email,
                    &input.content,
                )?))
            }
        }
    }
}

fn slug_input(procedure: Procedure, input: Option<Value>) -> Result<Slug, ValidationError> {
    match input {
        Some(Value::String(s)) => Slug::new(&s),
        _ => Err(ValidationError::Malformed {
            field: "input",
            reason: format!("{} expects a string", procedure.name()),
        }),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddCommentInput {
    post_id: i64,
    author: String,
    email: String,
    content: String,
}

/// A validated procedure invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Categories,
    Posts,
    PostBySlug(Slug),
    PostsByCategory(Slug),
    AddComment(NewComment),
}

/// Procedure result data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Categories(Vec<CategoryResponse>),
    Posts(Vec<PostResponse>),
    Post(PostResponse),
    Comment(CommentResponse),
}

impl Call {
    pub async fn execute(self, pool: &PgPool) -> Result<Reply, DbError> {
        match self {
            Self::Categories => {
                let categories = CategoryRepo::new(pool).list().await?;
                Ok(Reply::Categories(
                    categories.into_iter().map(CategoryResponse::from).collect(),
                ))
            }
            Self::Posts => {
                let posts = PostRepo::new(pool).list_published_with_comment_count().await?;
                Ok(Reply::Posts(posts.into_iter().map(PostResponse::from).collect()))
            }
            Self::PostBySlug(slug) => {
                let post = PostRepo::new(pool).get_by_slug(&slug).await?;
                Ok(Reply::Post(PostResponse::from(post)))
            }
            Self::PostsByCategory(slug) => {
                let filter = PostFilter {
                    category: Some(slug.into_string()),
                    ..PostFilter::published()
                };
                let posts = PostRepo::new(pool).list(&filter).await?;
                Ok(Reply::Posts(posts.into_iter().map(PostResponse::from).collect()))
            }
            Self::AddComment(comment) => {
                tracing::info!(
                    post_id = comment.post_id,
                    author = %comment.author,
                    "Adding comment"
                );
                let created = CommentRepo::new(pool).create(&comment).await?;
                Ok(Reply::Comment(CommentResponse::from(created)))
            }
        }
    }
}

/// Successful procedure envelope: `{"result": {"data": ...}}`
#[derive(Debug, Serialize)]
pub struct RpcResponse<T> {
    pub result: RpcResult<T>,
}

#[derive(Debug, Serialize)]
pub struct RpcResult<T> {
    pub data: T,
}

impl<T> RpcResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            result: RpcResult { data },
        }
    }
}
