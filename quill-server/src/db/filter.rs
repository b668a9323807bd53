//! Dynamic WHERE-clause composition for post listings
//!
//! Conditions are collected as `(column, value)` pairs and rendered in one
//! pass through [`QueryBuilder`], which numbers each placeholder from the
//! arguments it has already bound. No index arithmetic happens here.

use sqlx::{Postgres, QueryBuilder};

use super::repos::posts::{POST_COLUMNS, POST_FROM};

/// Upper bound on `limit`
pub const MAX_LIMIT: i64 = 100;

/// Optional filters for listing posts. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub published: Option<bool>,
    pub slug: Option<String>,
    /// Category slug
    pub category: Option<String>,
    pub limit: Option<i64>,
}

/// A value bound to one condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Bool(bool),
    Text(String),
}

/// One `column = $n` condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: &'static str,
    pub value: FilterValue,
}

/// Ordered, AND-combined conditions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions(Vec<Condition>);

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: &'static str, value: FilterValue) -> &mut Self {
        self.0.push(Condition { column, value });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.0.iter()
    }

    /// Append ` WHERE a = $i AND b = $j ...`, binding each value in order.
    pub fn push_where<'args>(self, qb: &mut QueryBuilder<'args, Postgres>) {
        for (i, condition) in self.0.into_iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            qb.push(condition.column).push(" = ");
            match condition.value {
                FilterValue::Bool(b) => qb.push_bind(b),
                FilterValue::Text(t) => qb.push_bind(t),
            };
        }
    }
}

impl PostFilter {
    /// Only published posts, newest first.
    pub fn published() -> Self {
        Self {
            published: Some(true),
            ..Self::default()
        }
    }

    /// Conditions in fixed order: published flag, post slug, category slug.
    pub fn conditions(&self) -> Conditions {
        let mut conditions = Conditions::new();

        if let Some(published) = self.published {
            conditions.push("p.published", FilterValue::Bool(published));
        }
        if let Some(slug) = non_empty(&self.slug) {
            conditions.push("p.slug", FilterValue::Text(slug.to_owned()));
        }
        if let Some(category) = non_empty(&self.category) {
            conditions.push("c.slug", FilterValue::Text(category.to_owned()));
        }

        conditions
    }

    /// Effective limit, clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> Option<i64> {
        self.limit.map(|l| l.clamp(1, MAX_LIMIT))
    }

    /// Build the complete listing statement.
    pub fn to_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT {POST_COLUMNS} {POST_FROM}"));

        self.conditions().push_where(&mut qb);
        qb.push(" ORDER BY p.created_at DESC, p.id DESC");

        if let Some(limit) = self.limit() {
            qb.push(" LIMIT ").push_bind(limit);
        }

        qb
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
