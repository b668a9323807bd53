//! quill-server: blog backend over Postgres
//!
//! Categories, posts and moderated comments, served as JSON resource routes
//! and as a small set of named procedures.

pub mod db;
pub mod http;
pub mod models;
pub mod rpc;

pub use db::{connect, migrate};
pub use http::{run_server, ServerConfig};
