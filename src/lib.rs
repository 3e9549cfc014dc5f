//! KnowledgeKnot
//!
//! A server-rendered application for sharing posts and discussing them in
//! comments, backed by a MongoDB document store.
//!
//! # Modules
//!
//! - `handlers`: HTTP request handlers for posts and comments
//! - `models`: document structures and validated input records
//! - `db`: the `Store` trait and its MongoDB / in-memory backends
//! - `validate`: schema-driven decoding of form submissions
//! - `views`: askama templates for every page
//! - `middleware`: `_method` override for HTML forms
//! - `routes`: the route table, shared by the binary and the test suite
//! - `error`: fault taxonomy and the error view pipeline
//! - `config`: environment-driven configuration

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod validate;
pub mod views;

pub use config::Config;
pub use error::{AppError, Result};
