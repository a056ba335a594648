//! Stride Database Layer
//!
//! SQLite persistence for Stride. The pool is a mutex-guarded connection;
//! callers run queries through `with_conn`/`with_conn_mut` closures.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{DbError, DbPool, DbResult};
