//! Database module: the `students` table and its backends.
//!
//! Layout:
//! - `models.rs`: row and insert structs
//! - `schema.rs`: DDL per backend (idempotent)
//! - `mysql.rs` / `sqlite.rs`: backend-specific queries
//! - `storage.rs`: backend selection from configuration

pub mod models;
pub mod mysql;
pub mod schema;
pub mod sqlite;
pub mod storage;

pub use models::{NewStudent, Student, StudentId};
pub use storage::StudentStorage;
