//! SQL DDL for the `students` table, one statement per backend.
//! Both are idempotent: running them against an existing table is a no-op.

/// MySQL schema:
/// - `id` INT UNSIGNED AUTO_INCREMENT PRIMARY KEY
/// - `created_at` defaulted to insertion time by the server
pub const MYSQL_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id INT(6) UNSIGNED AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    age INT(3) NOT NULL,
    department VARCHAR(100) NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQLite schema, used for local runs and tests.
/// `created_at` is stored as `YYYY-MM-DD HH:MM:SS` text in UTC.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    department TEXT NOT NULL,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;
