use crate::db::models::{NewStudent, Student, StudentId};
use crate::db::schema::SQLITE_INIT;
use crate::error::RecordsError;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone)]
pub struct SqliteStudents {
    pool: SqlitePool,
}

impl SqliteStudents {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database file behind a `sqlite:` URL.
    pub async fn connect(url: &str) -> Result<Self, RecordsError> {
        let connect_opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn init_schema(&self) -> Result<(), RecordsError> {
        sqlx::query(SQLITE_INIT).execute(&self.pool).await?;
        Ok(())
    }

    /// All rows, newest first. Rows created within the same second fall back
    /// to descending id.
    pub async fn list_recent(&self) -> Result<Vec<Student>, RecordsError> {
        let rows = sqlx::query(
            r#"SELECT id, name, age, department, created_at
               FROM students ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Insert one row. Returns the assigned id.
    pub async fn insert(&self, student: &NewStudent) -> Result<StudentId, RecordsError> {
        let result = sqlx::query("INSERT INTO students (name, age, department) VALUES (?, ?, ?)")
            .bind(&student.name)
            .bind(student.age)
            .bind(&student.department)
            .execute(&self.pool)
            .await?;
        let id = StudentId::try_from(result.last_insert_rowid())
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(id)
    }

    /// Delete by id. Returns the number of rows removed (0 or 1).
    pub async fn delete(&self, id: StudentId) -> Result<u64, RecordsError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    fn row_to_model(row: SqliteRow) -> Result<Student, RecordsError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let age: i32 = row.try_get("age")?;
        let department: String = row.try_get("department")?;
        let created_at_str: String = row.try_get("created_at")?;

        let id = StudentId::try_from(id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let created_at: DateTime<Utc> =
            NaiveDateTime::parse_from_str(&created_at_str, SQLITE_TIMESTAMP_FORMAT)
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
                .and_utc();

        Ok(Student {
            id,
            name,
            age,
            department,
            created_at,
        })
    }
}
