use crate::config::DatabaseConfig;
use crate::db::models::{NewStudent, Student, StudentId};
use crate::db::schema::MYSQL_INIT;
use crate::error::RecordsError;
use chrono::{DateTime, Utc};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlRow};
use sqlx::{MySql, Pool, Row};
use std::str::FromStr;

pub type MySqlPool = Pool<MySql>;

#[derive(Clone)]
pub struct MySqlStudents {
    pool: MySqlPool,
}

impl MySqlStudents {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, RecordsError> {
        let pool = MySqlPoolOptions::new()
            .connect_with(Self::connect_options(cfg)?)
            .await?;
        Ok(Self::new(pool))
    }

    /// Options from the URL when one is configured, otherwise from the parts.
    pub fn connect_options(cfg: &DatabaseConfig) -> Result<MySqlConnectOptions, RecordsError> {
        if let Some(url) = cfg.url.as_deref() {
            return Ok(MySqlConnectOptions::from_str(url)?);
        }
        let mut opts = MySqlConnectOptions::new()
            .host(&cfg.host)
            .port(cfg.port)
            .username(&cfg.user)
            .database(&cfg.name);
        if !cfg.password.is_empty() {
            opts = opts.password(&cfg.password);
        }
        Ok(opts)
    }

    pub async fn init_schema(&self) -> Result<(), RecordsError> {
        sqlx::query(MYSQL_INIT).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn list_recent(&self) -> Result<Vec<Student>, RecordsError> {
        let rows = sqlx::query(
            r#"SELECT id, name, age, department, created_at
               FROM students ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    pub async fn insert(&self, student: &NewStudent) -> Result<StudentId, RecordsError> {
        let result = sqlx::query("INSERT INTO students (name, age, department) VALUES (?, ?, ?)")
            .bind(&student.name)
            .bind(student.age)
            .bind(&student.department)
            .execute(&self.pool)
            .await?;
        let id = StudentId::try_from(result.last_insert_id())
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(id)
    }

    pub async fn delete(&self, id: StudentId) -> Result<u64, RecordsError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    fn row_to_model(row: MySqlRow) -> Result<Student, RecordsError> {
        let id: StudentId = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let age: i32 = row.try_get("age")?;
        let department: String = row.try_get("department")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(Student {
            id,
            name,
            age,
            department,
            created_at,
        })
    }
}
