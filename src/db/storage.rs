use crate::config::{DatabaseConfig, redact_url};
use crate::db::models::{NewStudent, Student, StudentId};
use crate::db::mysql::MySqlStudents;
use crate::db::sqlite::SqliteStudents;
use crate::error::RecordsError;
use tracing::{debug, info};

/// Student table handle over one of the supported backends.
///
/// Built once at startup and shared through the router state.
#[derive(Clone)]
pub enum StudentStorage {
    MySql(MySqlStudents),
    Sqlite(SqliteStudents),
}

impl StudentStorage {
    /// Connect using `cfg`. A `sqlite:` URL selects SQLite, anything else MySQL.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, RecordsError> {
        match cfg.url.as_deref() {
            Some(url) if cfg.is_sqlite() => {
                info!(url = %url, "opening sqlite student database");
                Ok(StudentStorage::Sqlite(SqliteStudents::connect(url).await?))
            }
            Some(url) => {
                info!(url = %redact_url(url), "connecting to mysql");
                Ok(StudentStorage::MySql(MySqlStudents::connect(cfg).await?))
            }
            None => {
                info!(host = %cfg.host, port = cfg.port, database = %cfg.name, "connecting to mysql");
                Ok(StudentStorage::MySql(MySqlStudents::connect(cfg).await?))
            }
        }
    }

    /// Connect and ensure the `students` table exists.
    pub async fn open(cfg: &DatabaseConfig) -> Result<Self, RecordsError> {
        let storage = Self::connect(cfg).await?;
        storage.init_schema().await?;
        Ok(storage)
    }

    pub async fn init_schema(&self) -> Result<(), RecordsError> {
        match self {
            StudentStorage::MySql(db) => db.init_schema().await?,
            StudentStorage::Sqlite(db) => db.init_schema().await?,
        }
        debug!("students schema ready");
        Ok(())
    }

    pub async fn list_recent(&self) -> Result<Vec<Student>, RecordsError> {
        match self {
            StudentStorage::MySql(db) => db.list_recent().await,
            StudentStorage::Sqlite(db) => db.list_recent().await,
        }
    }

    pub async fn insert(&self, student: &NewStudent) -> Result<StudentId, RecordsError> {
        match self {
            StudentStorage::MySql(db) => db.insert(student).await,
            StudentStorage::Sqlite(db) => db.insert(student).await,
        }
    }

    pub async fn delete(&self, id: StudentId) -> Result<u64, RecordsError> {
        match self {
            StudentStorage::MySql(db) => db.delete(id).await,
            StudentStorage::Sqlite(db) => db.delete(id).await,
        }
    }
}
