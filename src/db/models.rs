use chrono::{DateTime, Utc};

pub type StudentId = u32;

/// One row of the `students` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: i32,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

/// Validated insert payload; `id` and `created_at` are assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: i32,
    pub department: String,
}
