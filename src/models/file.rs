use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub owner_id: String,
    pub file_path: String,
    pub file_size: i64,
    pub content_type: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn from_row(row: &SqliteRow) -> Self {
        Self {
            id: row.get("id"),
            owner_id: row.get("owner_id"),
            file_path: row.get("file_path"),
            file_size: row.get("file_size"),
            content_type: row.get("content_type"),
            comment: row.get("comment"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}
