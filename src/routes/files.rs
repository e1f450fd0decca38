use crate::{
    auth::AuthUser,
    config::Config,
    db::Db,
    errors::ApiError,
    models::file::FileRecord,
    permissions::{require_admin, require_owner_or_admin},
    uploads,
};
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use std::io::Write;

pub async fn list_user_files(
    db: web::Data<Db>,
    user: AuthUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = path.into_inner();
    require_owner_or_admin(&db, &user.user_id, &owner_id).await?;

    let rows = sqlx::query(
        "SELECT id, owner_id, file_path, file_size, content_type, comment, created_at, updated_at \
         FROM files WHERE owner_id = ? ORDER BY created_at ASC",
    )
    .bind(&owner_id)
    .fetch_all(&db.0)
    .await?;
    let files: Vec<FileRecord> = rows.iter().map(FileRecord::from_row).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Files retrieved.",
        "results": files,
    })))
}

// Admin-only view over every user's records.
pub async fn list_all_files(db: web::Data<Db>, user: AuthUser) -> Result<HttpResponse, ApiError> {
    require_admin(&db, &user.user_id).await?;

    let rows = sqlx::query(
        "SELECT id, owner_id, file_path, file_size, content_type, comment, created_at, updated_at \
         FROM files ORDER BY created_at ASC",
    )
    .fetch_all(&db.0)
    .await?;
    let files: Vec<FileRecord> = rows.iter().map(FileRecord::from_row).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Files retrieved.",
        "results": files,
    })))
}

pub async fn upload_file(
    cfg: web::Data<Config>,
    db: web::Data<Db>,
    user: AuthUser,
    path: web::Path<String>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let owner_id = path.into_inner();
    require_owner_or_admin(&db, &user.user_id, &owner_id).await?;
    ensure_owner_exists(&db, &owner_id).await?;

    let form = uploads::read_upload_form(&cfg, &mut payload).await?;
    let upload = uploads::validate_upload(form)?;

    let id = uuid::Uuid::new_v4().to_string();
    let stored_name = format!("{}.{}", id, upload.extension);
    let dest = std::path::Path::new(&cfg.uploads_dir).join(&stored_name);
    let mut f = std::fs::File::create(&dest).map_err(|_| ApiError::Internal)?;
    f.write_all(&upload.data).map_err(|_| ApiError::Internal)?;

    let now = chrono::Utc::now();
    sqlx::query(
        "INSERT INTO files(id, owner_id, file_path, file_size, content_type, comment, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&owner_id)
    .bind(&stored_name)
    .bind(upload.data.len() as i64)
    .bind(upload.content_type)
    .bind(&upload.comment)
    .bind(now)
    .bind(now)
    .execute(&db.0)
    .await?;

    let record = FileRecord {
        id,
        owner_id,
        file_path: stored_name,
        file_size: upload.data.len() as i64,
        content_type: upload.content_type.to_string(),
        comment: Some(upload.comment),
        created_at: now,
        updated_at: now,
    };
    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "File uploaded successfully.",
        "results": record,
    })))
}

pub async fn get_file(
    db: web::Data<Db>,
    user: AuthUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (owner_id, file_id) = path.into_inner();
    require_owner_or_admin(&db, &user.user_id, &owner_id).await?;

    let record = fetch_owned_file(&db, &owner_id, &file_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "File retrieved.",
        "results": record,
    })))
}

#[derive(Deserialize)]
pub struct UpdateFileReq {
    pub comment: String,
}

pub async fn update_file(
    db: web::Data<Db>,
    user: AuthUser,
    path: web::Path<(String, String)>,
    body: web::Json<UpdateFileReq>,
) -> Result<HttpResponse, ApiError> {
    let (owner_id, file_id) = path.into_inner();
    require_owner_or_admin(&db, &user.user_id, &owner_id).await?;
    fetch_owned_file(&db, &owner_id, &file_id).await?;

    sqlx::query("UPDATE files SET comment = ?, updated_at = ? WHERE id = ? AND owner_id = ?")
        .bind(&body.comment)
        .bind(chrono::Utc::now())
        .bind(&file_id)
        .bind(&owner_id)
        .execute(&db.0)
        .await?;

    let record = fetch_owned_file(&db, &owner_id, &file_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "File updated.",
        "results": record,
    })))
}

pub async fn delete_file(
    cfg: web::Data<Config>,
    db: web::Data<Db>,
    user: AuthUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (owner_id, file_id) = path.into_inner();
    require_owner_or_admin(&db, &user.user_id, &owner_id).await?;

    let record = fetch_owned_file(&db, &owner_id, &file_id).await?;
    sqlx::query("DELETE FROM files WHERE id = ? AND owner_id = ?")
        .bind(&file_id)
        .bind(&owner_id)
        .execute(&db.0)
        .await?;

    // Blob removal is best effort once the record is gone.
    let blob = std::path::Path::new(&cfg.uploads_dir).join(&record.file_path);
    if let Err(e) = std::fs::remove_file(&blob) {
        log::warn!("failed to remove stored file {}: {}", blob.display(), e);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "File deleted.",
    })))
}

async fn fetch_owned_file(db: &Db, owner_id: &str, file_id: &str) -> Result<FileRecord, ApiError> {
    let row = sqlx::query(
        "SELECT id, owner_id, file_path, file_size, content_type, comment, created_at, updated_at \
         FROM files WHERE id = ? AND owner_id = ?",
    )
    .bind(file_id)
    .bind(owner_id)
    .fetch_optional(&db.0)
    .await?;
    let row = row.ok_or_else(|| ApiError::file_not_found(file_id))?;
    Ok(FileRecord::from_row(&row))
}

async fn ensure_owner_exists(db: &Db, owner_id: &str) -> Result<(), ApiError> {
    let row = sqlx::query("SELECT 1 FROM users WHERE id = ?")
        .bind(owner_id)
        .fetch_optional(&db.0)
        .await?;
    row.map(|_| ())
        .ok_or_else(|| ApiError::user_not_found(owner_id))
}
