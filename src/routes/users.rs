use crate::{
    auth::AuthUser, config::Config, db::Db, errors::ApiError, models::user::User,
    permissions::require_admin,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::Row;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminReq {
    pub is_admin: bool,
}

pub async fn set_admin(
    db: web::Data<Db>,
    user: AuthUser,
    path: web::Path<String>,
    body: web::Json<SetAdminReq>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&db, &user.user_id).await?;
    let target_id = path.into_inner();

    let res = sqlx::query("UPDATE users SET is_admin = ?, updated_at = ? WHERE id = ?")
        .bind(body.is_admin)
        .bind(chrono::Utc::now())
        .bind(&target_id)
        .execute(&db.0)
        .await?;
    if res.rows_affected() == 0 {
        return Err(ApiError::user_not_found(&target_id));
    }

    let row = sqlx::query(
        "SELECT id, username, is_admin, created_at, updated_at FROM users WHERE id = ?",
    )
    .bind(&target_id)
    .fetch_one(&db.0)
    .await?;

    log::info!(
        "AdminAction: set_admin admin_id={} target_id={} is_admin={}",
        user.user_id,
        target_id,
        body.is_admin
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User updated.",
        "results": User::from_row(&row),
    })))
}

pub async fn delete_user(
    cfg: web::Data<Config>,
    db: web::Data<Db>,
    user: AuthUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&db, &user.user_id).await?;
    let target_id = path.into_inner();

    let exists = sqlx::query("SELECT 1 FROM users WHERE id = ?")
        .bind(&target_id)
        .fetch_optional(&db.0)
        .await?;
    if exists.is_none() {
        return Err(ApiError::user_not_found(&target_id));
    }

    let blobs = sqlx::query("SELECT file_path FROM files WHERE owner_id = ?")
        .bind(&target_id)
        .fetch_all(&db.0)
        .await?;

    // File rows go with the user via the FK cascade.
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(&target_id)
        .execute(&db.0)
        .await?;

    for row in blobs {
        let stored: String = row.get("file_path");
        let blob = std::path::Path::new(&cfg.uploads_dir).join(&stored);
        if let Err(e) = std::fs::remove_file(&blob) {
            log::warn!("failed to remove stored file {}: {}", blob.display(), e);
        }
    }

    log::info!(
        "AdminAction: delete_user admin_id={} target_id={}",
        user.user_id,
        target_id
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User deleted.",
    })))
}
