use crate::{auth, config::Config, db::Db, errors::ApiError, models::user::User};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::Row;

#[derive(Deserialize)]
pub struct RegisterReq {
    pub username: String,
    pub password: String,
}

pub async fn register(
    db: web::Data<Db>,
    body: web::Json<RegisterReq>,
) -> Result<HttpResponse, ApiError> {
    if body.username.len() < 3 || body.password.len() < 8 {
        return Err(ApiError::BadRequest("invalid username/password".into()));
    }

    let hash = auth::hash_password(&body.password)?;
    let user_id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now();

    let res = sqlx::query(
        "INSERT INTO users(id, username, password_hash, is_admin, created_at, updated_at) \
         VALUES (?, ?, ?, 0, ?, ?)",
    )
    .bind(&user_id)
    .bind(&body.username)
    .bind(&hash)
    .bind(now)
    .bind(now)
    .execute(&db.0)
    .await;

    match res {
        Ok(_) => {
            let user = User {
                id: user_id,
                username: body.username.clone(),
                is_admin: false,
                created_at: now,
                updated_at: now,
            };
            Ok(HttpResponse::Created().json(serde_json::json!({
                "message": "User registered.",
                "results": user,
            })))
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(ApiError::Conflict("Username already exists.".into()))
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Deserialize)]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

pub async fn login(
    cfg: web::Data<Config>,
    db: web::Data<Db>,
    body: web::Json<LoginReq>,
) -> Result<HttpResponse, ApiError> {
    let row = sqlx::query(
        "SELECT id, username, password_hash, is_admin, created_at, updated_at \
         FROM users WHERE username = ?",
    )
    .bind(&body.username)
    .fetch_optional(&db.0)
    .await?;

    let row = row.ok_or(ApiError::Unauthorized)?;
    let password_hash: String = row.get("password_hash");
    if !auth::verify_password(&password_hash, &body.password) {
        return Err(ApiError::Unauthorized);
    }

    let user = User::from_row(&row);
    let token = auth::create_access_token(&user.id, &cfg)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Login successful.",
        "results": { "token": token, "user": user },
    })))
}
