use crate::{db::Db, errors::ApiError};

pub async fn require_admin(db: &Db, user_id: &str) -> Result<(), ApiError> {
    let row = sqlx::query("SELECT 1 FROM users WHERE id = ? AND is_admin = 1 LIMIT 1")
        .bind(user_id)
        .fetch_optional(&db.0)
        .await?;

    if row.is_some() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Owner-or-admin rule for resources scoped to `owner_id`.
pub async fn require_owner_or_admin(
    db: &Db,
    requester_id: &str,
    owner_id: &str,
) -> Result<(), ApiError> {
    if requester_id == owner_id {
        return Ok(());
    }
    require_admin(db, requester_id).await
}
