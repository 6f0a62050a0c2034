use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, Result};

/// A persisted booking row. `id` is store-assigned and immutable.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub status: String,
}

/// Request body for create and full update. `status` defaults to `pending`.
#[derive(Debug, Deserialize, Clone)]
pub struct BookingCreate {
    pub user_id: i64,
    pub course_id: i64,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "pending".to_string()
}

#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64, course_id: i64, status: &str) -> Result<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, course_id, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, course_id, status
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Booking create failed"))?;

        Ok(booking)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, user_id, course_id, status
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        Ok(booking)
    }

    /// Page of bookings ordered by ascending id.
    pub async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, user_id, course_id, status
            FROM bookings
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        course_id: i64,
        status: &str,
    ) -> Result<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET user_id = $2, course_id = $3, status = $4
            WHERE id = $1
            RETURNING id, user_id, course_id, status
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(course_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Booking update failed"))?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        Ok(booking)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Booking {} not found", id)));
        }

        Ok(())
    }

    /// (connected, table_exists) for the health endpoint.
    pub async fn health_check(&self) -> Result<(bool, bool)> {
        let table_exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_name = 'bookings'
            )
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok((true, table_exists))
    }
}

fn is_integrity_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        matches!(
            db_err.kind(),
            sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation
        )
    } else {
        false
    }
}

/// Integrity violations surface as a conflict, everything else stays a
/// database error.
fn map_write_error(err: sqlx::Error, conflict_msg: &str) -> AppError {
    if is_integrity_violation(&err) {
        AppError::Conflict(conflict_msg.to_string())
    } else {
        AppError::Database(err)
    }
}
