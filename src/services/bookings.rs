use crate::error::{AppError, Result};
use crate::repositories::{Booking, BookingCreate, BookingRepository};
use crate::services::status::{resolve_status, StatusResolution};
use crate::users::{UserCheck, UsersGateway};

const MAX_STATUS_LEN: usize = 100;
const MAX_LIST_LIMIT: i64 = 1000;

#[derive(Clone)]
pub struct BookingService {
    repository: BookingRepository,
    users: UsersGateway,
}

impl BookingService {
    pub fn new(repository: BookingRepository, users: UsersGateway) -> Self {
        Self { repository, users }
    }

    /// Validate the payload, check the user upstream, resolve the final
    /// status and persist. Dependency trouble never fails the request; only
    /// a confirmed-absent user does.
    pub async fn create(&self, payload: BookingCreate) -> Result<Booking> {
        validate_payload(&payload)?;

        let outcome = self.users.check_user_exists(payload.user_id).await;
        match resolve_status(&payload.status, outcome) {
            StatusResolution::RejectUserNotFound => Err(AppError::NotFound(format!(
                "User {} not found",
                payload.user_id
            ))),
            StatusResolution::Accept { status } => {
                if let UserCheck::Unknown(reason) = outcome {
                    tracing::warn!(
                        user_id = payload.user_id,
                        reason = %reason,
                        status = %status,
                        "user validation unavailable, accepting booking in degraded status"
                    );
                }
                self.repository
                    .create(payload.user_id, payload.course_id, &status)
                    .await
            }
        }
    }

    pub async fn get(&self, id: i64) -> Result<Booking> {
        self.repository.find_by_id(id).await
    }

    /// Page ordered by ascending id.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Booking>> {
        validate_page(limit, offset)?;

        self.repository.find_all(limit, offset).await
    }

    /// Full-row update. No user re-validation here: the referenced user was
    /// vetted at creation time and updates stay plain CRUD.
    pub async fn update(&self, id: i64, payload: BookingCreate) -> Result<Booking> {
        validate_payload(&payload)?;

        self.repository
            .update(id, payload.user_id, payload.course_id, &payload.status)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await
    }

    pub async fn health_check(&self) -> Result<(bool, bool)> {
        self.repository.health_check().await
    }
}

fn validate_payload(payload: &BookingCreate) -> Result<()> {
    if payload.user_id < 1 {
        return Err(AppError::InvalidInput(
            "user_id must be a positive integer".to_string(),
        ));
    }

    if payload.course_id < 1 {
        return Err(AppError::InvalidInput(
            "course_id must be a positive integer".to_string(),
        ));
    }

    // Character count, not byte length: the column is VARCHAR(100).
    if payload.status.is_empty() || payload.status.chars().count() > MAX_STATUS_LEN {
        return Err(AppError::InvalidInput(format!(
            "status must be between 1 and {} characters",
            MAX_STATUS_LEN
        )));
    }

    Ok(())
}

fn validate_page(limit: i64, offset: i64) -> Result<()> {
    if limit < 1 || limit > MAX_LIST_LIMIT {
        return Err(AppError::InvalidInput(format!(
            "limit must be between 1 and {}",
            MAX_LIST_LIMIT
        )));
    }

    if offset < 0 {
        return Err(AppError::InvalidInput(
            "offset must be non-negative".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(user_id: i64, course_id: i64, status: &str) -> BookingCreate {
        BookingCreate {
            user_id,
            course_id,
            status: status.to_string(),
        }
    }

    #[test]
    fn accepts_a_well_formed_payload() {
        assert!(validate_payload(&payload(1, 10, "confirmed")).is_ok());
    }

    #[test]
    fn rejects_non_positive_ids() {
        assert!(validate_payload(&payload(0, 10, "confirmed")).is_err());
        assert!(validate_payload(&payload(-3, 10, "confirmed")).is_err());
        assert!(validate_payload(&payload(1, 0, "confirmed")).is_err());
    }

    #[test]
    fn rejects_empty_status() {
        assert!(validate_payload(&payload(1, 10, "")).is_err());
    }

    #[test]
    fn rejects_overlong_status() {
        let long = "x".repeat(MAX_STATUS_LEN + 1);
        assert!(validate_payload(&payload(1, 10, &long)).is_err());

        let at_limit = "x".repeat(MAX_STATUS_LEN);
        assert!(validate_payload(&payload(1, 10, &at_limit)).is_ok());
    }

    #[test]
    fn status_length_counts_characters_not_bytes() {
        // 60 characters, 120 bytes: within the 100-character bound.
        let accented = "é".repeat(60);
        assert!(validate_payload(&payload(1, 10, &accented)).is_ok());

        let accented_over = "é".repeat(MAX_STATUS_LEN + 1);
        assert!(validate_payload(&payload(1, 10, &accented_over)).is_err());
    }

    #[test]
    fn caller_supplied_free_text_status_is_allowed() {
        assert!(validate_payload(&payload(1, 10, "waitlisted-by-ops")).is_ok());
    }

    #[test]
    fn page_bounds_are_enforced() {
        assert!(validate_page(10, 0).is_ok());
        assert!(validate_page(0, 0).is_err());
        assert!(validate_page(MAX_LIST_LIMIT + 1, 0).is_err());
        assert!(validate_page(10, -1).is_err());
    }
}
