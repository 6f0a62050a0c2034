//! Booking status policy. Pure, no I/O: the seam that stays unit-testable
//! independent of network conditions.

use crate::users::UserCheck;

/// Degraded status for bookings accepted while the users service could not
/// answer.
pub const PENDING_USER_CHECK: &str = "pending_user_check";

/// Decision for one booking-creation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusResolution {
    /// Persist the booking with this status.
    Accept { status: String },
    /// The user is confirmed absent; nothing is persisted.
    RejectUserNotFound,
}

/// Availability wins over strict validation: an unanswered check accepts the
/// booking in the degraded state rather than blocking the write path.
pub fn resolve_status(requested: &str, outcome: UserCheck) -> StatusResolution {
    match outcome {
        UserCheck::Exists => StatusResolution::Accept {
            status: requested.to_string(),
        },
        UserCheck::NotFound => StatusResolution::RejectUserNotFound,
        UserCheck::Unknown(_) => StatusResolution::Accept {
            status: PENDING_USER_CHECK.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::SkipReason;

    #[test]
    fn confirmed_user_keeps_the_requested_status() {
        let resolution = resolve_status("confirmed", UserCheck::Exists);
        assert_eq!(
            resolution,
            StatusResolution::Accept {
                status: "confirmed".to_string()
            }
        );
    }

    #[test]
    fn absent_user_rejects_regardless_of_requested_status() {
        for requested in ["confirmed", "pending", "whatever the caller sent"] {
            assert_eq!(
                resolve_status(requested, UserCheck::NotFound),
                StatusResolution::RejectUserNotFound
            );
        }
    }

    #[test]
    fn users_down_degrades_to_pending_user_check() {
        let resolution = resolve_status("confirmed", UserCheck::Unknown(SkipReason::UsersDown));
        assert_eq!(
            resolution,
            StatusResolution::Accept {
                status: PENDING_USER_CHECK.to_string()
            }
        );
    }

    #[test]
    fn open_circuit_degrades_to_pending_user_check() {
        let resolution = resolve_status("cancelled", UserCheck::Unknown(SkipReason::CircuitOpen));
        assert_eq!(
            resolution,
            StatusResolution::Accept {
                status: PENDING_USER_CHECK.to_string()
            }
        );
    }
}
