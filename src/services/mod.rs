pub mod bookings;
pub mod status;

pub use bookings::BookingService;
pub use status::{resolve_status, StatusResolution, PENDING_USER_CHECK};
