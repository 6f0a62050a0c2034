pub mod bookings;

pub use bookings::{Booking, BookingCreate, BookingRepository};
