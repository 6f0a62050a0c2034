pub mod bookings;
pub mod events;

pub use bookings::{Booking, BookingCreate, ListParams};
pub use events::{OrderEvent, PaymentEvent, ORDER_CREATED, PAYMENT_SUCCESS};
