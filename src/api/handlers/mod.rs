pub mod bookings;
pub mod events;
pub mod health;
pub mod proxy;

use crate::kafka::EventPublisher;
use crate::services::BookingService;
use crate::users::UsersGateway;

/// Shared handler state. All members are cheap clones over shared inner
/// state; the gateway here and the one inside the service share the same
/// breaker.
#[derive(Clone)]
pub struct AppState {
    pub bookings: BookingService,
    pub publisher: EventPublisher,
    pub users: UsersGateway,
}
