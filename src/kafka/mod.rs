pub mod publisher;

pub use publisher::{create_producer, EventPublisher};
