pub mod gateway;

pub use gateway::{SkipReason, UserCheck, UsersGateway};
