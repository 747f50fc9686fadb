pub mod account;
pub mod booking;
pub mod health;
pub mod notifier;
pub mod space;
