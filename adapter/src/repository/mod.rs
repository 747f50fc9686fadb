pub mod account;
pub mod booking;
pub mod health;
pub mod space;
