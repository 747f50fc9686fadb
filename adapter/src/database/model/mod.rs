pub mod booking;
pub mod space;
