pub mod booking;
pub mod search;
pub mod space;
