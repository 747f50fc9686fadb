pub mod booking;
pub mod geo;
pub mod id;
pub mod price;
pub mod space;
pub mod time_slot;
