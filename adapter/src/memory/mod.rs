//! In-memory repository implementations. These back the service-level tests
//! and double as a reference for the transactional semantics the Postgres
//! implementations must provide.

pub mod account;
pub mod booking;
pub mod notifier;
pub mod space;
