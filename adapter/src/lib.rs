pub mod database;
pub mod memory;
pub mod notifier;
pub mod repository;
