//! Domain logic shared by the coursehub backend crates.
//!
//! This crate has no internal dependencies so the database and API layers
//! can both use it, and so the pure logic (progress math, payment
//! signatures) is testable without a running server or database.

pub mod error;
pub mod payment;
pub mod progress;
pub mod roles;
pub mod types;
