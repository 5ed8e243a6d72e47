//! Booking API - rooms and reservations over PostgreSQL
//!
//! Layered CRUD service: handler -> service -> repository -> store. The
//! only real business rule is half-open date range overlap, used by the
//! availability queries.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Rooms, reservations and date ranges
//! - **services**: Application use cases
//! - **infra**: SQL client and repositories
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Create missing tables
//! cargo run -- schema
//!
//! # Start the server
//! cargo run -- serve --port 5000
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{DateRange, RecordState, Reservation, ReservationStatus, Room};
pub use errors::{AppError, AppResult};
