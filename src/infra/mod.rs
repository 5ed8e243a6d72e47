//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and the statement-level SQL client
//! - Repositories for rooms and reservations

pub mod db;
pub mod repositories;

pub use db::{Database, SqlClient};
pub use repositories::{ReservationRepository, ReservationStore, RoomRepository, RoomStore};

#[cfg(any(test, feature = "test-utils"))]
pub use db::MockSqlClient;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockReservationRepository, MockRoomRepository};
