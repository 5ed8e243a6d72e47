//! Repository layer - Data access abstraction
//!
//! Repositories own the SQL text and map rows and storage failures
//! into domain types and `AppError`.

mod reservation_repository;
mod room_repository;

pub use reservation_repository::{ReservationRepository, ReservationStore};
pub use room_repository::{RoomRepository, RoomStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use reservation_repository::MockReservationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use room_repository::MockRoomRepository;
