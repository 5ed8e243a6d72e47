//! Application services layer - Use cases.
//!
//! Services sit between handlers and repositories and depend on
//! repository traits only.

pub mod container;
mod reservation_service;
mod room_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use reservation_service::{ReservationManager, ReservationService};
pub use room_service::{RoomManager, RoomService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use reservation_service::MockReservationService;
#[cfg(any(test, feature = "test-utils"))]
pub use room_service::MockRoomService;
