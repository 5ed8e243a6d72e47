//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::SqlClient;
use crate::services::{ReservationService, RoomService, ServiceContainer};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Room service
    pub rooms: Arc<dyn RoomService>,
    /// Reservation service
    pub reservations: Arc<dyn ReservationService>,
    /// Store handle for health checks
    pub database: Arc<dyn SqlClient>,
}

impl AppState {
    /// Take services out of any container.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<dyn SqlClient>) -> Self {
        Self {
            rooms: container.rooms(),
            reservations: container.reservations(),
            database,
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        rooms: Arc<dyn RoomService>,
        reservations: Arc<dyn ReservationService>,
        database: Arc<dyn SqlClient>,
    ) -> Self {
        Self {
            rooms,
            reservations,
            database,
        }
    }
}
