//! Service Container - Centralized service access.
//!
//! Builds every service from one SQL client and hands out trait objects,
//! so handlers never see concrete repositories.

use std::sync::Arc;

use super::{ReservationManager, ReservationService, RoomManager, RoomService};
use crate::errors::AppResult;
use crate::infra::{ReservationStore, RoomStore, SqlClient};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get room service
    fn rooms(&self) -> Arc<dyn RoomService>;

    /// Get reservation service
    fn reservations(&self) -> Arc<dyn ReservationService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    room_service: Arc<dyn RoomService>,
    reservation_service: Arc<dyn ReservationService>,
}

impl Services {
    /// Create a container from already-built services
    pub fn new(
        room_service: Arc<dyn RoomService>,
        reservation_service: Arc<dyn ReservationService>,
    ) -> Self {
        Self {
            room_service,
            reservation_service,
        }
    }

    /// Wire repositories and services over a shared SQL client
    pub fn from_client(client: Arc<dyn SqlClient>) -> Self {
        let rooms = Arc::new(RoomStore::new(client.clone()));
        let reservations = Arc::new(ReservationStore::new(client));

        Self {
            room_service: Arc::new(RoomManager::new(rooms)),
            reservation_service: Arc::new(ReservationManager::new(reservations)),
        }
    }

    /// Make sure both tables exist, rooms first.
    ///
    /// Returns the two status lines in that order.
    pub async fn ensure_schema(&self) -> AppResult<Vec<String>> {
        let rooms = self.room_service.ensure_schema().await?;
        tracing::info!("{}", rooms);

        let reservations = self.reservation_service.ensure_schema().await?;
        tracing::info!("{}", reservations);

        Ok(vec![rooms, reservations])
    }
}

impl ServiceContainer for Services {
    fn rooms(&self) -> Arc<dyn RoomService> {
        self.room_service.clone()
    }

    fn reservations(&self) -> Arc<dyn ReservationService> {
        self.reservation_service.clone()
    }
}
