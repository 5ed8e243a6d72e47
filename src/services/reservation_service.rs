//! Reservation service - Reservation use cases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Reservation;
use crate::errors::{AppError, AppResult};
use crate::infra::ReservationRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reservation service trait for dependency injection.
///
/// Overlaps are never checked here; callers ask the room service first.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Create the reservations table if needed; returns a status line.
    async fn ensure_schema(&self) -> AppResult<String>;

    async fn add(&self, reservation: &Reservation) -> AppResult<()>;

    /// Soft delete by textual id. Empty ids are rejected before parsing.
    async fn delete(&self, id: &str) -> AppResult<()>;

    async fn find(&self) -> AppResult<Vec<Reservation>>;

    async fn find_by_room_id(&self, room_id: Uuid) -> AppResult<Vec<Reservation>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Reservation>;

    async fn update(&self, reservation: &Reservation) -> AppResult<()>;
}

/// Concrete implementation of ReservationService.
pub struct ReservationManager<R: ReservationRepository> {
    repo: Arc<R>,
}

impl<R: ReservationRepository> ReservationManager<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: ReservationRepository> ReservationService for ReservationManager<R> {
    async fn ensure_schema(&self) -> AppResult<String> {
        self.repo.ensure_schema().await
    }

    async fn add(&self, reservation: &Reservation) -> AppResult<()> {
        self.repo.add(reservation).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        if id.is_empty() {
            return Err(AppError::bad_request("ID is required"));
        }

        let id = Uuid::parse_str(id)
            .map_err(|_| AppError::validation("invalid reservation ID"))?;

        self.repo.delete(id).await
    }

    async fn find(&self) -> AppResult<Vec<Reservation>> {
        self.repo.find().await
    }

    async fn find_by_room_id(&self, room_id: Uuid) -> AppResult<Vec<Reservation>> {
        self.repo.find_by_room_id(room_id).await
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Reservation> {
        self.repo.get_by_id(id).await
    }

    async fn update(&self, reservation: &Reservation) -> AppResult<()> {
        self.repo.update(reservation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateRange, ReservationStatus};
    use crate::infra::MockReservationRepository;
    use mockall::predicate::eq;

    fn reservation() -> Reservation {
        Reservation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            ReservationStatus::BookRequest,
            DateRange::parse("2024-01-01", "2024-01-05").unwrap(),
        )
    }

    #[tokio::test]
    async fn delete_with_empty_id_is_bad_request() {
        let mut repo = MockReservationRepository::new();
        repo.expect_delete().never();

        let service = ReservationManager::new(Arc::new(repo));
        let err = service.delete("").await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(ref m) if m == "ID is required"));
    }

    #[tokio::test]
    async fn delete_with_malformed_id_is_validation_error() {
        let mut repo = MockReservationRepository::new();
        repo.expect_delete().never();

        let service = ReservationManager::new(Arc::new(repo));
        let err = service.delete("not-a-uuid").await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_forwards_parsed_id() {
        let id = Uuid::new_v4();
        let mut repo = MockReservationRepository::new();
        repo.expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(()));

        let service = ReservationManager::new(Arc::new(repo));

        service.delete(&id.to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn find_by_room_id_forwards_room() {
        let room_id = Uuid::new_v4();
        let mut repo = MockReservationRepository::new();
        repo.expect_find_by_room_id()
            .with(eq(room_id))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ReservationManager::new(Arc::new(repo));

        assert!(service.find_by_room_id(room_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_forwards_storage_errors() {
        let mut repo = MockReservationRepository::new();
        repo.expect_update()
            .returning(|_| Err(AppError::Storage("Failed to update reservation".to_string())));

        let service = ReservationManager::new(Arc::new(repo));
        let err = service.update(&reservation()).await.unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn add_does_not_check_overlap() {
        let mut repo = MockReservationRepository::new();
        repo.expect_add().times(2).returning(|_| Ok(()));

        let service = ReservationManager::new(Arc::new(repo));
        let first = reservation();
        let mut second = reservation();
        second.room_id = first.room_id;

        service.add(&first).await.unwrap();
        service.add(&second).await.unwrap();
    }
}
