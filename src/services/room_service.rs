//! Room service - Room use cases.
//!
//! Thin layer over the repository; the availability rules live in SQL.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{DateRange, Room};
use crate::errors::AppResult;
use crate::infra::RoomRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Room service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoomService: Send + Sync {
    /// Create the rooms table if needed; returns a status line.
    async fn ensure_schema(&self) -> AppResult<String>;

    async fn add(&self, room: &Room) -> AppResult<()>;

    async fn find(&self) -> AppResult<Vec<Room>>;

    /// Rooms with no live reservation overlapping `range`
    async fn find_available(&self, range: DateRange) -> AppResult<Vec<Room>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Room>;

    /// `false` when the room is booked in `range` or does not exist.
    async fn check_if_available_by_id(&self, id: Uuid, range: DateRange) -> AppResult<bool>;

    async fn update(&self, room: &Room) -> AppResult<()>;
}

/// Concrete implementation of RoomService.
pub struct RoomManager<R: RoomRepository> {
    repo: Arc<R>,
}

impl<R: RoomRepository> RoomManager<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: RoomRepository> RoomService for RoomManager<R> {
    async fn ensure_schema(&self) -> AppResult<String> {
        self.repo.ensure_schema().await
    }

    async fn add(&self, room: &Room) -> AppResult<()> {
        self.repo.add(room).await
    }

    async fn find(&self) -> AppResult<Vec<Room>> {
        self.repo.find().await
    }

    async fn find_available(&self, range: DateRange) -> AppResult<Vec<Room>> {
        self.repo.find_available(range).await
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Room> {
        self.repo.get_by_id(id).await
    }

    async fn check_if_available_by_id(&self, id: Uuid, range: DateRange) -> AppResult<bool> {
        self.repo.check_if_available_by_id(id, range).await
    }

    async fn update(&self, room: &Room) -> AppResult<()> {
        self.repo.update(room).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockRoomRepository;
    use mockall::predicate::eq;

    fn range() -> DateRange {
        DateRange::parse("2024-05-01", "2024-05-03").unwrap()
    }

    #[tokio::test]
    async fn add_forwards_room_unchanged() {
        let room = Room::new("Suite 1".to_string());
        let expected = room.clone();

        let mut repo = MockRoomRepository::new();
        repo.expect_add()
            .withf(move |r| *r == expected)
            .times(1)
            .returning(|_| Ok(()));

        let service = RoomManager::new(Arc::new(repo));
        service.add(&room).await.unwrap();
    }

    #[tokio::test]
    async fn find_available_passes_range() {
        let mut repo = MockRoomRepository::new();
        repo.expect_find_available()
            .with(eq(range()))
            .times(1)
            .returning(|_| Ok(vec![Room::new("Attic".to_string())]));

        let service = RoomManager::new(Arc::new(repo));
        let rooms = service.find_available(range()).await.unwrap();

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "Attic");
    }

    #[tokio::test]
    async fn get_by_id_propagates_not_found() {
        let mut repo = MockRoomRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Err(AppError::not_found("room not found")));

        let service = RoomManager::new(Arc::new(repo));
        let err = service.get_by_id(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn availability_answer_comes_from_repository() {
        let id = Uuid::new_v4();
        let mut repo = MockRoomRepository::new();
        repo.expect_check_if_available_by_id()
            .with(eq(id), eq(range()))
            .times(1)
            .returning(|_, _| Ok(false));

        let service = RoomManager::new(Arc::new(repo));

        assert!(!service.check_if_available_by_id(id, range()).await.unwrap());
    }

    #[test]
    fn ensure_schema_returns_status_line() {
        let mut repo = MockRoomRepository::new();
        repo.expect_ensure_schema()
            .returning(|| Ok("Table rooms ready to go".to_string()));

        let service = RoomManager::new(Arc::new(repo));
        let status = tokio_test::block_on(service.ensure_schema()).unwrap();

        assert_eq!(status, "Table rooms ready to go");
    }
}
