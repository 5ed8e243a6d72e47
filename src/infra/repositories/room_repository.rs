//! Room repository over raw SQL.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{FromQueryResult, QueryResult, Value};
use uuid::Uuid;

use crate::domain::{DateRange, Room};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::db::SqlClient;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub const CHECK_IF_ROOMS_TABLE_EXIST: &str =
    "SELECT to_regclass('public.rooms')::text AS table_name";
pub const CREATE_ROOMS_TABLE: &str = "CREATE TABLE IF NOT EXISTS public.rooms (
    id uuid NOT NULL,
    name varchar(255) NOT NULL,
    created timestamptz NOT NULL,
    updated timestamptz NOT NULL,
    CONSTRAINT rooms_pkey PRIMARY KEY (id)
)";

pub const ROOM_CREATE: &str = "INSERT INTO rooms (id, name, created, updated) VALUES ($1, $2, $3, $4)";
pub const ROOMS_FIND: &str = "SELECT id, name, created, updated FROM rooms ORDER BY name ASC";
// The availability queries are the SQL form of `DateRange::overlaps`
// (`requested.start < booked.end AND requested.end > booked.start`).
// Keep both sides in step.
pub const ROOMS_FIND_AVAILABLE: &str = "SELECT r.id, r.name, r.created, r.updated FROM rooms r \
    WHERE r.id NOT IN (SELECT rr.room_id FROM reservations rr \
    WHERE rr.deleted = false AND $1 < rr.end_date AND $2 > rr.start_date) \
    ORDER BY r.name ASC";
pub const ROOM_GET_BY_ID: &str = "SELECT id, name, created, updated FROM rooms WHERE id = $1";
pub const ROOM_CHECK_IF_AVAILABLE_BY_ID: &str = "SELECT r.id, r.name, r.created, r.updated FROM rooms r \
    WHERE r.id = $1 AND r.id NOT IN (SELECT rr.room_id FROM reservations rr \
    WHERE rr.deleted = false AND $2 < rr.end_date AND $3 > rr.start_date)";
pub const ROOM_UPDATE: &str = "UPDATE rooms SET name = $1, updated = $2 WHERE id = $3";

/// Room repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Create the `rooms` table unless it exists; returns a status line.
    async fn ensure_schema(&self) -> AppResult<String>;

    async fn add(&self, room: &Room) -> AppResult<()>;

    /// All rooms ordered by name
    async fn find(&self) -> AppResult<Vec<Room>>;

    /// Rooms with no live reservation overlapping `range`
    async fn find_available(&self, range: DateRange) -> AppResult<Vec<Room>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Room>;

    /// `Ok(false)` covers both a booked room and an unknown id.
    async fn check_if_available_by_id(&self, id: Uuid, range: DateRange) -> AppResult<bool>;

    /// Persist `name`; an unknown id is a no-op.
    async fn update(&self, room: &Room) -> AppResult<()>;
}

#[derive(Debug, FromQueryResult)]
struct RoomRow {
    id: Uuid,
    name: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created: row.created,
            updated: row.updated,
        }
    }
}

fn decode_rooms(rows: Vec<QueryResult>) -> Result<Vec<Room>, sea_orm::DbErr> {
    rows.iter()
        .map(|row| RoomRow::from_query_result(row, "").map(Room::from))
        .collect()
}

/// Concrete implementation of RoomRepository
pub struct RoomStore {
    client: Arc<dyn SqlClient>,
}

impl RoomStore {
    pub fn new(client: Arc<dyn SqlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoomRepository for RoomStore {
    async fn ensure_schema(&self) -> AppResult<String> {
        let row = self
            .client
            .query_row(CHECK_IF_ROOMS_TABLE_EXIST, vec![])
            .await
            .map_err(|e| {
                AppError::storage("CHECK_IF_ROOMS_TABLE_EXIST", "Failed to check rooms table", e)
            })?;

        let table_name: Option<String> = match row {
            Some(row) => row.try_get("", "table_name").map_err(|e| {
                AppError::storage("CHECK_IF_ROOMS_TABLE_EXIST", "Failed to check rooms table", e)
            })?,
            None => None,
        };

        if table_name.is_some() {
            return Ok("Table rooms ready to go".to_string());
        }

        self.client
            .exec(CREATE_ROOMS_TABLE, vec![])
            .await
            .map_err(|e| AppError::storage("CREATE_ROOMS_TABLE", "Failed to create rooms table", e))?;

        Ok("Table rooms created, DB ready to go".to_string())
    }

    async fn add(&self, room: &Room) -> AppResult<()> {
        let values = vec![
            Value::from(room.id),
            Value::from(room.name.clone()),
            Value::from(room.created),
            Value::from(room.updated),
        ];

        self.client
            .exec(ROOM_CREATE, values)
            .await
            .map_err(|e| AppError::storage("ROOM_CREATE", "Failed to create room", e))?;

        tracing::debug!(room_id = %room.id, "room created");
        Ok(())
    }

    async fn find(&self) -> AppResult<Vec<Room>> {
        let rows = self
            .client
            .query(ROOMS_FIND, vec![])
            .await
            .map_err(|e| AppError::storage("ROOMS_FIND", "Failed to find rooms", e))?;

        decode_rooms(rows).map_err(|e| AppError::storage("ROOMS_FIND", "Failed to scan rooms", e))
    }

    async fn find_available(&self, range: DateRange) -> AppResult<Vec<Room>> {
        let values = vec![Value::from(range.start_at()), Value::from(range.end_at())];

        let rows = self
            .client
            .query(ROOMS_FIND_AVAILABLE, values)
            .await
            .map_err(|e| {
                AppError::storage("ROOMS_FIND_AVAILABLE", "Failed to find available rooms", e)
            })?;

        decode_rooms(rows).map_err(|e| {
            AppError::storage("ROOMS_FIND_AVAILABLE", "Failed to scan available rooms", e)
        })
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Room> {
        let row = self
            .client
            .query_row(ROOM_GET_BY_ID, vec![Value::from(id)])
            .await
            .map_err(|e| AppError::storage("ROOM_GET_BY_ID", "Failed to get room", e))?;

        let row = row.ok_or_not_found("room not found")?;

        RoomRow::from_query_result(&row, "")
            .map(Room::from)
            .map_err(|e| AppError::storage("ROOM_GET_BY_ID", "Failed to get room", e))
    }

    async fn check_if_available_by_id(&self, id: Uuid, range: DateRange) -> AppResult<bool> {
        let values = vec![
            Value::from(id),
            Value::from(range.start_at()),
            Value::from(range.end_at()),
        ];

        let row = self
            .client
            .query_row(ROOM_CHECK_IF_AVAILABLE_BY_ID, values)
            .await
            .map_err(|e| {
                AppError::storage(
                    "ROOM_CHECK_IF_AVAILABLE_BY_ID",
                    "Failed to check if room is available",
                    e,
                )
            })?;

        Ok(row.is_some())
    }

    async fn update(&self, room: &Room) -> AppResult<()> {
        let values = vec![
            Value::from(room.name.clone()),
            Value::from(room.updated),
            Value::from(room.id),
        ];

        let affected = self
            .client
            .exec(ROOM_UPDATE, values)
            .await
            .map_err(|e| AppError::storage("ROOM_UPDATE", "Failed to update room", e))?;

        if affected == 0 {
            tracing::debug!(room_id = %room.id, "room update matched no rows");
        }
        Ok(())
    }
}
