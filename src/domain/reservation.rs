//! Reservation domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{next_update, now, DateRange};

/// Reservation lifecycle status, stored and exchanged as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ReservationStatus {
    #[default]
    Available = 0,
    Blocked = 1,
    BookRequest = 2,
    Reservation = 3,
    Rent = 4,
}

impl TryFrom<i32> for ReservationStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ReservationStatus::Available),
            1 => Ok(ReservationStatus::Blocked),
            2 => Ok(ReservationStatus::BookRequest),
            3 => Ok(ReservationStatus::Reservation),
            4 => Ok(ReservationStatus::Rent),
            other => Err(format!("unknown reservation status {}", other)),
        }
    }
}

impl From<ReservationStatus> for i32 {
    fn from(status: ReservationStatus) -> Self {
        status as i32
    }
}

/// Soft delete state. Rows are never removed, only marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum RecordState {
    #[default]
    Active,
    Deleted,
}

impl From<bool> for RecordState {
    fn from(deleted: bool) -> Self {
        if deleted {
            RecordState::Deleted
        } else {
            RecordState::Active
        }
    }
}

impl From<RecordState> for bool {
    fn from(state: RecordState) -> Self {
        matches!(state, RecordState::Deleted)
    }
}

/// Reservation domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    /// External user reference (not enforced)
    pub user_id: Uuid,
    pub room_id: Uuid,
    #[schema(value_type = i32, example = 3)]
    pub status: ReservationStatus,
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-01-05")]
    pub end_date: NaiveDate,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(rename = "deleted")]
    #[schema(value_type = bool)]
    pub state: RecordState,
}

impl Reservation {
    /// Create an active reservation with a fresh id
    pub fn new(user_id: Uuid, room_id: Uuid, status: ReservationStatus, range: DateRange) -> Self {
        let created = now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            room_id,
            status,
            start_date: range.start(),
            end_date: range.end(),
            created,
            updated: created,
            state: RecordState::Active,
        }
    }

    /// Move the reservation to another range, room or status.
    ///
    /// Only these fields change; `created` and `user_id` are kept.
    pub fn reschedule(&mut self, range: DateRange, room_id: Uuid, status: ReservationStatus) {
        self.start_date = range.start();
        self.end_date = range.end();
        self.room_id = room_id;
        self.status = status;
        self.updated = next_update(self.updated);
    }

    pub fn is_deleted(&self) -> bool {
        self.state == RecordState::Deleted
    }
}
