//! Reservation repository over raw SQL with soft delete.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DbErr, FromQueryResult, QueryResult, Value};
use uuid::Uuid;

use crate::domain::{date_range::midnight_utc, RecordState, Reservation, ReservationStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::db::SqlClient;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub const CHECK_IF_RESERVATIONS_TABLE_EXIST: &str =
    "SELECT to_regclass('public.reservations')::text AS table_name";
pub const CREATE_RESERVATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS public.reservations (
    id uuid NOT NULL,
    user_id uuid NOT NULL,
    start_date timestamptz NOT NULL,
    end_date timestamptz NOT NULL,
    room_id uuid NOT NULL,
    status INT NOT NULL DEFAULT 0,
    created timestamptz NOT NULL DEFAULT now(),
    updated timestamptz NOT NULL DEFAULT now(),
    deleted BOOLEAN NOT NULL DEFAULT FALSE,
    CONSTRAINT reservations_pkey PRIMARY KEY (id)
)";

pub const RESERVATION_CREATE: &str = "INSERT INTO reservations \
    (id, user_id, start_date, end_date, room_id, status, created, updated, deleted) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)";
pub const RESERVATION_DELETE: &str =
    "UPDATE reservations SET deleted = TRUE, updated = $1 WHERE id = $2";
pub const RESERVATION_FIND: &str = "SELECT id, user_id, start_date, end_date, room_id, status, \
    created, updated, deleted FROM reservations WHERE deleted = false ORDER BY updated DESC";
pub const RESERVATION_FIND_BY_ROOM_ID: &str = "SELECT id, user_id, start_date, end_date, room_id, \
    status, created, updated, deleted FROM reservations WHERE deleted = false AND room_id = $1 \
    ORDER BY updated DESC";
pub const RESERVATION_GET_BY_ID: &str = "SELECT id, user_id, start_date, end_date, room_id, \
    status, created, updated, deleted FROM reservations WHERE deleted = false AND id = $1";
pub const RESERVATION_UPDATE: &str = "UPDATE reservations SET start_date = $1, end_date = $2, \
    room_id = $3, status = $4, updated = $5 WHERE id = $6";

/// Reservation repository trait for dependency injection.
///
/// Every read excludes soft-deleted rows.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Create the `reservations` table unless it exists; returns a status line.
    async fn ensure_schema(&self) -> AppResult<String>;

    /// Insert as-is. Overlaps are not checked.
    async fn add(&self, reservation: &Reservation) -> AppResult<()>;

    /// Soft delete; repeating it only refreshes `updated`.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Live reservations, most recently updated first
    async fn find(&self) -> AppResult<Vec<Reservation>>;

    async fn find_by_room_id(&self, room_id: Uuid) -> AppResult<Vec<Reservation>>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Reservation>;

    /// Persist dates, room and status, stamping `updated` with now.
    async fn update(&self, reservation: &Reservation) -> AppResult<()>;
}

#[derive(Debug, FromQueryResult)]
struct ReservationRow {
    id: Uuid,
    user_id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    room_id: Uuid,
    status: i32,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    deleted: bool,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = DbErr;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            status: ReservationStatus::try_from(row.status).map_err(DbErr::Type)?,
            start_date: row.start_date.date_naive(),
            end_date: row.end_date.date_naive(),
            created: row.created,
            updated: row.updated,
            state: RecordState::from(row.deleted),
        })
    }
}

fn decode(row: &QueryResult) -> Result<Reservation, DbErr> {
    ReservationRow::from_query_result(row, "").and_then(Reservation::try_from)
}

fn decode_all(rows: Vec<QueryResult>) -> Result<Vec<Reservation>, DbErr> {
    rows.iter().map(decode).collect()
}

/// Concrete implementation of ReservationRepository
pub struct ReservationStore {
    client: Arc<dyn SqlClient>,
}

impl ReservationStore {
    pub fn new(client: Arc<dyn SqlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReservationRepository for ReservationStore {
    async fn ensure_schema(&self) -> AppResult<String> {
        let check_failed = |e: DbErr| {
            AppError::storage(
                "CHECK_IF_RESERVATIONS_TABLE_EXIST",
                "Failed to check reservations table",
                e,
            )
        };

        let table_name: Option<String> = match self
            .client
            .query_row(CHECK_IF_RESERVATIONS_TABLE_EXIST, vec![])
            .await
            .map_err(check_failed)?
        {
            Some(row) => row.try_get("", "table_name").map_err(check_failed)?,
            None => None,
        };

        if table_name.is_some() {
            return Ok("Table reservations ready to go".to_string());
        }

        self.client
            .exec(CREATE_RESERVATIONS_TABLE, vec![])
            .await
            .map_err(|e| {
                AppError::storage(
                    "CREATE_RESERVATIONS_TABLE",
                    "Failed to create reservations table",
                    e,
                )
            })?;

        Ok("Table reservations created, DB ready to go".to_string())
    }

    async fn add(&self, reservation: &Reservation) -> AppResult<()> {
        let values = vec![
            Value::from(reservation.id),
            Value::from(reservation.user_id),
            Value::from(midnight_utc(reservation.start_date)),
            Value::from(midnight_utc(reservation.end_date)),
            Value::from(reservation.room_id),
            Value::from(i32::from(reservation.status)),
            Value::from(reservation.created),
            Value::from(reservation.updated),
            Value::from(bool::from(reservation.state)),
        ];

        self.client
            .exec(RESERVATION_CREATE, values)
            .await
            .map_err(|e| AppError::storage("RESERVATION_CREATE", "Failed to create reservation", e))?;

        tracing::debug!(reservation_id = %reservation.id, room_id = %reservation.room_id, "reservation created");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let values = vec![Value::from(Utc::now()), Value::from(id)];

        self.client
            .exec(RESERVATION_DELETE, values)
            .await
            .map_err(|e| AppError::storage("RESERVATION_DELETE", "Failed to delete reservation", e))?;

        tracing::debug!(reservation_id = %id, "reservation soft deleted");
        Ok(())
    }

    async fn find(&self) -> AppResult<Vec<Reservation>> {
        let rows = self
            .client
            .query(RESERVATION_FIND, vec![])
            .await
            .map_err(|e| AppError::storage("RESERVATION_FIND", "Failed to find reservations", e))?;

        decode_all(rows)
            .map_err(|e| AppError::storage("RESERVATION_FIND", "Failed to scan reservations", e))
    }

    async fn find_by_room_id(&self, room_id: Uuid) -> AppResult<Vec<Reservation>> {
        let rows = self
            .client
            .query(RESERVATION_FIND_BY_ROOM_ID, vec![Value::from(room_id)])
            .await
            .map_err(|e| {
                AppError::storage("RESERVATION_FIND_BY_ROOM_ID", "Failed to find reservations", e)
            })?;

        decode_all(rows).map_err(|e| {
            AppError::storage("RESERVATION_FIND_BY_ROOM_ID", "Failed to scan reservations", e)
        })
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Reservation> {
        let row = self
            .client
            .query_row(RESERVATION_GET_BY_ID, vec![Value::from(id)])
            .await
            .map_err(|e| AppError::storage("RESERVATION_GET_BY_ID", "Failed to get reservation", e))?;

        let row = row.ok_or_not_found("Reservation not found")?;

        decode(&row)
            .map_err(|e| AppError::storage("RESERVATION_GET_BY_ID", "Failed to get reservation", e))
    }

    async fn update(&self, reservation: &Reservation) -> AppResult<()> {
        let values = vec![
            Value::from(midnight_utc(reservation.start_date)),
            Value::from(midnight_utc(reservation.end_date)),
            Value::from(reservation.room_id),
            Value::from(i32::from(reservation.status)),
            Value::from(reservation.updated),
            Value::from(reservation.id),
        ];

        self.client
            .exec(RESERVATION_UPDATE, values)
            .await
            .map_err(|e| AppError::storage("RESERVATION_UPDATE", "Failed to update reservation", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateRange;
    use crate::infra::db::{row, Mock, MockRow, MockSqlClient};

    fn reservation(start: &str, end: &str) -> Reservation {
        Reservation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            ReservationStatus::Reservation,
            DateRange::parse(start, end).unwrap(),
        )
    }

    fn reservation_row(r: &Reservation, status: i32) -> MockRow {
        row([
            ("id", Value::from(r.id)),
            ("user_id", Value::from(r.user_id)),
            ("start_date", Value::from(midnight_utc(r.start_date))),
            ("end_date", Value::from(midnight_utc(r.end_date))),
            ("room_id", Value::from(r.room_id)),
            ("status", Value::from(status)),
            ("created", Value::from(r.created)),
            ("updated", Value::from(r.updated)),
            ("deleted", Value::from(false)),
        ])
    }

    fn store(client: &Arc<MockSqlClient>) -> ReservationStore {
        ReservationStore::new(client.clone())
    }

    #[tokio::test]
    async fn ensure_schema_reports_existing_table() {
        let client = Arc::new(MockSqlClient::new());
        client.add_mock(
            Mock::new(CHECK_IF_RESERVATIONS_TABLE_EXIST)
                .with_row(row([("table_name", Value::from("reservations"))])),
        );

        let status = store(&client).ensure_schema().await.unwrap();

        assert_eq!(status, "Table reservations ready to go");
    }

    #[tokio::test]
    async fn ensure_schema_creates_missing_table() {
        let client = Arc::new(MockSqlClient::new());
        client.add_mock(
            Mock::new(CHECK_IF_RESERVATIONS_TABLE_EXIST)
                .with_row(row([("table_name", Value::String(None))])),
        );

        let status = store(&client).ensure_schema().await.unwrap();

        assert_eq!(status, "Table reservations created, DB ready to go");
        assert_eq!(client.calls().last().unwrap().sql, CREATE_RESERVATIONS_TABLE);
    }

    #[tokio::test]
    async fn ensure_schema_check_failure_is_error() {
        let client = Arc::new(MockSqlClient::new());
        client.add_mock(Mock::new(CHECK_IF_RESERVATIONS_TABLE_EXIST).failing("no route to host"));

        let err = store(&client).ensure_schema().await.unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn add_stores_dates_at_midnight_and_flag_false() {
        let client = Arc::new(MockSqlClient::new());
        let r = reservation("2024-01-01", "2024-01-05");

        store(&client).add(&r).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls[0].sql, RESERVATION_CREATE);
        let values = &calls[0].values;
        assert_eq!(values.len(), 9);
        assert_eq!(values[2], Value::from(midnight_utc(r.start_date)));
        assert_eq!(values[3], Value::from(midnight_utc(r.end_date)));
        assert_eq!(values[5], Value::from(3i32));
        assert_eq!(values[8], Value::from(false));
    }

    #[tokio::test]
    async fn delete_binds_timestamp_then_id() {
        let client = Arc::new(MockSqlClient::new());
        let id = Uuid::new_v4();
        let before = Utc::now();

        store(&client).delete(id).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls[0].sql, RESERVATION_DELETE);
        assert_eq!(calls[0].values[1], Value::from(id));
        let stamped: DateTime<Utc> = calls[0].values[0].clone().unwrap();
        assert!(stamped >= before);
    }

    #[tokio::test]
    async fn delete_failure_is_storage_error() {
        let client = Arc::new(MockSqlClient::new());
        client.add_mock(Mock::new(RESERVATION_DELETE).failing("deadlock"));

        let err = store(&client).delete(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::Storage(ref m) if m == "Failed to delete reservation"));
    }

    #[tokio::test]
    async fn find_decodes_rows() {
        let client = Arc::new(MockSqlClient::new());
        let a = reservation("2024-01-01", "2024-01-05");
        let b = reservation("2024-02-01", "2024-02-05");
        client.add_mock(
            Mock::new(RESERVATION_FIND).with_rows([reservation_row(&a, 3), reservation_row(&b, 3)]),
        );

        let found = store(&client).find().await.unwrap();

        assert_eq!(found, vec![a, b]);
    }

    #[tokio::test]
    async fn find_with_unknown_status_fails_to_scan() {
        let client = Arc::new(MockSqlClient::new());
        let a = reservation("2024-01-01", "2024-01-05");
        client.add_mock(Mock::new(RESERVATION_FIND).with_row(reservation_row(&a, 42)));

        let err = store(&client).find().await.unwrap_err();

        assert!(matches!(err, AppError::Storage(ref m) if m == "Failed to scan reservations"));
    }

    #[tokio::test]
    async fn find_by_room_id_binds_room() {
        let client = Arc::new(MockSqlClient::new());
        let room_id = Uuid::new_v4();
        client.add_mock(Mock::new(RESERVATION_FIND_BY_ROOM_ID));

        let found = store(&client).find_by_room_id(room_id).await.unwrap();

        assert!(found.is_empty());
        assert_eq!(client.calls()[0].values, vec![Value::from(room_id)]);
    }

    #[tokio::test]
    async fn get_by_id_missing_is_not_found() {
        let client = Arc::new(MockSqlClient::new());

        let err = store(&client).get_by_id(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == "Reservation not found"));
    }

    #[tokio::test]
    async fn get_by_id_returns_dates_as_calendar_days() {
        let client = Arc::new(MockSqlClient::new());
        let r = reservation("2024-03-10", "2024-03-12");
        client.add_mock(Mock::new(RESERVATION_GET_BY_ID).with_row(reservation_row(&r, 3)));

        let found = store(&client).get_by_id(r.id).await.unwrap();

        assert_eq!(found.start_date.to_string(), "2024-03-10");
        assert_eq!(found.end_date.to_string(), "2024-03-12");
        assert!(!found.is_deleted());
    }

    #[tokio::test]
    async fn update_binds_fixed_field_set() {
        let client = Arc::new(MockSqlClient::new());
        let mut r = reservation("2024-01-01", "2024-01-05");
        r.reschedule(
            DateRange::parse("2024-01-02", "2024-01-06").unwrap(),
            r.room_id,
            r.status,
        );
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        store(&client).update(&r).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls[0].sql, RESERVATION_UPDATE);
        let values = &calls[0].values;
        assert_eq!(values.len(), 6);
        assert_eq!(values[2], Value::from(r.room_id));
        assert_eq!(values[3], Value::from(3i32));
        assert_eq!(values[4], Value::from(r.updated));
        assert_eq!(values[5], Value::from(r.id));
    }
}
