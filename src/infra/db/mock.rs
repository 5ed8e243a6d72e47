//! In-memory [`SqlClient`] for tests.
//!
//! Canned results are keyed by the literal SQL text. No SQL is parsed:
//! a query matches only if its text is byte-for-byte the registered one.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DbErr, MockDatabase, QueryResult, Statement, Value,
};

use super::SqlClient;

/// A single canned row: column name to value.
pub type MockRow = BTreeMap<String, Value>;

/// Build a [`MockRow`] from `(column, value)` pairs.
pub fn row<I, K>(columns: I) -> MockRow
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    columns.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Canned outcome for one SQL text.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    pub query: String,
    pub error: Option<String>,
    pub rows: Vec<MockRow>,
    pub rows_affected: u64,
}

impl Mock {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_row(mut self, row: MockRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = MockRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

/// Statement recorded by [`MockSqlClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub sql: String,
    pub values: Vec<Value>,
}

/// Fake SQL client keyed by exact query text.
///
/// Unregistered `query` calls fail with "mock not found", unregistered
/// `query_row` calls return no row, and unregistered `exec` calls succeed
/// with zero affected rows.
#[derive(Debug, Default)]
pub struct MockSqlClient {
    mocks: Mutex<HashMap<String, Mock>>,
    calls: Mutex<Vec<Call>>,
}

impl MockSqlClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the canned outcome for `mock.query`.
    pub fn add_mock(&self, mock: Mock) {
        self.mocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(mock.query.clone(), mock);
    }

    /// Every statement issued so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, sql: &str, values: Vec<Value>) -> Option<Mock> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Call {
                sql: sql.to_string(),
                values,
            });

        self.mocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(sql)
            .cloned()
    }
}

/// Turn canned rows into real `QueryResult`s via sea-orm's mock backend.
async fn materialize(rows: Vec<MockRow>) -> Result<Vec<QueryResult>, DbErr> {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([rows])
        .into_connection();

    conn.query_all(Statement::from_string(DatabaseBackend::Postgres, "SELECT"))
        .await
}

#[async_trait]
impl SqlClient for MockSqlClient {
    async fn exec(&self, sql: &str, values: Vec<Value>) -> Result<u64, DbErr> {
        match self.record(sql, values) {
            Some(Mock {
                error: Some(message),
                ..
            }) => Err(DbErr::Custom(message)),
            Some(mock) => Ok(mock.rows_affected),
            None => Ok(0),
        }
    }

    async fn query(&self, sql: &str, values: Vec<Value>) -> Result<Vec<QueryResult>, DbErr> {
        let mock = self
            .record(sql, values)
            .ok_or_else(|| DbErr::Custom("mock not found".to_string()))?;

        if let Some(message) = mock.error {
            return Err(DbErr::Custom(message));
        }
        materialize(mock.rows).await
    }

    async fn query_row(&self, sql: &str, values: Vec<Value>) -> Result<Option<QueryResult>, DbErr> {
        let Some(mock) = self.record(sql, values) else {
            return Ok(None);
        };

        if let Some(message) = mock.error {
            return Err(DbErr::Custom(message));
        }
        Ok(materialize(mock.rows).await?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn query_matches_exact_text_only() {
        let client = MockSqlClient::new();
        client.add_mock(
            Mock::new("SELECT name FROM rooms").with_row(row([("name", Value::from("Suite 1"))])),
        );

        let rows = client.query("SELECT name FROM rooms", vec![]).await.unwrap();
        assert_eq!(rows.len(), 1);
        let name: String = rows[0].try_get("", "name").unwrap();
        assert_eq!(name, "Suite 1");

        let miss = client.query("select name from rooms", vec![]).await;
        assert!(matches!(miss, Err(DbErr::Custom(ref m)) if m == "mock not found"));
    }

    #[tokio::test]
    async fn query_row_without_mock_returns_none() {
        let client = MockSqlClient::new();

        let row = client.query_row("SELECT 1", vec![]).await.unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn failing_mock_surfaces_error() {
        let client = MockSqlClient::new();
        client.add_mock(Mock::new("UPDATE rooms SET name = $1").failing("connection reset"));

        let err = client
            .exec("UPDATE rooms SET name = $1", vec![Value::from("x")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn exec_records_calls_and_defaults_to_zero_rows() {
        let client = MockSqlClient::new();

        let affected = client
            .exec("DELETE FROM nowhere", vec![Value::from(7i32)])
            .await
            .unwrap();

        assert_eq!(affected, 0);
        assert_eq!(
            client.calls(),
            vec![Call {
                sql: "DELETE FROM nowhere".to_string(),
                values: vec![Value::from(7i32)],
            }]
        );
    }
}
