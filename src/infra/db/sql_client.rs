//! SQL client abstraction used by the repositories.
//!
//! Repositories talk to the store only through [`SqlClient`], so tests
//! can swap in [`MockSqlClient`](super::MockSqlClient).

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, QueryResult, Statement, Value};

/// Minimal statement-level access to the store.
///
/// Every call is a single auto-committed statement.
#[async_trait]
pub trait SqlClient: Send + Sync {
    /// Run a statement that returns no rows; yields the affected row count.
    async fn exec(&self, sql: &str, values: Vec<Value>) -> Result<u64, DbErr>;

    /// Run a query and collect every row.
    async fn query(&self, sql: &str, values: Vec<Value>) -> Result<Vec<QueryResult>, DbErr>;

    /// Run a query expected to return at most one row.
    async fn query_row(&self, sql: &str, values: Vec<Value>) -> Result<Option<QueryResult>, DbErr>;
}

#[async_trait]
impl SqlClient for DatabaseConnection {
    async fn exec(&self, sql: &str, values: Vec<Value>) -> Result<u64, DbErr> {
        let stmt = Statement::from_sql_and_values(self.get_database_backend(), sql, values);
        let result = self.execute(stmt).await?;
        Ok(result.rows_affected())
    }

    async fn query(&self, sql: &str, values: Vec<Value>) -> Result<Vec<QueryResult>, DbErr> {
        let stmt = Statement::from_sql_and_values(self.get_database_backend(), sql, values);
        self.query_all(stmt).await
    }

    async fn query_row(&self, sql: &str, values: Vec<Value>) -> Result<Option<QueryResult>, DbErr> {
        let stmt = Statement::from_sql_and_values(self.get_database_backend(), sql, values);
        self.query_one(stmt).await
    }
}
