//! Test doubles for the language model and the database service.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use dbuddy::database::{ColumnInfo, DatabaseService, ResultSet};
use dbuddy::error::{DatabaseError, LlmError};
use dbuddy::llm_client::LlmClient;

/// Scripted LLM: hands out queued completions in order and counts calls.
pub struct MockLlm {
    responses: Mutex<VecDeque<Result<String, String>>>,
    pub calls: AtomicUsize,
}

impl MockLlm {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(LlmError::Transport(message)),
            None => Err(LlmError::Transport("mock exhausted".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// In-memory database double with per-operation call counters.
pub struct MockDb {
    pub tables: Vec<String>,
    pub columns: HashMap<String, Vec<ColumnInfo>>,
    pub rows: Result<ResultSet, String>,
    /// When set, table listing fails as if the database were unreachable.
    pub list_error: Option<String>,
    pub list_tables_calls: AtomicUsize,
    pub describe_calls: AtomicUsize,
    pub execute_calls: AtomicUsize,
}

impl MockDb {
    pub fn new(
        tables: Vec<&str>,
        columns: HashMap<String, Vec<ColumnInfo>>,
        rows: Result<ResultSet, String>,
    ) -> Self {
        Self {
            tables: tables.into_iter().map(String::from).collect(),
            columns,
            rows,
            list_error: None,
            list_tables_calls: AtomicUsize::new(0),
            describe_calls: AtomicUsize::new(0),
            execute_calls: AtomicUsize::new(0),
        }
    }

    pub fn execute_count(&self) -> usize {
        self.execute_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseService for MockDb {
    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError> {
        self.list_tables_calls.fetch_add(1, Ordering::SeqCst);
        match &self.list_error {
            Some(message) => Err(DatabaseError::Unavailable(message.clone())),
            None => Ok(self.tables.clone()),
        }
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<ColumnInfo>, DatabaseError> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.columns.get(table).cloned().unwrap_or_default())
    }

    async fn execute(&self, _sql: &str) -> Result<ResultSet, DatabaseError> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        match &self.rows {
            Ok(rows) => Ok(rows.clone()),
            Err(message) => Err(DatabaseError::Query(message.clone())),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

fn column(field: &str, column_type: &str, primary_key: bool, nullable: bool) -> ColumnInfo {
    ColumnInfo {
        field: field.to_string(),
        column_type: column_type.to_string(),
        nullable,
        primary_key,
    }
}

/// A database with one `orders` table, the fixture most scenarios use.
pub fn orders_db(rows: Result<ResultSet, String>) -> MockDb {
    let mut columns = HashMap::new();
    columns.insert(
        "orders".to_string(),
        vec![
            column("id", "INT", true, false),
            column("total", "DECIMAL", false, true),
            column("created_at", "DATETIME", false, true),
        ],
    );
    MockDb::new(vec!["orders"], columns, rows)
}

/// A database whose introspection fails as unreachable.
pub fn unreachable_db(message: &str) -> MockDb {
    let mut db = orders_db(Ok(vec![]));
    db.list_error = Some(message.to_string());
    db
}

/// A single-row result set: `[{"COUNT(*)": 5}]`.
pub fn count_rows() -> ResultSet {
    let mut row = dbuddy::database::ResultRow::new();
    row.insert("COUNT(*)".to_string(), serde_json::Value::from(5));
    vec![row]
}
