use crate::{
    ConnectionTrait, DbBackend, ExecResult, MapperErr, QueryResult, Statement, debug_print,
};
use sea_query::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::instrument;

/// Scripted database used for testing: every query and execution pops the next
/// prepared result, and every statement is recorded in a transaction log.
#[derive(Debug)]
pub struct MockDatabase {
    db_backend: DbBackend,
    transaction_log: Vec<Statement>,
    exec_results: Vec<Result<MockExecResult, MapperErr>>,
    query_results: Vec<Result<Vec<MockRow>, MapperErr>>,
}

/// The outcome of a mocked execution
#[derive(Clone, Debug, Default)]
pub struct MockExecResult {
    /// The last inserted id on auto-increment
    pub last_insert_id: u64,
    /// The number of rows affected by the database operation
    pub rows_affected: u64,
}

/// A row of mocked query results, keyed by column label
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MockRow {
    values: BTreeMap<String, Value>,
}

/// Anything that can be turned into a [MockRow]
pub trait IntoMockRow {
    /// Convert into a [MockRow]
    fn into_mock_row(self) -> MockRow;
}

/// A connection over a [MockDatabase]
#[derive(Debug)]
pub struct MockDatabaseConnection {
    db_backend: DbBackend,
    mocker: Mutex<MockState>,
}

#[derive(Debug)]
struct MockState {
    database: MockDatabase,
    exec_counter: usize,
    query_counter: usize,
}

impl MockDatabase {
    /// Instantiate a mock database with a [DbBackend] to simulate real
    /// world SQL databases
    pub fn new(db_backend: DbBackend) -> Self {
        Self {
            db_backend,
            transaction_log: Vec::new(),
            exec_results: Vec::new(),
            query_results: Vec::new(),
        }
    }

    /// Create a connection to the [MockDatabase]
    pub fn into_connection(self) -> MockDatabaseConnection {
        MockDatabaseConnection {
            db_backend: self.db_backend,
            mocker: Mutex::new(MockState {
                database: self,
                exec_counter: 0,
                query_counter: 0,
            }),
        }
    }

    /// Add some [MockExecResult]s to `exec_results`
    pub fn append_exec_results<I>(mut self, vec: I) -> Self
    where
        I: IntoIterator<Item = MockExecResult>,
    {
        self.exec_results.extend(vec.into_iter().map(Ok));
        self
    }

    /// Add some values to `query_results`, one inner collection per query
    pub fn append_query_results<T, I, II>(mut self, vec: II) -> Self
    where
        T: IntoMockRow,
        I: IntoIterator<Item = T>,
        II: IntoIterator<Item = I>,
    {
        for row in vec.into_iter() {
            let row = row.into_iter().map(|vec| vec.into_mock_row()).collect();
            self.query_results.push(Ok(row));
        }
        self
    }

    /// Add some [MapperErr]s to `exec_results`
    pub fn append_exec_errors<I>(mut self, vec: I) -> Self
    where
        I: IntoIterator<Item = MapperErr>,
    {
        self.exec_results.extend(vec.into_iter().map(Err));
        self
    }

    /// Add some [MapperErr]s to `query_results`
    pub fn append_query_errors<I>(mut self, vec: I) -> Self
    where
        I: IntoIterator<Item = MapperErr>,
    {
        self.query_results.extend(vec.into_iter().map(Err));
        self
    }
}

impl MockState {
    fn execute(&mut self, statement: Statement) -> Result<ExecResult, MapperErr> {
        self.database.transaction_log.push(statement);
        let counter = self.exec_counter;
        self.exec_counter += 1;
        match self.database.exec_results.get_mut(counter) {
            Some(result) => {
                let result = std::mem::replace(result, Ok(MockExecResult::default()));
                result.map(|res| ExecResult {
                    last_insert_id: res.last_insert_id,
                    rows_affected: res.rows_affected,
                })
            }
            None => Err(MapperErr::Exec(
                "`exec_results` buffer is empty".to_owned(),
            )),
        }
    }

    fn query(&mut self, statement: Statement) -> Result<Vec<QueryResult>, MapperErr> {
        self.database.transaction_log.push(statement);
        let counter = self.query_counter;
        self.query_counter += 1;
        match self.database.query_results.get_mut(counter) {
            Some(result) => {
                let result = std::mem::replace(result, Ok(Vec::new()));
                result.map(|rows| rows.into_iter().map(QueryResult::from).collect())
            }
            None => Err(MapperErr::Query(
                "`query_results` buffer is empty".to_owned(),
            )),
        }
    }
}

impl MockDatabaseConnection {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MockState>, MapperErr> {
        self.mocker
            .lock()
            .map_err(|err| MapperErr::Conn(format!("mock database poisoned: {err}")))
    }

    /// A snapshot of every statement issued so far
    pub fn transaction_log(&self) -> Result<Vec<Statement>, MapperErr> {
        Ok(self.lock()?.database.transaction_log.clone())
    }

    /// Consume the connection and return its transaction log
    pub fn into_transaction_log(self) -> Vec<Statement> {
        let state = self
            .mocker
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state.database.transaction_log
    }
}

impl ConnectionTrait for MockDatabaseConnection {
    fn get_database_backend(&self) -> DbBackend {
        self.db_backend
    }

    #[instrument(level = "trace")]
    fn execute_raw(&self, stmt: Statement) -> Result<ExecResult, MapperErr> {
        debug_print!("{}", stmt);
        self.lock()?.execute(stmt)
    }

    #[instrument(level = "trace")]
    fn query_all_raw(&self, stmt: Statement) -> Result<Vec<QueryResult>, MapperErr> {
        debug_print!("{}", stmt);
        self.lock()?.query(stmt)
    }

    fn is_mock_connection(&self) -> bool {
        true
    }
}

impl MockRow {
    /// Get a value by its column label
    pub fn get(&self, col: &str) -> Option<&Value> {
        self.values.get(col)
    }

    /// An iterator over the label-value pairs of the row
    pub fn into_column_value_tuples(self) -> impl Iterator<Item = (String, Value)> {
        self.values.into_iter()
    }
}

impl IntoMockRow for MockRow {
    fn into_mock_row(self) -> MockRow {
        self
    }
}

impl IntoMockRow for BTreeMap<&str, Value> {
    fn into_mock_row(self) -> MockRow {
        MockRow {
            values: self.into_iter().map(|(k, v)| (k.to_owned(), v)).collect(),
        }
    }
}

impl IntoMockRow for BTreeMap<String, Value> {
    fn into_mock_row(self) -> MockRow {
        MockRow { values: self }
    }
}

impl From<MockRow> for QueryResult {
    fn from(row: MockRow) -> QueryResult {
        QueryResult::from_iter(row.into_column_value_tuples())
    }
}
