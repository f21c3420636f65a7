use std::sync::{Mutex, MutexGuard};
use tracing::instrument;

pub use sea_query_rusqlite::rusqlite::{Connection as RusqliteConnection, Error as RusqliteError};
use sea_query_rusqlite::rusqlite::types::Value as SqliteValue;
use sea_query_rusqlite::{RusqliteValue, RusqliteValues};

use crate::{
    ConnectionTrait, DbBackend, ExecResult, MapperErr, QueryResult, Statement, debug_print,
};
use sea_query::Value;

/// A blocking SQLite connection
#[derive(Debug)]
pub struct RusqliteSharedConnection {
    conn: Mutex<RusqliteConnection>,
}

impl From<RusqliteConnection> for RusqliteSharedConnection {
    fn from(conn: RusqliteConnection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl RusqliteSharedConnection {
    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, MapperErr> {
        RusqliteConnection::open_in_memory()
            .map(Self::from)
            .map_err(conn_err)
    }

    /// Execute an unprepared SQL batch, such as a schema script
    #[instrument(level = "trace")]
    pub fn execute_unprepared(&self, sql: &str) -> Result<ExecResult, MapperErr> {
        debug_print!("{}", sql);

        let conn = self.acquire()?;
        match conn.execute_batch(sql) {
            Ok(()) => Ok(ExecResult {
                last_insert_id: last_insert_id(&conn)?,
                rows_affected: conn.changes(),
            }),
            Err(err) => Err(exec_err(err)),
        }
    }

    fn acquire(&self) -> Result<MutexGuard<'_, RusqliteConnection>, MapperErr> {
        self.conn
            .lock()
            .map_err(|err| MapperErr::Conn(format!("connection poisoned: {err}")))
    }
}

impl ConnectionTrait for RusqliteSharedConnection {
    fn get_database_backend(&self) -> DbBackend {
        DbBackend::Sqlite
    }

    #[instrument(level = "trace")]
    fn execute_raw(&self, stmt: Statement) -> Result<ExecResult, MapperErr> {
        debug_print!("{}", stmt);

        let values = sql_values(&stmt);
        let conn = self.acquire()?;
        match conn.execute(&stmt.sql, &*values.as_params()) {
            Ok(rows_affected) => Ok(ExecResult {
                last_insert_id: last_insert_id(&conn)?,
                rows_affected: rows_affected as u64,
            }),
            Err(err) => Err(exec_err(err)),
        }
    }

    #[instrument(level = "trace")]
    fn query_all_raw(&self, stmt: Statement) -> Result<Vec<QueryResult>, MapperErr> {
        debug_print!("{}", stmt);

        let values = sql_values(&stmt);
        let conn = self.acquire()?;
        let mut sql = conn.prepare_cached(&stmt.sql).map_err(query_err)?;
        let columns: Vec<String> = sql
            .column_names()
            .into_iter()
            .map(|name| name.to_owned())
            .collect();

        let mut rows = sql.query(&*values.as_params()).map_err(query_err)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(query_err)? {
            let mut fields = Vec::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                let value: SqliteValue = row.get(i).map_err(query_err)?;
                fields.push((column.clone(), from_sqlite_value(value)));
            }
            out.push(QueryResult::from_iter(fields));
        }
        Ok(out)
    }
}

fn from_sqlite_value(value: SqliteValue) -> Value {
    match value {
        SqliteValue::Null => Value::BigInt(None),
        SqliteValue::Integer(i) => i.into(),
        SqliteValue::Real(f) => f.into(),
        SqliteValue::Text(s) => s.into(),
        SqliteValue::Blob(b) => b.into(),
    }
}

fn last_insert_id(conn: &RusqliteConnection) -> Result<u64, MapperErr> {
    let rowid = conn.last_insert_rowid();
    u64::try_from(rowid).map_err(|err| MapperErr::Type(format!("last_insert_rowid {rowid}: {err}")))
}

fn sql_values(stmt: &Statement) -> RusqliteValues {
    let values = match &stmt.values {
        Some(values) => values.0.iter().cloned().map(RusqliteValue).collect(),
        None => Vec::new(),
    };
    RusqliteValues(values)
}

fn conn_err(err: RusqliteError) -> MapperErr {
    MapperErr::Conn(err.to_string())
}

fn exec_err(err: RusqliteError) -> MapperErr {
    MapperErr::Exec(err.to_string())
}

fn query_err(err: RusqliteError) -> MapperErr {
    MapperErr::Query(err.to_string())
}
