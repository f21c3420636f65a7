mod connection;
#[cfg(feature = "mock")]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
mod mock;
mod statement;

pub use connection::*;
#[cfg(feature = "mock")]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub use mock::*;
pub use statement::*;

use sea_query::{MysqlQueryBuilder, PostgresQueryBuilder, QueryBuilder, SqliteQueryBuilder};

/// The type of database backend for real world databases.
/// This is enabled by feature flags as specified in the crate documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseBackend {
    /// A MySQL backend
    MySql,
    /// A PostgreSQL backend
    Postgres,
    /// A SQLite backend
    Sqlite,
}

/// The same as [DatabaseBackend] just shorter :)
pub type DbBackend = DatabaseBackend;

impl DatabaseBackend {
    /// Build an SQL [Statement]
    pub fn build<S>(&self, statement: &S) -> Statement
    where
        S: StatementBuilder,
    {
        statement.build(self)
    }

    /// A helper for building SQL queries
    pub fn get_query_builder(&self) -> Box<dyn QueryBuilder> {
        match self {
            Self::MySql => Box::new(MysqlQueryBuilder),
            Self::Postgres => Box::new(PostgresQueryBuilder),
            Self::Sqlite => Box::new(SqliteQueryBuilder),
        }
    }

    /// Get the display string for this enum
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseBackend::MySql => "MySql",
            DatabaseBackend::Postgres => "Postgres",
            DatabaseBackend::Sqlite => "Sqlite",
        }
    }
}

/// Defines the configuration options of an [crate::EntityManager]
#[derive(Debug, Clone)]
pub struct MapperOptions {
    /// Enable statement logging
    pub(crate) sql_logging: bool,
    /// Statement logging level (ignored if `sql_logging` is false)
    pub(crate) sql_logging_level: log::LevelFilter,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            sql_logging: true,
            sql_logging_level: log::LevelFilter::Info,
        }
    }
}

impl MapperOptions {
    /// Create new [MapperOptions] with statement logging enabled at `Info`
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable statement logging (default true)
    pub fn sql_logging(&mut self, value: bool) -> &mut Self {
        self.sql_logging = value;
        self
    }

    /// Get whether statement logging is enabled
    pub fn get_sql_logging(&self) -> bool {
        self.sql_logging
    }

    /// Set statement logging level (default INFO).
    /// (ignored if `sql_logging` is `false`)
    pub fn sql_logging_level(&mut self, level: log::LevelFilter) -> &mut Self {
        self.sql_logging_level = level;
        self
    }

    /// Get the level of statement logging
    pub fn get_sql_logging_level(&self) -> log::LevelFilter {
        self.sql_logging_level
    }

    pub(crate) fn log_statement(&self, stmt: &Statement) {
        if !self.sql_logging {
            return;
        }
        if let Some(level) = self.sql_logging_level.to_level() {
            log::log!(target: "sea_mapper::statement", level, "{stmt}");
        }
    }
}
