use crate::{DbBackend, ExecResult, MapperErr, QueryResult, Statement, StatementBuilder};

/// The generic API for a database connection that can perform query or execute statements.
/// Every call is a single blocking round-trip.
pub trait ConnectionTrait {
    /// Get the database backend for the connection
    fn get_database_backend(&self) -> DbBackend;

    /// Execute a [Statement]
    fn execute_raw(&self, stmt: Statement) -> Result<ExecResult, MapperErr>;

    /// Execute a query statement
    fn execute<S: StatementBuilder>(&self, stmt: &S) -> Result<ExecResult, MapperErr> {
        let db_backend = self.get_database_backend();
        let stmt = db_backend.build(stmt);
        self.execute_raw(stmt)
    }

    /// Execute a [Statement] and return a single row of `QueryResult`
    fn query_one_raw(&self, stmt: Statement) -> Result<Option<QueryResult>, MapperErr> {
        Ok(self.query_all_raw(stmt)?.into_iter().next())
    }

    /// Execute a query statement and return a single row of `QueryResult`
    fn query_one<S: StatementBuilder>(&self, stmt: &S) -> Result<Option<QueryResult>, MapperErr> {
        let db_backend = self.get_database_backend();
        let stmt = db_backend.build(stmt);
        self.query_one_raw(stmt)
    }

    /// Execute a [Statement] and return a vector of `QueryResult`
    fn query_all_raw(&self, stmt: Statement) -> Result<Vec<QueryResult>, MapperErr>;

    /// Execute a query statement and return a vector of `QueryResult`
    fn query_all<S: StatementBuilder>(&self, stmt: &S) -> Result<Vec<QueryResult>, MapperErr> {
        let db_backend = self.get_database_backend();
        let stmt = db_backend.build(stmt);
        self.query_all_raw(stmt)
    }

    /// Check if the connection is a test connection for the Mock database
    fn is_mock_connection(&self) -> bool {
        false
    }
}

impl<C> ConnectionTrait for &C
where
    C: ConnectionTrait,
{
    fn get_database_backend(&self) -> DbBackend {
        (**self).get_database_backend()
    }

    fn execute_raw(&self, stmt: Statement) -> Result<ExecResult, MapperErr> {
        (**self).execute_raw(stmt)
    }

    fn query_one_raw(&self, stmt: Statement) -> Result<Option<QueryResult>, MapperErr> {
        (**self).query_one_raw(stmt)
    }

    fn query_all_raw(&self, stmt: Statement) -> Result<Vec<QueryResult>, MapperErr> {
        (**self).query_all_raw(stmt)
    }

    fn is_mock_connection(&self) -> bool {
        (**self).is_mock_connection()
    }
}
