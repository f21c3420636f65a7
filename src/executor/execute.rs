/// Defines the result of executing an operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// The last inserted id on auto-increment
    pub last_insert_id: u64,
    /// The number of rows affected by the database operation
    pub rows_affected: u64,
}

impl ExecResult {
    /// Get the last id after `AUTOINCREMENT` is done on the primary key
    pub fn last_insert_id(&self) -> u64 {
        self.last_insert_id
    }

    /// Get the number of rows affected by the operation
    pub fn rows_affected(&self) -> u64 {
        self.rows_affected
    }
}
