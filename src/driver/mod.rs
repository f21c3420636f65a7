mod rusqlite;

pub use self::rusqlite::*;
