mod execute;
mod query;

pub use execute::*;
pub use query::*;
