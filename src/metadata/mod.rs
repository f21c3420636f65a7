mod column;
mod mapper;
mod registry;
mod relation;

pub use column::*;
pub use mapper::*;
pub use registry::*;
pub use relation::*;
