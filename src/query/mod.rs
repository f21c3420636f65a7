mod context;
mod identity_map;

pub use context::*;
pub use identity_map::*;
