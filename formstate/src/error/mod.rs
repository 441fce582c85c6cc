//! Error types

mod schema;
mod sink;
mod store;

pub use schema::*;
pub use sink::*;
pub use store::*;
