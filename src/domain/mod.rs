pub mod employee;
pub mod query;

pub use employee::*;
pub use query::*;
