//! Categories Module - Enumeration tables & label resolution

pub mod tables;
pub mod resolve;

pub use tables::{CategoryEntry, CategoryTable, EnumerationTables};
pub use resolve::resolve_inputs;
