//! Row structs for the gallery tables.
//!
//! Each submodule holds a `FromRow` struct matching the database row and a
//! conversion into the core domain type.

pub mod category;
pub mod generation;
