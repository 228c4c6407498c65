//! Repository functions for row entities
//!
//! Each module encapsulates the SQL for one table and maps rows to entities.
//! All functions take an explicit `&mut PgConnection` session handle acquired
//! by the caller; the session is released when that handle drops. SQLx errors
//! are mapped to specific `DatabaseError` variants at this boundary.

pub mod records;
pub mod stocks;
