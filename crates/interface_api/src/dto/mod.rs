//! Transfer schemas (DTOs)
//!
//! Request and response shapes for the API boundary. These are distinct from
//! the row entities in `infra_db`: requests carry validation rules and no
//! identifier; responses are built from persisted entities and include the
//! server-assigned id.

pub mod records;
pub mod stocks;
