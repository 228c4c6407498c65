//! Request handlers
//!
//! One module per resource. Validation happens before any session is
//! acquired; repository calls receive the scoped session handle and the
//! result is mapped back through a response schema.

pub mod health;
pub mod records;
pub mod stocks;
