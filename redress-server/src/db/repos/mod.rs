//! Repository layer
//!
//! Repositories borrow the pool; each statement checks a connection out
//! only for its own duration.

pub mod complaints;

pub use complaints::{ComplaintRepo, DbError};
