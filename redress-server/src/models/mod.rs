//! Domain models with validation at construction
//!
//! User input is validated when these types are created. Invalid input
//! returns a `ValidationError` instead of reaching the database.

pub mod complaint;
pub mod validation;

pub use complaint::{Complaint, ComplaintPatch, NewComplaint};
pub use validation::ValidationError;
