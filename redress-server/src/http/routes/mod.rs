//! Route handlers organized by resource

pub mod complaints;
pub mod health;
