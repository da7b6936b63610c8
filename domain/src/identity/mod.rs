//! Team member identity across systems.

pub mod entities;

pub use entities::UserIdentity;
