//! Member activity aggregate.
//!
//! - [`entities::MemberActivity`] - issues and commits for one person
//! - [`entities::ActivityPart`] - one sub-result, tagged with the field it fills

pub mod entities;

pub use entities::{ActivityPart, MemberActivity};
