//! Spatial block registry, movement groups, and the push resolver.
//!
//! [`WorldState`] owns a [`SpatialRegistry`] (which block is in which
//! cell) and a [`GroupRegistry`] (which blocks move together). Moves are
//! resolved in three stages: expand the set of blocks that must move,
//! check every member agrees, then commit atomically and ask each block
//! to request its visual transition.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod groups;
pub mod resolver;
pub mod snapshot;
pub mod spatial;
pub mod world;

pub use config::{ConfigError, WorldConfig};
pub use groups::{GroupChange, GroupRegistry};
pub use resolver::{CommitPlan, ExpandedSet, Member, MoveOutcome, RejectReason, Seed};
pub use snapshot::{Placement, WorldSnapshot};
pub use spatial::SpatialRegistry;
pub use world::{WorldError, WorldState};
