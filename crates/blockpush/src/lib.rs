//! blockpush: grid block registry, movement groups, and push resolution.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the blockpush sub-crates. For most users, adding `blockpush` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use blockpush::prelude::*;
//!
//! let mut world = WorldState::new(WorldConfig::default()).unwrap();
//! let crate_a = world.spawn(BlockKind::Basic, Cell::new(0, 0, 0)).unwrap();
//! let crate_b = world.spawn(BlockKind::Heavy, Cell::new(1, 0, 0)).unwrap();
//! let wall = world.spawn(BlockKind::Immobile, Cell::new(0, 0, 1)).unwrap();
//!
//! // Tie the two crates together and record the transitions a move asks for.
//! world.assign_group(crate_a, Some(GroupId(1))).unwrap();
//! world.assign_group(crate_b, Some(GroupId(1))).unwrap();
//! let mut transitions: Vec<TransitionRequest> = Vec::new();
//!
//! let request = MoveRequest::new(crate_a, Direction::Up, 1);
//! let outcome = world.resolve_into(&request, &mut transitions);
//! assert!(outcome.is_committed());
//! assert_eq!(transitions.len(), 2);
//!
//! // The wall refuses, so nothing moves.
//! assert!(!world.move_block(wall, Direction::Back, 1, false));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `blockpush-core` | Cells, ids, requests, errors, the `BlockEntity` contract |
//! | [`world`] | `blockpush-world` | Registries, resolver, `WorldState`, snapshots |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`blockpush-core`).
///
/// Contains [`types::Cell`], [`types::Direction`], block and group ids,
/// move and transition requests, the error enums, and the
/// [`types::BlockEntity`] trait.
pub use blockpush_core as types;

/// Registries, resolver, and the owned world (`blockpush-world`).
///
/// [`world::WorldState`] is the entry point; [`world::SpatialRegistry`] and
/// [`world::GroupRegistry`] are reachable through it for queries.
pub use blockpush_world as world;

/// Common imports for typical blockpush usage.
///
/// ```rust
/// use blockpush::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use blockpush_core::{
        BlockEntity, BlockId, BlockKind, Cell, Direction, GroupId, MoveRequest, MoveStep,
        StandardBlock, TransitionRequest,
    };

    // Outbound hooks
    pub use blockpush_core::{GroupObserver, TransitionSink};

    // Errors
    pub use blockpush_core::{GroupError, RegistryError};
    pub use blockpush_world::{ConfigError, WorldError};

    // World
    pub use blockpush_world::{
        GroupChange, MoveOutcome, RejectReason, Seed, WorldConfig, WorldSnapshot, WorldState,
    };
}
