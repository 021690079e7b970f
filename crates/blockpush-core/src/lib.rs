//! Core types and traits for the blockpush grid movement resolver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the workspace: grid
//! cells and directions, block and group identifiers, move and
//! transition requests, error types, and the [`BlockEntity`] contract
//! every movable unit implements.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod cell;
pub mod command;
pub mod error;
pub mod id;
pub mod standard;
pub mod traits;

pub use block::{is_pushable_weight, BlockEntity};
pub use cell::{Cell, Direction};
pub use command::{MoveRequest, MoveStep, TransitionRequest};
pub use error::{GroupError, RegistryError};
pub use id::{BlockId, GroupId};
pub use standard::{BlockKind, StandardBlock};
pub use traits::{GroupObserver, NullObserver, NullSink, TransitionSink};
