//! Error types for the block registries.
//!
//! Both enums describe contract violations: a correctly driven world never
//! produces them through normal play. An infeasible move is not an error
//! and is reported as a plain `false` by the resolver.

use std::error::Error;
use std::fmt;

use crate::cell::Cell;
use crate::id::{BlockId, GroupId};

/// Errors from the spatial block registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The target cell is already held by a different block.
    OccupancyConflict {
        /// The contested cell.
        cell: Cell,
        /// The block currently holding the cell.
        occupant: BlockId,
        /// The block that tried to enter the cell.
        incoming: BlockId,
    },
    /// A block with this id is already registered.
    DuplicateBlock {
        /// The duplicated id.
        block: BlockId,
    },
    /// The block is not registered.
    UnknownBlock {
        /// The unrecognised id.
        block: BlockId,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OccupancyConflict {
                cell,
                occupant,
                incoming,
            } => write!(
                f,
                "cell {cell} is occupied by block {occupant}, cannot place block {incoming}"
            ),
            Self::DuplicateBlock { block } => write!(f, "block {block} is already registered"),
            Self::UnknownBlock { block } => write!(f, "unknown block: {block}"),
        }
    }
}

impl Error for RegistryError {}

/// Errors from the group registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupError {
    /// The group has no members: it was never assigned or has been vacated.
    UnknownGroup {
        /// The unrecognised group.
        group: GroupId,
    },
    /// The block to assign is not registered in the world.
    UnknownBlock {
        /// The unrecognised id.
        block: BlockId,
    },
    /// A non-negative raw group number that does not fit in a [`GroupId`].
    InvalidGroup {
        /// The raw number as given.
        raw: i64,
    },
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGroup { group } => write!(f, "unknown group: {group}"),
            Self::UnknownBlock { block } => write!(f, "unknown block: {block}"),
            Self::InvalidGroup { raw } => write!(f, "group number {raw} is out of range"),
        }
    }
}

impl Error for GroupError {}
