//! Point-in-time capture of block placement and grouping, for undo.

use blockpush_core::{BlockId, Cell, GroupId};

/// Where one block was, and which group it was in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// The block.
    pub block: BlockId,
    /// Its palette name at capture time.
    pub type_name: String,
    /// Its cell.
    pub cell: Cell,
    /// Its group, if any.
    pub group: Option<GroupId>,
}

/// Every block's placement, in registry insertion order.
///
/// Produced by [`WorldState::snapshot`](crate::WorldState::snapshot) and
/// consumed by [`WorldState::restore`](crate::WorldState::restore). Two
/// snapshots of the same world compare equal exactly when nothing moved
/// and no membership changed in between.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldSnapshot {
    placements: Vec<Placement>,
}

impl WorldSnapshot {
    pub(crate) fn new(placements: Vec<Placement>) -> Self {
        Self { placements }
    }

    /// All placements in insertion order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placement of one block.
    pub fn placement(&self, block: BlockId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.block == block)
    }

    /// Number of captured blocks.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the snapshot captured an empty world.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Iterate over placements.
    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.placements.iter()
    }
}

impl<'a> IntoIterator for &'a WorldSnapshot {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}
