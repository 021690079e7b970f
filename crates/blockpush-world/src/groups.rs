//! Movement groups.
//!
//! A [`GroupRegistry`] partitions blocks into groups that always move
//! together. A block is in at most one group, groups are created by their
//! first assignment and deleted with their last member, and the two
//! directions of the mapping are kept symmetric.

use std::collections::HashMap;

use blockpush_core::{BlockId, GroupError, GroupId};
use indexmap::{IndexMap, IndexSet};

/// What an assignment did to a block's membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupChange {
    /// Nothing changed.
    Unchanged,
    /// The block joined a group it was not in before.
    Joined {
        /// The group joined.
        group: GroupId,
    },
    /// The block left one group for another.
    Moved {
        /// The group left.
        from: GroupId,
        /// The group joined.
        to: GroupId,
    },
    /// The block left its group and is now ungrouped.
    Left {
        /// The group left.
        group: GroupId,
    },
}

impl GroupChange {
    /// The group the block is in after the change, if it changed.
    pub fn joined(&self) -> Option<GroupId> {
        match self {
            Self::Joined { group } => Some(*group),
            Self::Moved { to, .. } => Some(*to),
            Self::Unchanged | Self::Left { .. } => None,
        }
    }

    /// The group that was deleted because this change emptied it.
    ///
    /// Only meaningful together with the registry the change came from.
    pub fn left(&self) -> Option<GroupId> {
        match self {
            Self::Moved { from, .. } => Some(*from),
            Self::Left { group } => Some(*group),
            Self::Unchanged | Self::Joined { .. } => None,
        }
    }
}

/// Symmetric block ↔ group mapping.
///
/// Equality ignores insertion order, so two registries with the same
/// partition compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupRegistry {
    membership: HashMap<BlockId, GroupId>,
    groups: IndexMap<GroupId, IndexSet<BlockId>>,
}

impl GroupRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The group `block` belongs to.
    pub fn group_of(&self, block: BlockId) -> Option<GroupId> {
        self.membership.get(&block).copied()
    }

    /// Members of `group` in the order they joined.
    ///
    /// Fails with [`GroupError::UnknownGroup`] if the group has never been
    /// assigned or has been vacated.
    pub fn members_of(
        &self,
        group: GroupId,
    ) -> Result<impl ExactSizeIterator<Item = BlockId> + Clone + '_, GroupError> {
        self.groups
            .get(&group)
            .map(|members| members.iter().copied())
            .ok_or(GroupError::UnknownGroup { group })
    }

    /// Whether `group` currently has members.
    pub fn contains_group(&self, group: GroupId) -> bool {
        self.groups.contains_key(&group)
    }

    /// Live group ids in creation order.
    pub fn group_ids(&self) -> impl ExactSizeIterator<Item = GroupId> + '_ {
        self.groups.keys().copied()
    }

    /// Number of live groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of grouped blocks.
    pub fn grouped_block_count(&self) -> usize {
        self.membership.len()
    }

    /// Whether no block is grouped.
    pub fn is_empty(&self) -> bool {
        self.membership.is_empty()
    }

    /// Put `block` into `group`, or take it out of its group with `None`.
    ///
    /// Removing an ungrouped block and re-assigning a block to the group it
    /// is already in are both no-ops.
    pub fn assign(&mut self, block: BlockId, group: Option<GroupId>) -> GroupChange {
        let current = self.group_of(block);
        match (current, group) {
            (None, None) => GroupChange::Unchanged,
            (Some(from), Some(to)) if from == to => GroupChange::Unchanged,
            (Some(from), None) => {
                self.detach(block, from);
                GroupChange::Left { group: from }
            }
            (None, Some(to)) => {
                self.attach(block, to);
                GroupChange::Joined { group: to }
            }
            (Some(from), Some(to)) => {
                self.detach(block, from);
                self.attach(block, to);
                GroupChange::Moved { from, to }
            }
        }
    }

    /// Signed form of [`assign`](Self::assign): negative numbers remove.
    ///
    /// A number too large for a [`GroupId`] fails with
    /// [`GroupError::InvalidGroup`] and leaves membership untouched.
    pub fn assign_raw(&mut self, block: BlockId, group: i64) -> Result<GroupChange, GroupError> {
        Ok(self.assign(block, GroupId::from_raw(group)?))
    }

    /// Take `block` out of its group, if any.
    pub fn remove(&mut self, block: BlockId) -> GroupChange {
        self.assign(block, None)
    }

    /// Every `(block, group)` pair, grouped by group in creation order.
    pub fn entries(&self) -> impl Iterator<Item = (BlockId, GroupId)> + '_ {
        self.groups
            .iter()
            .flat_map(|(g, members)| members.iter().map(move |b| (*b, *g)))
    }

    /// Drop every group.
    pub fn clear(&mut self) {
        self.membership.clear();
        self.groups.clear();
    }

    /// Whether the two directions of the mapping agree and no group is empty.
    pub fn is_symmetric(&self) -> bool {
        let listed: usize = self.groups.values().map(IndexSet::len).sum();
        listed == self.membership.len()
            && self.groups.iter().all(|(g, members)| {
                !members.is_empty() && members.iter().all(|b| self.membership.get(b) == Some(g))
            })
    }

    fn attach(&mut self, block: BlockId, group: GroupId) {
        self.groups.entry(group).or_default().insert(block);
        self.membership.insert(block, group);
    }

    fn detach(&mut self, block: BlockId, group: GroupId) {
        self.membership.remove(&block);
        if let Some(members) = self.groups.get_mut(&group) {
            members.shift_remove(&block);
            if members.is_empty() {
                self.groups.shift_remove(&group);
            }
        }
    }
}
