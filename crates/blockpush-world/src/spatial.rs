//! The spatial block registry.
//!
//! [`SpatialRegistry`] is the single authority on which block occupies which
//! cell. It keeps two indices in lockstep:
//!
//! ```text
//! blocks: IndexMap<BlockId, Box<dyn BlockEntity>>   (insertion order)
//! cells:  HashMap<Cell, BlockId>                     (O(1) occupancy)
//! ```
//!
//! Every public mutation preserves the one-block-per-cell invariant. The
//! commit primitives used by the resolver (`relocate`, `vacate`, `place`)
//! are crate-private.

use std::collections::HashMap;

use blockpush_core::{BlockEntity, BlockId, Cell, RegistryError};
use indexmap::IndexMap;

/// Authoritative cell ↔ block mapping.
#[derive(Debug, Default)]
pub struct SpatialRegistry {
    blocks: IndexMap<BlockId, Box<dyn BlockEntity>>,
    cells: HashMap<Cell, BlockId>,
}

impl SpatialRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block at its current position.
    ///
    /// Fails with [`RegistryError::OccupancyConflict`] if the cell is held by
    /// another block, or [`RegistryError::DuplicateBlock`] if the id is
    /// already registered. The registry is unchanged on failure.
    pub fn register(&mut self, block: Box<dyn BlockEntity>) -> Result<BlockId, RegistryError> {
        let id = block.id();
        if self.blocks.contains_key(&id) {
            return Err(RegistryError::DuplicateBlock { block: id });
        }
        let cell = block.position();
        if let Some(&occupant) = self.cells.get(&cell) {
            return Err(RegistryError::OccupancyConflict {
                cell,
                occupant,
                incoming: id,
            });
        }
        self.cells.insert(cell, id);
        self.blocks.insert(id, block);
        Ok(id)
    }

    /// Remove a block, returning it. `None` if it was not registered.
    ///
    /// The remaining blocks keep their relative insertion order.
    pub fn unregister(&mut self, id: BlockId) -> Option<Box<dyn BlockEntity>> {
        let block = self.blocks.shift_remove(&id)?;
        let cell = block.position();
        if self.cells.get(&cell) == Some(&id) {
            self.cells.remove(&cell);
        }
        Some(block)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    /// Look up a block by id.
    pub fn get(&self, id: BlockId) -> Option<&dyn BlockEntity> {
        self.blocks.get(&id).map(|b| &**b)
    }

    /// The cell `id` occupies.
    pub fn position_of(&self, id: BlockId) -> Option<Cell> {
        self.blocks.get(&id).map(|b| b.position())
    }

    /// The block occupying exactly `cell`.
    pub fn block_at(&self, cell: Cell) -> Option<&dyn BlockEntity> {
        self.cells.get(&cell).and_then(|id| self.get(*id))
    }

    /// Id of the block occupying exactly `cell`.
    pub fn id_at(&self, cell: Cell) -> Option<BlockId> {
        self.cells.get(&cell).copied()
    }

    /// Whether any block occupies `cell`.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Number of registered blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the registry holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Registered ids in insertion order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = BlockId> + Clone + '_ {
        self.blocks.keys().copied()
    }

    /// All blocks in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &(dyn BlockEntity + 'static)> + Clone {
        self.blocks.values().map(|b| &**b)
    }

    /// Blocks satisfying `predicate`, in insertion order.
    ///
    /// The iterator is lazy and finite, and cloning it restarts the scan
    /// from wherever the clone was taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockpush_core::{BlockEntity, BlockId, BlockKind, Cell, StandardBlock};
    /// use blockpush_world::SpatialRegistry;
    ///
    /// let mut reg = SpatialRegistry::new();
    /// let kinds = [BlockKind::Basic, BlockKind::Goal, BlockKind::Basic];
    /// for (i, kind) in kinds.into_iter().enumerate() {
    ///     let b = StandardBlock::new(BlockId(i as u64), kind, Cell::new(i as i32, 0, 0));
    ///     reg.register(Box::new(b)).unwrap();
    /// }
    /// let basics = reg.blocks_matching(|b| b.type_name() == "Basic");
    /// let ids: Vec<_> = basics.clone().map(|b| b.id()).collect();
    /// assert_eq!(ids, vec![BlockId(0), BlockId(2)]);
    /// assert_eq!(basics.count(), 2);
    /// ```
    pub fn blocks_matching<'a, P>(
        &'a self,
        predicate: P,
    ) -> impl Iterator<Item = &'a (dyn BlockEntity + 'static)> + Clone + 'a
    where
        P: Fn(&dyn BlockEntity) -> bool + Clone + 'a,
    {
        self.iter().filter(move |b| predicate(*b))
    }

    /// Blocks whose [`type_name`](BlockEntity::type_name) equals `name`.
    pub fn blocks_of_type<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a (dyn BlockEntity + 'static)> + Clone + 'a {
        self.blocks_matching(move |b| b.type_name() == name)
    }

    /// Blocks within Chebyshev distance `radius` of `center`.
    ///
    /// `radius == 0` is the exact-cell query.
    pub fn blocks_near(
        &self,
        center: Cell,
        radius: u32,
    ) -> impl Iterator<Item = &(dyn BlockEntity + 'static)> + Clone + '_ {
        self.blocks_matching(move |b| b.position().chebyshev(&center) <= radius)
    }

    /// Drop every block.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.cells.clear();
    }

    /// Whether both indices agree: every block's position maps back to it
    /// and no cell maps to a missing block.
    pub fn is_consistent(&self) -> bool {
        self.cells.len() == self.blocks.len()
            && self
                .blocks
                .iter()
                .all(|(id, b)| self.cells.get(&b.position()) == Some(id))
    }

    // ── Commit primitives (resolver only) ──────────────────────────

    pub(crate) fn get_mut(&mut self, id: BlockId) -> Option<&mut Box<dyn BlockEntity>> {
        self.blocks.get_mut(&id)
    }

    /// Move `id` to `to` in one step. The target must be vacant or
    /// already held by `id`.
    pub(crate) fn relocate(&mut self, id: BlockId, to: Cell) -> Result<Cell, RegistryError> {
        if let Some(&occupant) = self.cells.get(&to) {
            if occupant != id {
                return Err(RegistryError::OccupancyConflict {
                    cell: to,
                    occupant,
                    incoming: id,
                });
            }
        }
        let block = self
            .blocks
            .get_mut(&id)
            .ok_or(RegistryError::UnknownBlock { block: id })?;
        let from = block.position();
        if self.cells.get(&from) == Some(&id) {
            self.cells.remove(&from);
        }
        block.set_position(to);
        self.cells.insert(to, id);
        Ok(from)
    }

    /// First half of a two-phase move: release the block's cell without
    /// giving it a new one.
    pub(crate) fn vacate(&mut self, id: BlockId) -> Result<Cell, RegistryError> {
        let from = self
            .position_of(id)
            .ok_or(RegistryError::UnknownBlock { block: id })?;
        if self.cells.get(&from) == Some(&id) {
            self.cells.remove(&from);
        }
        Ok(from)
    }

    /// Second half of a two-phase move: claim `to` for a vacated block.
    pub(crate) fn place(&mut self, id: BlockId, to: Cell) -> Result<(), RegistryError> {
        if let Some(&occupant) = self.cells.get(&to) {
            if occupant != id {
                return Err(RegistryError::OccupancyConflict {
                    cell: to,
                    occupant,
                    incoming: id,
                });
            }
        }
        let block = self
            .blocks
            .get_mut(&id)
            .ok_or(RegistryError::UnknownBlock { block: id })?;
        block.set_position(to);
        self.cells.insert(to, id);
        Ok(())
    }
}
