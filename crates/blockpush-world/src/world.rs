//! The owned world: both registries, the resolver, and the outbound hooks.
//!
//! [`WorldState`] is the primary user-facing API. Every mutation takes
//! `&mut self`, so a move can never be resolved while another is in
//! flight, and several independent worlds can coexist in one process.
//!
//! # Ownership model
//!
//! Blocks are registered once as `Box<dyn BlockEntity>` and owned by the
//! spatial registry. Group membership is owned by the group registry. The
//! [`TransitionSink`] and optional [`GroupObserver`] are owned by the world
//! and only ever called after the registries are consistent again.

use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use blockpush_core::{
    BlockEntity, BlockId, BlockKind, Cell, GroupError, GroupId, GroupObserver, MoveRequest,
    NullSink, RegistryError, StandardBlock, TransitionSink,
};
use log::{debug, error, trace};

use crate::config::{ConfigError, WorldConfig};
use crate::groups::{GroupChange, GroupRegistry};
use crate::resolver::{commit, expand, ExpandedSet, MoveOutcome, RejectReason, Seed};
use crate::snapshot::{Placement, WorldSnapshot};
use crate::spatial::SpatialRegistry;

// ── WorldError ─────────────────────────────────────────────────────

/// Errors from [`WorldState`] operations.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldError {
    /// A spatial registry operation failed.
    Registry(RegistryError),
    /// A group registry operation failed.
    Group(GroupError),
    /// The configuration is invalid.
    Config(ConfigError),
    /// A snapshot does not describe the blocks currently registered.
    SnapshotMismatch {
        /// What did not match.
        reason: String,
    },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(e) => write!(f, "registry error: {e}"),
            Self::Group(e) => write!(f, "group error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::SnapshotMismatch { reason } => write!(f, "snapshot mismatch: {reason}"),
        }
    }
}

impl Error for WorldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(e) => Some(e),
            Self::Group(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::SnapshotMismatch { .. } => None,
        }
    }
}

impl From<RegistryError> for WorldError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<GroupError> for WorldError {
    fn from(e: GroupError) -> Self {
        Self::Group(e)
    }
}

impl From<ConfigError> for WorldError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── WorldState ─────────────────────────────────────────────────────

/// A grid of blocks, their movement groups, and the push resolver.
///
/// # Example
///
/// ```
/// use blockpush_core::{BlockEntity, BlockKind, Cell, Direction};
/// use blockpush_world::{WorldConfig, WorldState};
///
/// let mut world = WorldState::new(WorldConfig::default()).unwrap();
/// let a = world.spawn(BlockKind::Basic, Cell::new(0, 0, 0)).unwrap();
/// let b = world.spawn(BlockKind::Basic, Cell::new(1, 0, 0)).unwrap();
///
/// assert!(world.move_block(a, Direction::Right, 1, false));
/// assert_eq!(world.block(b).map(|b| b.position()), Some(Cell::new(2, 0, 0)));
/// ```
pub struct WorldState {
    config: WorldConfig,
    spatial: SpatialRegistry,
    groups: GroupRegistry,
    next_id: u64,
    sink: Box<dyn TransitionSink>,
    observer: Option<Box<dyn GroupObserver>>,
}

impl WorldState {
    /// Create an empty world. Fails if `config` does not validate.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            spatial: SpatialRegistry::new(),
            groups: GroupRegistry::new(),
            next_id: 0,
            sink: Box::new(NullSink),
            observer: None,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Route transition requests from committed moves to `sink`.
    pub fn set_transition_sink(&mut self, sink: Box<dyn TransitionSink>) {
        self.sink = sink;
    }

    /// Notify `observer` of every group membership change.
    pub fn set_group_observer(&mut self, observer: Box<dyn GroupObserver>) {
        self.observer = Some(observer);
    }

    /// Detach and return the group observer.
    pub fn take_group_observer(&mut self) -> Option<Box<dyn GroupObserver>> {
        self.observer.take()
    }

    // ── Blocks ─────────────────────────────────────────────────────

    /// Allocate a block id not used by any registered block.
    pub fn next_block_id(&mut self) -> BlockId {
        loop {
            let id = BlockId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if !self.spatial.contains(id) {
                return id;
            }
        }
    }

    /// Register a block at its current position.
    pub fn insert(&mut self, block: Box<dyn BlockEntity>) -> Result<BlockId, WorldError> {
        let id = self.spatial.register(block)?;
        trace!("registered block {id}");
        Ok(id)
    }

    /// Create and register a [`StandardBlock`] of `kind` at `cell`.
    pub fn spawn(&mut self, kind: BlockKind, cell: Cell) -> Result<BlockId, WorldError> {
        let id = self.next_block_id();
        self.insert(Box::new(StandardBlock::new(id, kind, cell)))
    }

    /// Remove a block from both registries and return it.
    ///
    /// `None` if the block was not registered.
    pub fn destroy_block(&mut self, block: BlockId) -> Option<Box<dyn BlockEntity>> {
        let removed = self.spatial.unregister(block)?;
        let change = self.groups.remove(block);
        self.notify(block, change);
        debug!("destroyed block {block}");
        Some(removed)
    }

    /// Drop every block and group.
    pub fn clear(&mut self) {
        let grouped: Vec<BlockId> = self.groups.entries().map(|(b, _)| b).collect();
        if let Some(observer) = self.observer.as_deref_mut() {
            for block in grouped {
                observer.clear_highlight(block);
            }
        }
        self.groups.clear();
        self.spatial.clear();
        debug!("cleared world");
    }

    /// Read access to the spatial registry.
    pub fn spatial(&self) -> &SpatialRegistry {
        &self.spatial
    }

    /// Read access to the group registry.
    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    /// Look up a block by id.
    pub fn block(&self, block: BlockId) -> Option<&dyn BlockEntity> {
        self.spatial.get(block)
    }

    /// The block occupying exactly `cell`.
    pub fn block_at(&self, cell: Cell) -> Option<&dyn BlockEntity> {
        self.spatial.block_at(cell)
    }

    /// Number of registered blocks.
    pub fn block_count(&self) -> usize {
        self.spatial.len()
    }

    // ── Groups ─────────────────────────────────────────────────────

    /// The group `block` belongs to.
    pub fn group_of(&self, block: BlockId) -> Option<GroupId> {
        self.groups.group_of(block)
    }

    /// Members of `group` in the order they joined.
    pub fn members_of(
        &self,
        group: GroupId,
    ) -> Result<impl ExactSizeIterator<Item = BlockId> + Clone + '_, GroupError> {
        self.groups.members_of(group)
    }

    /// Put a registered block into `group`, or ungroup it with `None`.
    pub fn assign_group(
        &mut self,
        block: BlockId,
        group: Option<GroupId>,
    ) -> Result<GroupChange, GroupError> {
        if !self.spatial.contains(block) {
            return Err(GroupError::UnknownBlock { block });
        }
        let change = self.groups.assign(block, group);
        self.notify(block, change);
        Ok(change)
    }

    /// Signed form of [`assign_group`](Self::assign_group): negative
    /// numbers ungroup the block, numbers too large for a [`GroupId`] fail
    /// with [`GroupError::InvalidGroup`].
    pub fn assign_group_raw(
        &mut self,
        block: BlockId,
        group: i64,
    ) -> Result<GroupChange, GroupError> {
        self.assign_group(block, GroupId::from_raw(group)?)
    }

    /// Ungroup a registered block.
    pub fn remove_from_group(&mut self, block: BlockId) -> Result<GroupChange, GroupError> {
        self.assign_group(block, None)
    }

    fn notify(&mut self, block: BlockId, change: GroupChange) {
        if change == GroupChange::Unchanged {
            return;
        }
        debug!("block {block}: {change:?}");
        let Some(observer) = self.observer.as_deref_mut() else {
            return;
        };
        match change {
            GroupChange::Unchanged => {}
            GroupChange::Joined { group } | GroupChange::Moved { to: group, .. } => {
                observer.highlight_group(block, group)
            }
            GroupChange::Left { .. } => observer.clear_highlight(block),
        }
    }

    // ── Movement ───────────────────────────────────────────────────

    /// Every block that moving `seed` would displace.
    pub fn expanded_set(
        &self,
        seed: Seed,
        direction: impl Into<Cell>,
        distance: u32,
    ) -> Result<ExpandedSet, RejectReason> {
        expand(
            &self.spatial,
            &self.groups,
            seed,
            direction.into(),
            distance,
            self.config.max_expansion,
        )
    }

    /// Whether `block` (with its group and everything they push) can move.
    ///
    /// Pure query; repeated calls on an unchanged world agree.
    pub fn can_move(&self, block: BlockId, direction: impl Into<Cell>, distance: u32) -> bool {
        self.feasible(Seed::Block(block), direction.into(), distance)
    }

    /// Whether every member of `group` (and everything they push) can move.
    pub fn can_move_group(
        &self,
        group: GroupId,
        direction: impl Into<Cell>,
        distance: u32,
    ) -> bool {
        self.feasible(Seed::Group(group), direction.into(), distance)
    }

    fn feasible(&self, seed: Seed, direction: Cell, distance: u32) -> bool {
        self.expanded_set(seed, direction, distance)
            .is_ok_and(|set| set.first_blocker(&self.spatial).is_none())
    }

    /// Move `block` if feasible. Returns whether anything moved.
    pub fn move_block(
        &mut self,
        block: BlockId,
        direction: impl Into<Cell>,
        distance: u32,
        push: bool,
    ) -> bool {
        self.resolve_seed(Seed::Block(block), direction.into(), distance, push)
            .is_committed()
    }

    /// Move every member of `group` if feasible. Returns whether anything
    /// moved.
    pub fn move_group(
        &mut self,
        group: GroupId,
        direction: impl Into<Cell>,
        distance: u32,
        push: bool,
    ) -> bool {
        self.resolve_seed(Seed::Group(group), direction.into(), distance, push)
            .is_committed()
    }

    /// Resolve a request, reporting why it did or did not move.
    pub fn resolve(&mut self, request: &MoveRequest) -> MoveOutcome {
        self.resolve_seed(
            Seed::Block(request.origin),
            request.direction,
            request.distance,
            request.push,
        )
    }

    /// Like [`resolve`](Self::resolve), sending transitions to `sink`
    /// instead of the world's configured sink.
    pub fn resolve_into(
        &mut self,
        request: &MoveRequest,
        sink: &mut dyn TransitionSink,
    ) -> MoveOutcome {
        Self::run(
            &mut self.spatial,
            &self.groups,
            &self.config,
            Seed::Block(request.origin),
            request.direction,
            request.distance,
            request.push,
            sink,
        )
    }

    fn resolve_seed(
        &mut self,
        seed: Seed,
        direction: Cell,
        distance: u32,
        push: bool,
    ) -> MoveOutcome {
        Self::run(
            &mut self.spatial,
            &self.groups,
            &self.config,
            seed,
            direction,
            distance,
            push,
            self.sink.as_mut(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn run(
        spatial: &mut SpatialRegistry,
        groups: &GroupRegistry,
        config: &WorldConfig,
        seed: Seed,
        direction: Cell,
        distance: u32,
        push: bool,
        sink: &mut dyn TransitionSink,
    ) -> MoveOutcome {
        let set = match expand(spatial, groups, seed, direction, distance, config.max_expansion) {
            Ok(set) => set,
            Err(reason) => {
                trace!("move of {seed:?} rejected: {reason}");
                return MoveOutcome::Rejected(reason);
            }
        };
        if let Some(blocker) = set.first_blocker(spatial) {
            trace!("move of {seed:?} blocked by block {blocker}");
            return MoveOutcome::Blocked { blocker };
        }
        match commit(spatial, &set, push, config.base_transition_secs, sink) {
            Ok(moved) => MoveOutcome::Committed { moved },
            Err(e) => {
                error!("commit of {seed:?} failed after feasibility check: {e}");
                debug_assert!(false, "occupancy conflict escaped the resolver: {e}");
                let reason = match e {
                    RegistryError::OccupancyConflict { cell, .. } => RejectReason::Conflict(cell),
                    RegistryError::UnknownBlock { block }
                    | RegistryError::DuplicateBlock { block } => RejectReason::UnknownBlock(block),
                };
                MoveOutcome::Rejected(reason)
            }
        }
    }

    // ── Snapshot / restore ─────────────────────────────────────────

    /// Capture every block's cell and group.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::new(
            self.spatial
                .iter()
                .map(|b| Placement {
                    block: b.id(),
                    type_name: b.type_name().to_owned(),
                    cell: b.position(),
                    group: self.groups.group_of(b.id()),
                })
                .collect(),
        )
    }

    /// Put every block back where `snapshot` recorded it and rebuild group
    /// membership, bypassing feasibility.
    ///
    /// The snapshot must describe exactly the registered blocks, with
    /// distinct cells. The world is unchanged if it does not.
    pub fn restore(&mut self, snapshot: &WorldSnapshot) -> Result<(), WorldError> {
        self.check_snapshot(snapshot)?;

        let ids: Vec<BlockId> = self.spatial.ids().collect();
        for id in &ids {
            self.spatial.vacate(*id)?;
        }
        for p in snapshot {
            self.spatial.place(p.block, p.cell)?;
        }

        let before = std::mem::take(&mut self.groups);
        for p in snapshot {
            if let Some(group) = p.group {
                self.groups.assign(p.block, Some(group));
            }
        }
        for id in ids {
            let (old, new) = (before.group_of(id), self.groups.group_of(id));
            let change = match (old, new) {
                (None, None) => GroupChange::Unchanged,
                (Some(a), Some(b)) if a == b => GroupChange::Unchanged,
                (None, Some(group)) => GroupChange::Joined { group },
                (Some(group), None) => GroupChange::Left { group },
                (Some(from), Some(to)) => GroupChange::Moved { from, to },
            };
            self.notify(id, change);
        }
        debug!("restored {} blocks", snapshot.len());
        Ok(())
    }

    fn check_snapshot(&self, snapshot: &WorldSnapshot) -> Result<(), WorldError> {
        let mismatch = |reason: String| Err(WorldError::SnapshotMismatch { reason });
        if snapshot.len() != self.spatial.len() {
            return mismatch(format!(
                "snapshot has {} blocks, world has {}",
                snapshot.len(),
                self.spatial.len()
            ));
        }
        let mut seen_blocks = HashSet::with_capacity(snapshot.len());
        let mut seen_cells = HashSet::with_capacity(snapshot.len());
        for p in snapshot {
            let Some(block) = self.spatial.get(p.block) else {
                return mismatch(format!("block {} is not registered", p.block));
            };
            if block.type_name() != p.type_name {
                return mismatch(format!(
                    "block {} is a {}, snapshot recorded {}",
                    p.block,
                    block.type_name(),
                    p.type_name
                ));
            }
            if !seen_blocks.insert(p.block) {
                return mismatch(format!("block {} appears twice", p.block));
            }
            if !seen_cells.insert(p.cell) {
                return mismatch(format!("cell {} is claimed twice", p.cell));
            }
        }
        Ok(())
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            config: WorldConfig::default(),
            spatial: SpatialRegistry::new(),
            groups: GroupRegistry::new(),
            next_id: 0,
            sink: Box::new(NullSink),
            observer: None,
        }
    }
}

impl fmt::Debug for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldState")
            .field("config", &self.config)
            .field("blocks", &self.spatial.len())
            .field("groups", &self.groups.group_count())
            .field("next_id", &self.next_id)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
