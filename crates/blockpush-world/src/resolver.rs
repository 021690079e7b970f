//! Push propagation and atomic commit.
//!
//! Resolution runs in three stages:
//!
//! 1. **Expand** ([`expand`]): breadth-first from the seed's group over
//!    "my destination is occupied by you" edges, pulling in each newly
//!    reached block's whole group. The insertion-ordered member map doubles
//!    as the visited set and the work queue, so no block is expanded twice
//!    and the walk terminates on any topology.
//! 2. **Check** ([`ExpandedSet::first_blocker`]): every member's local
//!    `can_be_moved` must agree. Pure; nothing is mutated before this
//!    passes.
//! 3. **Commit** ([`commit`]): members are relocated far end first, in an
//!    order where each destination is already vacated. If the dependency
//!    relation has a cycle, the whole set is vacated and then placed.

use std::fmt;

use blockpush_core::{BlockId, Cell, GroupId, MoveStep, RegistryError, TransitionSink};
use indexmap::IndexMap;
use log::{debug, error, trace, warn};
use smallvec::SmallVec;

use crate::groups::GroupRegistry;
use crate::spatial::SpatialRegistry;

// ── Outcomes ───────────────────────────────────────────────────────

/// Why a move was refused before feasibility was even evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Zero direction or zero distance.
    NullMove,
    /// The seed block is not registered.
    UnknownBlock(BlockId),
    /// The seed group has no members.
    UnknownGroup(GroupId),
    /// A destination coordinate would overflow `i32`.
    OutOfRange(BlockId),
    /// More blocks would move than the configured limit allows.
    TooLarge {
        /// The configured `max_expansion`.
        limit: usize,
    },
    /// The commit hit an occupied cell and was rolled back. Indicates a
    /// registry inconsistency, never a normal blocked push.
    Conflict(Cell),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullMove => write!(f, "move has zero displacement"),
            Self::UnknownBlock(b) => write!(f, "unknown block: {b}"),
            Self::UnknownGroup(g) => write!(f, "unknown group: {g}"),
            Self::OutOfRange(b) => write!(f, "destination of block {b} is out of range"),
            Self::TooLarge { limit } => write!(f, "move displaces more than {limit} blocks"),
            Self::Conflict(c) => write!(f, "commit conflict at {c}"),
        }
    }
}

/// Result of resolving a move request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move happened. `moved` lists every displaced block in commit
    /// order.
    Committed {
        /// Displaced blocks, far end first.
        moved: Vec<BlockId>,
    },
    /// Some member refused to move. Nothing changed.
    Blocked {
        /// The first member whose `can_be_moved` returned false.
        blocker: BlockId,
    },
    /// The request itself was unusable. Nothing changed.
    Rejected(RejectReason),
}

impl MoveOutcome {
    /// Whether the move was committed.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

// ── Expansion ──────────────────────────────────────────────────────

/// Where a resolution starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seed {
    /// A single block, widened to its group if it has one.
    Block(BlockId),
    /// Every member of a group.
    Group(GroupId),
}

/// One block of an [`ExpandedSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Member {
    /// Cell before the move.
    pub from: Cell,
    /// Cell after the move.
    pub to: Cell,
    /// Reached because another member's destination held it, rather than
    /// by belonging to the seed's group.
    pub pushed: bool,
}

/// Every block that must move together for a request to be consistent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandedSet {
    direction: Cell,
    distance: u32,
    members: IndexMap<BlockId, Member>,
}

impl ExpandedSet {
    /// Direction of the move.
    pub fn direction(&self) -> Cell {
        self.direction
    }

    /// Distance of the move.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Number of members. Never zero.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a set contains at least its seed.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `block` must move.
    pub fn contains(&self, block: BlockId) -> bool {
        self.members.contains_key(&block)
    }

    /// Details for one member.
    pub fn member(&self, block: BlockId) -> Option<&Member> {
        self.members.get(&block)
    }

    /// Member ids in discovery (breadth-first) order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = BlockId> + Clone + '_ {
        self.members.keys().copied()
    }

    /// Members in discovery order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (BlockId, &Member)> + '_ {
        self.members.iter().map(|(id, m)| (*id, m))
    }

    /// The first member, in discovery order, that refuses to move.
    pub fn first_blocker(&self, spatial: &SpatialRegistry) -> Option<BlockId> {
        self.members.keys().copied().find(|id| {
            spatial
                .get(*id)
                .is_none_or(|b| !b.can_be_moved(self.direction, self.distance))
        })
    }
}

/// Compute the expanded set for moving `seed` by `direction * distance`.
///
/// Pure: neither registry is modified.
pub fn expand(
    spatial: &SpatialRegistry,
    groups: &GroupRegistry,
    seed: Seed,
    direction: Cell,
    distance: u32,
    limit: usize,
) -> Result<ExpandedSet, RejectReason> {
    if distance == 0 || direction.is_zero() {
        return Err(RejectReason::NullMove);
    }
    let mut set = ExpandedSet {
        direction,
        distance,
        members: IndexMap::new(),
    };
    match seed {
        Seed::Block(id) => {
            if !spatial.contains(id) {
                return Err(RejectReason::UnknownBlock(id));
            }
            admit(&mut set, spatial, groups, id, false, limit)?;
        }
        Seed::Group(g) => {
            let mut members = groups
                .members_of(g)
                .map_err(|_| RejectReason::UnknownGroup(g))?;
            if let Some(first) = members.next() {
                admit(&mut set, spatial, groups, first, false, limit)?;
            }
        }
    }

    let mut cursor = 0;
    while let Some((&id, member)) = set.members.get_index(cursor) {
        cursor += 1;
        let Some(occupant) = spatial.id_at(member.to) else {
            continue;
        };
        if occupant != id && !set.members.contains_key(&occupant) {
            trace!("block {id} pushes block {occupant} at {}", member.to);
            admit(&mut set, spatial, groups, occupant, true, limit)?;
        }
    }
    Ok(set)
}

/// Add `id` and, if it is grouped, its whole group.
fn admit(
    set: &mut ExpandedSet,
    spatial: &SpatialRegistry,
    groups: &GroupRegistry,
    id: BlockId,
    pushed: bool,
    limit: usize,
) -> Result<(), RejectReason> {
    let mut batch: SmallVec<[BlockId; 8]> = SmallVec::new();
    match groups.group_of(id) {
        Some(g) => batch.extend(
            groups
                .members_of(g)
                .map_err(|_| RejectReason::UnknownGroup(g))?,
        ),
        None => batch.push(id),
    }
    for b in batch {
        if set.members.contains_key(&b) {
            continue;
        }
        let from = spatial
            .position_of(b)
            .ok_or(RejectReason::UnknownBlock(b))?;
        let to = from
            .displaced(set.direction, set.distance)
            .ok_or(RejectReason::OutOfRange(b))?;
        set.members.insert(b, Member { from, to, pushed });
        if set.members.len() > limit {
            return Err(RejectReason::TooLarge { limit });
        }
    }
    Ok(())
}

// ── Commit ─────────────────────────────────────────────────────────

/// How a feasible [`ExpandedSet`] is written into the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitPlan {
    /// Relocate one member at a time in this order; every destination is
    /// free by the time its member moves.
    Ordered(Vec<BlockId>),
    /// Vacate every member, then place every member.
    TwoPhase,
}

impl CommitPlan {
    /// Plan the commit of `set`.
    ///
    /// Member A depends on member B when A's destination currently holds B,
    /// so B must move first. Each member has at most one dependency, and the
    /// members whose destination is free are the far ends of their chains.
    /// A cyclic relation yields [`CommitPlan::TwoPhase`].
    pub fn for_set(spatial: &SpatialRegistry, set: &ExpandedSet) -> Self {
        let n = set.members.len();
        let mut dependents: Vec<SmallVec<[usize; 2]>> = vec![SmallVec::new(); n];
        let mut waiting = vec![false; n];

        for (i, (id, member)) in set.members.iter().enumerate() {
            let Some(occupant) = spatial.id_at(member.to) else {
                continue;
            };
            if occupant == *id {
                continue;
            }
            if let Some(j) = set.members.get_index_of(&occupant) {
                dependents[j].push(i);
                waiting[i] = true;
            }
        }

        let mut ready: Vec<usize> = (0..n).filter(|&i| !waiting[i]).rev().collect();
        let mut order = Vec::with_capacity(n);
        while let Some(j) = ready.pop() {
            if let Some((&id, _)) = set.members.get_index(j) {
                order.push(id);
            }
            for &i in &dependents[j] {
                waiting[i] = false;
                ready.push(i);
            }
        }
        if order.len() == n {
            Self::Ordered(order)
        } else {
            Self::TwoPhase
        }
    }
}

/// Apply a feasible expanded set.
///
/// Updates the registry, then runs each member's `execute_move` hook in
/// commit order. Seed-group members report the caller's `push` flag;
/// pushed members always report `true`. On an unexpected conflict the
/// registry is rolled back to its pre-commit state.
///
/// A hook that moves its block away from `step.to` is overridden: the
/// block is put back on its committed cell and a warning is logged.
pub fn commit(
    spatial: &mut SpatialRegistry,
    set: &ExpandedSet,
    push: bool,
    base_transition_secs: f32,
    sink: &mut dyn TransitionSink,
) -> Result<Vec<BlockId>, RegistryError> {
    let order = match CommitPlan::for_set(spatial, set) {
        CommitPlan::Ordered(order) => {
            for (n, id) in order.iter().enumerate() {
                let to = set.members[id].to;
                if let Err(e) = spatial.relocate(*id, to) {
                    rollback(spatial, set, order[..n].iter().copied());
                    return Err(e);
                }
            }
            order
        }
        CommitPlan::TwoPhase => {
            debug!("cyclic dependency among {} blocks, using two-phase commit", set.len());
            for id in set.ids() {
                if let Err(e) = spatial.vacate(id) {
                    rollback(spatial, set, set.ids());
                    return Err(e);
                }
            }
            for (id, member) in set.iter() {
                if let Err(e) = spatial.place(id, member.to) {
                    rollback(spatial, set, set.ids());
                    return Err(e);
                }
            }
            set.ids().collect()
        }
    };

    for id in &order {
        let member = set.members[id];
        let step = MoveStep {
            block: *id,
            from: member.from,
            to: member.to,
            direction: set.direction,
            distance: set.distance,
            pushed: member.pushed || push,
            base_transition_secs,
        };
        if let Some(block) = spatial.get_mut(*id) {
            if !block.execute_move(&step, sink) {
                warn!("block {id} reported failure from execute_move after commit");
            }
            if block.position() != member.to {
                warn!(
                    "block {id} changed its position to {} in execute_move, resetting to {}",
                    block.position(),
                    member.to
                );
                block.set_position(member.to);
            }
        }
    }
    debug!(
        "committed move of {} blocks by {} x{}",
        order.len(),
        set.direction,
        set.distance
    );
    Ok(order)
}

/// Return `moved` members to their origin cells.
///
/// Members that were only vacated are restored too.
fn rollback(
    spatial: &mut SpatialRegistry,
    set: &ExpandedSet,
    moved: impl Iterator<Item = BlockId> + Clone,
) {
    error!("occupancy conflict during commit, rolling back");
    for id in moved.clone() {
        if let Err(e) = spatial.vacate(id) {
            error!("rollback could not vacate block {id}: {e}");
        }
    }
    for id in moved {
        if let Err(e) = spatial.place(id, set.members[&id].from) {
            error!("rollback failed for block {id}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpush_core::{BlockEntity, BlockKind, StandardBlock, TransitionRequest};

    /// Hand-built set with the given `(id, from, to)` members.
    fn manual_set(moves: &[(u64, Cell, Cell)]) -> ExpandedSet {
        ExpandedSet {
            direction: RIGHT,
            distance: 1,
            members: moves
                .iter()
                .map(|&(id, from, to)| {
                    let member = Member {
                        from,
                        to,
                        pushed: false,
                    };
                    (BlockId(id), member)
                })
                .collect(),
        }
    }

    /// Moves itself one cell further than asked from inside the hook.
    #[derive(Debug)]
    struct Overshooter {
        at: Cell,
    }

    impl BlockEntity for Overshooter {
        fn id(&self) -> BlockId {
            BlockId(0)
        }

        fn type_name(&self) -> &str {
            "Overshooter"
        }

        fn position(&self) -> Cell {
            self.at
        }

        fn set_position(&mut self, cell: Cell) {
            self.at = cell;
        }

        fn weight_factor(&self) -> f32 {
            1.0
        }

        fn execute_move(&mut self, step: &MoveStep, _sink: &mut dyn TransitionSink) -> bool {
            self.at = step.to + step.direction;
            true
        }
    }

    fn world(cells: &[(i32, i32, i32)]) -> SpatialRegistry {
        let mut reg = SpatialRegistry::new();
        for (i, &(x, y, z)) in cells.iter().enumerate() {
            let b = StandardBlock::new(BlockId(i as u64), BlockKind::Basic, Cell::new(x, y, z));
            reg.register(Box::new(b)).unwrap();
        }
        reg
    }

    const RIGHT: Cell = Cell::new(1, 0, 0);

    #[test]
    fn expand_follows_chain() {
        let reg = world(&[(0, 0, 0), (1, 0, 0), (2, 0, 0), (4, 0, 0)]);
        let groups = GroupRegistry::new();
        let set = expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 1, 100).unwrap();
        let ids: Vec<_> = set.ids().collect();
        assert_eq!(ids, vec![BlockId(0), BlockId(1), BlockId(2)]);
        assert!(!set.member(BlockId(0)).unwrap().pushed);
        assert!(set.member(BlockId(2)).unwrap().pushed);
    }

    #[test]
    fn expand_with_distance_checks_destination_only() {
        let reg = world(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)]);
        let groups = GroupRegistry::new();
        let set = expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 2, 100).unwrap();
        // (0 -> 2) hits block 2; (2 -> 4) is free. Block 1 is jumped over.
        let ids: Vec<_> = set.ids().collect();
        assert_eq!(ids, vec![BlockId(0), BlockId(2)]);
    }

    #[test]
    fn expand_pulls_in_groups_of_pushed_blocks() {
        let reg = world(&[(0, 0, 0), (1, 0, 0), (1, 5, 0)]);
        let mut groups = GroupRegistry::new();
        groups.assign(BlockId(1), Some(GroupId(7)));
        groups.assign(BlockId(2), Some(GroupId(7)));
        let set = expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 1, 100).unwrap();
        assert!(set.contains(BlockId(2)));
        assert!(set.member(BlockId(2)).unwrap().pushed);
    }

    #[test]
    fn expand_rejects_null_and_unknown() {
        let reg = world(&[(0, 0, 0)]);
        let groups = GroupRegistry::new();
        assert_eq!(
            expand(&reg, &groups, Seed::Block(BlockId(0)), Cell::ORIGIN, 1, 10),
            Err(RejectReason::NullMove)
        );
        assert_eq!(
            expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 0, 10),
            Err(RejectReason::NullMove)
        );
        assert_eq!(
            expand(&reg, &groups, Seed::Block(BlockId(9)), RIGHT, 1, 10),
            Err(RejectReason::UnknownBlock(BlockId(9)))
        );
        assert_eq!(
            expand(&reg, &groups, Seed::Group(GroupId(1)), RIGHT, 1, 10),
            Err(RejectReason::UnknownGroup(GroupId(1)))
        );
    }

    #[test]
    fn expand_respects_limit() {
        let reg = world(&[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)]);
        let groups = GroupRegistry::new();
        assert_eq!(
            expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 1, 3),
            Err(RejectReason::TooLarge { limit: 3 })
        );
        assert!(expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 1, 4).is_ok());
    }

    #[test]
    fn expand_detects_overflow() {
        let reg = world(&[(i32::MAX, 0, 0)]);
        let groups = GroupRegistry::new();
        assert_eq!(
            expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 1, 10),
            Err(RejectReason::OutOfRange(BlockId(0)))
        );
    }

    #[test]
    fn commit_plan_is_far_end_first() {
        let reg = world(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)]);
        let groups = GroupRegistry::new();
        let set = expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 1, 100).unwrap();
        assert_eq!(
            CommitPlan::for_set(&reg, &set),
            CommitPlan::Ordered(vec![BlockId(2), BlockId(1), BlockId(0)])
        );
    }

    #[test]
    fn independent_members_keep_discovery_order() {
        let reg = world(&[(0, 0, 0), (0, 3, 0)]);
        let mut groups = GroupRegistry::new();
        groups.assign(BlockId(0), Some(GroupId(1)));
        groups.assign(BlockId(1), Some(GroupId(1)));
        let set = expand(&reg, &groups, Seed::Group(GroupId(1)), RIGHT, 1, 100).unwrap();
        assert_eq!(
            CommitPlan::for_set(&reg, &set),
            CommitPlan::Ordered(vec![BlockId(0), BlockId(1)])
        );
    }

    #[test]
    fn commit_moves_chain_and_requests_transitions() {
        let mut reg = world(&[(0, 0, 0), (1, 0, 0)]);
        let groups = GroupRegistry::new();
        let set = expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 1, 100).unwrap();
        assert_eq!(set.first_blocker(&reg), None);

        let mut sink: Vec<TransitionRequest> = Vec::new();
        let order = commit(&mut reg, &set, false, 0.2, &mut sink).unwrap();
        assert_eq!(order, vec![BlockId(1), BlockId(0)]);
        assert_eq!(reg.position_of(BlockId(0)), Some(Cell::new(1, 0, 0)));
        assert_eq!(reg.position_of(BlockId(1)), Some(Cell::new(2, 0, 0)));
        assert!(reg.is_consistent());

        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].block, BlockId(1));
        assert!(sink[0].pushed);
        assert_eq!(sink[1].block, BlockId(0));
        assert!(!sink[1].pushed);
    }

    // ── Two-phase commit and rollback ──────────────────────────────

    #[test]
    fn swap_uses_two_phase_commit() {
        let a = Cell::new(0, 0, 0);
        let b = Cell::new(1, 0, 0);
        let mut reg = world(&[(0, 0, 0), (1, 0, 0)]);
        let set = manual_set(&[(0, a, b), (1, b, a)]);
        assert_eq!(CommitPlan::for_set(&reg, &set), CommitPlan::TwoPhase);

        let mut sink: Vec<TransitionRequest> = Vec::new();
        let order = commit(&mut reg, &set, false, 0.2, &mut sink).unwrap();
        assert_eq!(order, vec![BlockId(0), BlockId(1)]);
        assert_eq!(reg.position_of(BlockId(0)), Some(b));
        assert_eq!(reg.position_of(BlockId(1)), Some(a));
        assert_eq!(reg.id_at(a), Some(BlockId(1)));
        assert_eq!(reg.id_at(b), Some(BlockId(0)));
        assert!(reg.is_consistent());
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn ordered_conflict_rolls_back_moved_members() {
        // Block 0 moves first into a free cell; block 1 then runs into
        // block 2, which is not part of the set.
        let mut reg = world(&[(0, 0, 0), (5, 0, 0), (6, 0, 0)]);
        let set = manual_set(&[
            (0, Cell::new(0, 0, 0), Cell::new(1, 0, 0)),
            (1, Cell::new(5, 0, 0), Cell::new(6, 0, 0)),
        ]);
        assert_eq!(
            CommitPlan::for_set(&reg, &set),
            CommitPlan::Ordered(vec![BlockId(0), BlockId(1)])
        );

        let mut sink: Vec<TransitionRequest> = Vec::new();
        match commit(&mut reg, &set, false, 0.2, &mut sink) {
            Err(RegistryError::OccupancyConflict {
                cell,
                occupant,
                incoming,
            }) => {
                assert_eq!(cell, Cell::new(6, 0, 0));
                assert_eq!(occupant, BlockId(2));
                assert_eq!(incoming, BlockId(1));
            }
            other => panic!("expected OccupancyConflict, got {other:?}"),
        }
        for (id, member) in set.iter() {
            assert_eq!(reg.position_of(id), Some(member.from));
        }
        assert_eq!(reg.id_at(Cell::new(1, 0, 0)), None);
        assert!(reg.is_consistent());
        assert!(sink.is_empty());
    }

    #[test]
    fn two_phase_conflict_restores_every_member() {
        // A swap forces the two-phase plan; block 2's destination is held
        // by block 3, which is not part of the set.
        let mut reg = world(&[(0, 0, 0), (1, 0, 0), (5, 0, 0), (6, 0, 0)]);
        let set = manual_set(&[
            (0, Cell::new(0, 0, 0), Cell::new(1, 0, 0)),
            (1, Cell::new(1, 0, 0), Cell::new(0, 0, 0)),
            (2, Cell::new(5, 0, 0), Cell::new(6, 0, 0)),
        ]);
        assert_eq!(CommitPlan::for_set(&reg, &set), CommitPlan::TwoPhase);

        let mut sink: Vec<TransitionRequest> = Vec::new();
        match commit(&mut reg, &set, false, 0.2, &mut sink) {
            Err(RegistryError::OccupancyConflict { cell, .. }) => {
                assert_eq!(cell, Cell::new(6, 0, 0));
            }
            other => panic!("expected OccupancyConflict, got {other:?}"),
        }
        for (id, member) in set.iter() {
            assert_eq!(reg.position_of(id), Some(member.from));
            assert_eq!(reg.id_at(member.from), Some(id));
        }
        assert_eq!(reg.position_of(BlockId(3)), Some(Cell::new(6, 0, 0)));
        assert!(reg.is_consistent());
        assert!(sink.is_empty());
    }

    #[test]
    fn hook_that_moves_its_block_is_reset() {
        let mut reg = SpatialRegistry::new();
        reg.register(Box::new(Overshooter { at: Cell::ORIGIN }))
            .unwrap();
        let groups = GroupRegistry::new();
        let set = expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 1, 10).unwrap();

        let mut sink: Vec<TransitionRequest> = Vec::new();
        commit(&mut reg, &set, false, 0.2, &mut sink).unwrap();
        assert_eq!(reg.position_of(BlockId(0)), Some(Cell::new(1, 0, 0)));
        assert_eq!(reg.id_at(Cell::new(1, 0, 0)), Some(BlockId(0)));
        assert!(reg.is_consistent());
    }

    #[test]
    fn first_blocker_reports_immovable_member() {
        let mut reg = world(&[(0, 0, 0)]);
        let wall = StandardBlock::new(BlockId(5), BlockKind::Immobile, Cell::new(1, 0, 0));
        reg.register(Box::new(wall)).unwrap();
        let groups = GroupRegistry::new();
        let set = expand(&reg, &groups, Seed::Block(BlockId(0)), RIGHT, 1, 100).unwrap();
        assert_eq!(set.first_blocker(&reg), Some(BlockId(5)));
        assert_eq!(reg.get(BlockId(5)).map(|b| b.type_name()), Some("Immobile"));
    }

    #[test]
    fn reject_reason_display() {
        assert_eq!(
            RejectReason::TooLarge { limit: 4 }.to_string(),
            "move displaces more than 4 blocks"
        );
    }
}
