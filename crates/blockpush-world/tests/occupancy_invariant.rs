//! Property tests: random levels driven by random move sequences.
//!
//! Whatever the resolver decides, no two blocks may ever share a cell, the
//! two indices of the spatial registry must agree, group membership must
//! stay symmetric, and a refused move must leave the world unchanged.

use std::collections::HashSet;

use blockpush_core::{BlockEntity, BlockId, BlockKind, Cell, Direction, GroupId};
use blockpush_test_utils::fixtures::block;
use blockpush_world::WorldState;
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = BlockKind> {
    prop_oneof![
        6 => Just(BlockKind::Basic),
        2 => Just(BlockKind::Heavy),
        1 => Just(BlockKind::Ice),
        1 => Just(BlockKind::Immobile),
    ]
}

fn level_strategy() -> impl Strategy<Value = Vec<([i32; 3], BlockKind, i64)>> {
    prop::collection::vec(
        ([0i32..5, 0i32..3, 0i32..3], kind_strategy(), -1i64..3),
        1..24,
    )
}

fn move_strategy() -> impl Strategy<Value = Vec<(usize, usize, u32, bool)>> {
    prop::collection::vec((0usize..24, 0usize..6, 1u32..3, any::<bool>()), 0..40)
}

fn build(level: &[([i32; 3], BlockKind, i64)]) -> WorldState {
    let mut world = WorldState::default();
    let mut taken = HashSet::new();
    for (i, (at, kind, group)) in level.iter().enumerate() {
        if !taken.insert(*at) {
            continue;
        }
        let id = world.insert(block(i as u64, *kind, *at)).unwrap();
        world.assign_group_raw(id, *group).unwrap();
    }
    world
}

fn distinct_positions(world: &WorldState) -> bool {
    let cells: HashSet<Cell> = world.spatial().iter().map(|b| b.position()).collect();
    cells.len() == world.block_count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn occupancy_is_never_shared(level in level_strategy(), moves in move_strategy()) {
        let mut world = build(&level);
        let ids: Vec<BlockId> = world.spatial().ids().collect();
        for (pick, dir, distance, push) in moves {
            let id = ids[pick % ids.len()];
            let direction = Direction::ALL[dir];

            let before = world.snapshot();
            let feasible = world.can_move(id, direction, distance);
            prop_assert_eq!(world.can_move(id, direction, distance), feasible);

            let moved = world.move_block(id, direction, distance, push);
            prop_assert_eq!(moved, feasible);
            if !moved {
                prop_assert_eq!(world.snapshot(), before);
            }

            prop_assert!(distinct_positions(&world));
            prop_assert!(world.spatial().is_consistent());
            prop_assert!(world.groups().is_symmetric());
        }
    }

    #[test]
    fn committed_move_translates_exactly_the_expanded_set(
        level in level_strategy(),
        pick in 0usize..24,
        dir in 0usize..6,
    ) {
        let mut world = build(&level);
        let ids: Vec<BlockId> = world.spatial().ids().collect();
        let id = ids[pick % ids.len()];
        let direction = Direction::ALL[dir];

        let Ok(set) = world.expanded_set(blockpush_world::Seed::Block(id), direction, 1) else {
            return Ok(());
        };
        let before = world.snapshot();
        if !world.move_block(id, direction, 1, false) {
            return Ok(());
        }
        for p in before.placements() {
            let now = world.block(p.block).map(|b| b.position());
            if set.contains(p.block) {
                prop_assert_eq!(now, Some(p.cell + direction.offset()));
            } else {
                prop_assert_eq!(now, Some(p.cell));
            }
        }
    }

    #[test]
    fn group_members_share_their_displacement(
        level in level_strategy(),
        dir in 0usize..6,
        distance in 1u32..3,
    ) {
        let mut world = build(&level);
        let Some(group) = world.groups().group_ids().next() else {
            return Ok(());
        };
        let members: Vec<BlockId> = world.members_of(group).unwrap().collect();
        let before = world.snapshot();
        let direction = Direction::ALL[dir];
        if world.move_group(group, direction, distance, false) {
            let delta = direction.offset() * distance as i32;
            for m in members {
                let was = before.placement(m).map(|p| p.cell);
                prop_assert_eq!(was.map(|c| c + delta), world.block(m).map(|b| b.position()));
            }
        } else {
            prop_assert_eq!(world.snapshot(), before);
        }
        prop_assert!(world.members_of(GroupId(u32::MAX)).is_err());
    }
}
