//! Benchmark levels and utilities for blockpush.
//!
//! Provides deterministic level builders for benchmarking:
//!
//! - [`chain_level`]: a single row of pushable blocks along `+x`
//! - [`slab_level`]: a square slab of blocks that all share one group
//! - [`random_level`]: a seeded scatter of mixed blocks and groups

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use blockpush_core::{BlockKind, Cell, GroupId};
use blockpush_world::{WorldConfig, WorldState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shape and mix of a [`random_level`].
#[derive(Clone, Debug, PartialEq)]
pub struct LevelProfile {
    /// Extent along x, y and z. Cells are in `0..extent` on each axis.
    pub extent: [i32; 3],
    /// Fraction of cells holding a block.
    pub density: f64,
    /// Fraction of blocks that are `Immobile`.
    pub immobile_ratio: f64,
    /// Fraction of blocks assigned to a group.
    pub grouped_ratio: f64,
    /// Number of distinct groups to draw from.
    pub group_count: u32,
}

impl LevelProfile {
    /// 32x8x32 grid at 30% density (~2.5K blocks).
    pub fn reference() -> Self {
        Self {
            extent: [32, 8, 32],
            density: 0.3,
            immobile_ratio: 0.05,
            grouped_ratio: 0.2,
            group_count: 64,
        }
    }

    /// 64x16x64 grid at 40% density (~26K blocks).
    pub fn stress() -> Self {
        Self {
            extent: [64, 16, 64],
            density: 0.4,
            immobile_ratio: 0.05,
            grouped_ratio: 0.3,
            group_count: 256,
        }
    }
}

/// A row of `len` basic blocks from the origin along `+x`.
///
/// Pushing block 0 to the right displaces the whole row.
///
/// # Panics
///
/// If `len` does not fit in `i32`.
pub fn chain_level(len: usize) -> WorldState {
    let len = i32::try_from(len).expect("chain length fits in i32");
    let mut world = WorldState::default();
    for x in 0..len {
        world
            .spawn(BlockKind::Basic, Cell::new(x, 0, 0))
            .expect("chain cells are distinct");
    }
    world
}

/// A `side x side` slab of basic blocks in the `y = 0` plane, all in
/// group 0.
///
/// # Panics
///
/// If `side` does not fit in `i32`.
pub fn slab_level(side: usize) -> WorldState {
    let side = i32::try_from(side).expect("slab side fits in i32");
    let mut world = WorldState::default();
    for x in 0..side {
        for z in 0..side {
            let id = world
                .spawn(BlockKind::Basic, Cell::new(x, 0, z))
                .expect("slab cells are distinct");
            world
                .assign_group(id, Some(GroupId(0)))
                .expect("spawned block is registered");
        }
    }
    world
}

/// A deterministic random level. The same `seed` always yields the same
/// blocks, ids and groups.
pub fn random_level(profile: &LevelProfile, seed: u64) -> WorldState {
    let config = WorldConfig {
        max_expansion: usize::MAX,
        ..WorldConfig::default()
    };
    let mut world = WorldState::new(config).expect("bench config is valid");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let [ex, ey, ez] = profile.extent;
    for x in 0..ex {
        for y in 0..ey {
            for z in 0..ez {
                if !rng.random_bool(profile.density) {
                    continue;
                }
                let kind = if rng.random_bool(profile.immobile_ratio) {
                    BlockKind::Immobile
                } else {
                    match rng.random_range(0..8) {
                        0 => BlockKind::Heavy,
                        1 => BlockKind::Ice,
                        _ => BlockKind::Basic,
                    }
                };
                let id = world
                    .spawn(kind, Cell::new(x, y, z))
                    .expect("grid cells are distinct");
                if profile.group_count > 0 && rng.random_bool(profile.grouped_ratio) {
                    let group = GroupId(rng.random_range(0..profile.group_count));
                    world
                        .assign_group(id, Some(group))
                        .expect("spawned block is registered");
                }
            }
        }
    }
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpush_core::{BlockId, Direction};

    #[test]
    fn chain_level_pushes_end_to_end() {
        let mut world = chain_level(16);
        assert_eq!(world.block_count(), 16);
        assert!(world.move_block(BlockId(0), Direction::Right, 1, false));
        assert!(world.block_at(Cell::new(16, 0, 0)).is_some());
        assert!(world.block_at(Cell::ORIGIN).is_none());
    }

    #[test]
    fn slab_level_is_one_group() {
        let world = slab_level(4);
        assert_eq!(world.groups().group_count(), 1);
        assert_eq!(world.members_of(GroupId(0)).unwrap().len(), 16);
    }

    #[test]
    fn random_level_is_deterministic() {
        let profile = LevelProfile::reference();
        let a = random_level(&profile, 42);
        let b = random_level(&profile, 42);
        assert_eq!(a.snapshot(), b.snapshot());
        assert!(a.block_count() > 0);
        assert!(a.spatial().is_consistent());
        assert!(a.groups().is_symmetric());
    }

    #[test]
    fn full_density_fills_every_cell() {
        let profile = LevelProfile {
            extent: [4, 3, 5],
            density: 1.0,
            immobile_ratio: 0.0,
            grouped_ratio: 1.0,
            group_count: 3,
        };
        let world = random_level(&profile, 7);
        assert_eq!(world.block_count(), 4 * 3 * 5);
        assert_eq!(world.groups().grouped_block_count(), 4 * 3 * 5);
    }

    #[test]
    fn random_level_depends_on_seed() {
        let profile = LevelProfile::reference();
        assert_ne!(
            random_level(&profile, 1).snapshot(),
            random_level(&profile, 2).snapshot()
        );
    }
}
