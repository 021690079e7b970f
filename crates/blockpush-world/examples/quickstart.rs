//! blockpush quickstart: a small level, a custom block, and undo.
//!
//! Demonstrates:
//!   1. Building a WorldState and spawning stock blocks
//!   2. Implementing BlockEntity for a game-specific block
//!   3. Grouping blocks and listening for highlight changes
//!   4. Pushing chains, reading outcomes, and printing transitions
//!   5. Undoing with snapshot / restore
//!
//! Run with:
//!   cargo run --example quickstart

use blockpush_core::{
    BlockEntity, BlockId, BlockKind, Cell, Direction, GroupId, GroupObserver, MoveRequest,
    TransitionRequest, TransitionSink,
};
use blockpush_world::{MoveOutcome, WorldConfig, WorldState};

// ─── A game-specific block ──────────────────────────────────────
//
// A crate that can only slide along the floor: vertical moves are refused
// locally, independent of grouping.

#[derive(Debug)]
struct FloorCrate {
    id: BlockId,
    at: Cell,
}

impl BlockEntity for FloorCrate {
    fn id(&self) -> BlockId {
        self.id
    }

    fn type_name(&self) -> &str {
        "FloorCrate"
    }

    fn position(&self) -> Cell {
        self.at
    }

    fn set_position(&mut self, cell: Cell) {
        self.at = cell;
    }

    fn weight_factor(&self) -> f32 {
        1.5
    }

    fn can_be_moved(&self, direction: Cell, _distance: u32) -> bool {
        direction.y == 0
    }
}

// ─── Presentation hooks ─────────────────────────────────────────

struct PrintSink;

impl TransitionSink for PrintSink {
    fn request_transition(&mut self, r: TransitionRequest) {
        println!(
            "  animate block {} {} -> {} over {:.2}s{}",
            r.block,
            r.from,
            r.to,
            r.duration_secs,
            if r.pushed { " (pushed)" } else { "" }
        );
    }
}

struct PrintObserver;

impl GroupObserver for PrintObserver {
    fn highlight_group(&mut self, block: BlockId, group: GroupId) {
        println!("  outline block {block} in group {group} colour");
    }

    fn clear_highlight(&mut self, block: BlockId) {
        println!("  clear outline of block {block}");
    }
}

fn report(label: &str, outcome: &MoveOutcome) {
    match outcome {
        MoveOutcome::Committed { moved } => println!("{label}: moved {} blocks", moved.len()),
        MoveOutcome::Blocked { blocker } => println!("{label}: blocked by block {blocker}"),
        MoveOutcome::Rejected(reason) => println!("{label}: rejected ({reason})"),
    }
}

fn main() {
    let mut world = WorldState::new(WorldConfig::default()).expect("default config is valid");
    world.set_transition_sink(Box::new(PrintSink));
    world.set_group_observer(Box::new(PrintObserver));

    // ─── Level ──────────────────────────────────────────────────
    //
    //   x: 0     1     2     3     4
    //      [B]  [B]  [FC]        [##]
    let a = world.spawn(BlockKind::Basic, Cell::new(0, 0, 0)).expect("free cell");
    let b = world.spawn(BlockKind::Basic, Cell::new(1, 0, 0)).expect("free cell");
    let fc = world.next_block_id();
    world
        .insert(Box::new(FloorCrate {
            id: fc,
            at: Cell::new(2, 0, 0),
        }))
        .expect("free cell");
    world.spawn(BlockKind::Immobile, Cell::new(4, 0, 0)).expect("free cell");

    println!("grouping a and b:");
    world.assign_group(a, Some(GroupId(1))).expect("a is registered");
    world.assign_group(b, Some(GroupId(1))).expect("b is registered");

    let start = world.snapshot();

    // ─── Moves ──────────────────────────────────────────────────

    report("push right", &world.resolve(&MoveRequest::new(a, Direction::Right, 1)));
    report("push right again", &world.resolve(&MoveRequest::new(a, Direction::Right, 1)));
    report("lift the floor crate", &world.resolve(&MoveRequest::new(fc, Direction::Up, 1)));
    report("lift the group", &world.resolve(&MoveRequest::new(b, Direction::Up, 2).pushed()));

    // ─── Undo ───────────────────────────────────────────────────

    world.restore(&start).expect("snapshot matches the world");
    assert_eq!(world.snapshot(), start);
    let home = world.block(a).map(|b| b.position()).unwrap_or_default();
    println!("restored: block {a} back at {home}");
}
