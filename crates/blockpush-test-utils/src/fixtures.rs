//! Reusable block layouts.
//!
//! - [`basic`] / [`block`]: one stock block, boxed for registration.
//! - [`row`]: a contiguous line of stock blocks.
//! - [`mock_row`]: the same line built from [`MockBlock`]s.

use blockpush_core::{BlockEntity, BlockId, BlockKind, Cell, StandardBlock};

use crate::MockBlock;

/// A boxed `Basic` block.
pub fn basic(id: u64, at: impl Into<Cell>) -> Box<dyn BlockEntity> {
    block(id, BlockKind::Basic, at)
}

/// A boxed stock block of `kind`.
pub fn block(id: u64, kind: BlockKind, at: impl Into<Cell>) -> Box<dyn BlockEntity> {
    Box::new(StandardBlock::new(BlockId(id), kind, at.into()))
}

/// `len` stock blocks from `start`, one step apart along `step`, with ids
/// counting up from `first_id`.
pub fn row(
    first_id: u64,
    kind: BlockKind,
    start: impl Into<Cell>,
    step: impl Into<Cell>,
    len: usize,
) -> Vec<Box<dyn BlockEntity>> {
    cells(start.into(), step.into(), len)
        .zip(first_id..)
        .map(|(at, id)| block(id, kind, at))
        .collect()
}

/// Like [`row`], with [`MockBlock`]s for hook inspection.
pub fn mock_row(
    first_id: u64,
    start: impl Into<Cell>,
    step: impl Into<Cell>,
    len: usize,
) -> Vec<MockBlock> {
    cells(start.into(), step.into(), len)
        .zip(first_id..)
        .map(|(at, id)| MockBlock::new(id, at))
        .collect()
}

fn cells(start: Cell, step: Cell, len: usize) -> impl Iterator<Item = Cell> {
    (0..len).scan(start, move |at, _| {
        let here = *at;
        *at = *at + step;
        Some(here)
    })
}
