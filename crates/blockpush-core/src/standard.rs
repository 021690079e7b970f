//! Built-in block palette.
//!
//! [`StandardBlock`] is the factory output for the stock block types. Games
//! with richer blocks implement [`BlockEntity`] directly.

use std::fmt;
use std::str::FromStr;

use crate::block::{is_pushable_weight, BlockEntity};
use crate::cell::Cell;
use crate::id::BlockId;

/// Stock block types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Ordinary pushable block.
    Basic,
    /// Pushable, twice as slow.
    Heavy,
    /// Pushable, slides quickly.
    Ice,
    /// Trap block; pushable like a basic block.
    SpikeTrap,
    /// Never moves.
    Immobile,
    /// Player start marker; fixed.
    Start,
    /// Goal marker; fixed.
    Goal,
}

impl BlockKind {
    /// Every kind, in palette order.
    pub const ALL: [BlockKind; 7] = [
        BlockKind::Basic,
        BlockKind::Heavy,
        BlockKind::Ice,
        BlockKind::SpikeTrap,
        BlockKind::Immobile,
        BlockKind::Start,
        BlockKind::Goal,
    ];

    /// Palette name, as stored in level files.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Basic => "Basic",
            BlockKind::Heavy => "Heavy",
            BlockKind::Ice => "Ice",
            BlockKind::SpikeTrap => "SpikeTrap",
            BlockKind::Immobile => "Immobile",
            BlockKind::Start => "Start",
            BlockKind::Goal => "Goal",
        }
    }

    /// Default weight factor for the kind.
    pub fn default_weight(self) -> f32 {
        match self {
            BlockKind::Basic | BlockKind::SpikeTrap => 1.0,
            BlockKind::Heavy => 2.0,
            BlockKind::Ice => 0.5,
            BlockKind::Immobile | BlockKind::Start | BlockKind::Goal => 0.0,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown block type '{s}'"))
    }
}

/// A stock block: a kind, a cell, a weight, and an optional pin.
///
/// # Examples
///
/// ```
/// use blockpush_core::{BlockEntity, BlockId, BlockKind, Cell, StandardBlock};
///
/// let b = StandardBlock::new(BlockId(1), BlockKind::Heavy, Cell::new(0, 1, 0));
/// assert_eq!(b.type_name(), "Heavy");
/// assert_eq!(b.weight_factor(), 2.0);
/// assert!(b.can_be_moved(Cell::new(1, 0, 0), 1));
/// assert!(!b.pinned().can_be_moved(Cell::new(1, 0, 0), 1));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StandardBlock {
    id: BlockId,
    kind: BlockKind,
    position: Cell,
    weight_factor: f32,
    pinned: bool,
}

impl StandardBlock {
    /// Create a block of `kind` at `position` with the kind's default weight.
    pub fn new(id: BlockId, kind: BlockKind, position: Cell) -> Self {
        Self {
            id,
            kind,
            position,
            weight_factor: kind.default_weight(),
            pinned: false,
        }
    }

    /// Override the weight factor.
    pub fn with_weight(mut self, weight_factor: f32) -> Self {
        self.weight_factor = weight_factor;
        self
    }

    /// Pin the block so it can never be moved.
    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// The block's kind.
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Whether the block is pinned.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Change the weight factor in place.
    pub fn set_weight_factor(&mut self, weight_factor: f32) {
        self.weight_factor = weight_factor;
    }
}

impl BlockEntity for StandardBlock {
    fn id(&self) -> BlockId {
        self.id
    }

    fn type_name(&self) -> &str {
        self.kind.name()
    }

    fn position(&self) -> Cell {
        self.position
    }

    fn set_position(&mut self, cell: Cell) {
        self.position = cell;
    }

    fn weight_factor(&self) -> f32 {
        self.weight_factor
    }

    fn can_be_moved(&self, _direction: Cell, _distance: u32) -> bool {
        !self.pinned && is_pushable_weight(self.weight_factor)
    }
}
