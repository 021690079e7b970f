//! Move requests, per-block move steps, and transition requests.

use crate::cell::Cell;
use crate::id::BlockId;

/// A request to displace a block (and everything it drags or pushes).
///
/// Ephemeral: it lives for the duration of one resolution call and is
/// never stored by the world.
///
/// # Examples
///
/// ```
/// use blockpush_core::{BlockId, Cell, Direction, MoveRequest};
///
/// let req = MoveRequest::new(BlockId(4), Direction::Right, 2);
/// assert_eq!(req.direction, Cell::new(1, 0, 0));
/// assert_eq!(req.displacement(), Some(Cell::new(2, 0, 0)));
/// assert!(!req.push);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    /// The block the caller wants to move.
    pub origin: BlockId,
    /// Unit (or arbitrary) direction of travel.
    pub direction: Cell,
    /// Number of steps along `direction`. Must be at least 1.
    pub distance: u32,
    /// Whether the origin's own group is being moved as a push.
    pub push: bool,
}

impl MoveRequest {
    /// A non-push request for `origin`.
    pub fn new(origin: BlockId, direction: impl Into<Cell>, distance: u32) -> Self {
        Self {
            origin,
            direction: direction.into(),
            distance,
            push: false,
        }
    }

    /// Mark the request as a push.
    pub fn pushed(mut self) -> Self {
        self.push = true;
        self
    }

    /// The total displacement, or `None` on overflow.
    pub fn displacement(&self) -> Option<Cell> {
        Cell::ORIGIN.displaced(self.direction, self.distance)
    }

    /// Whether the request moves nothing (zero direction or distance).
    pub fn is_null(&self) -> bool {
        self.distance == 0 || self.direction.is_zero()
    }
}

/// The part of a committed move that concerns a single block.
///
/// Handed to [`BlockEntity::execute_move`](crate::BlockEntity::execute_move)
/// after the registry has already placed the block at `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveStep {
    /// The block being moved.
    pub block: BlockId,
    /// Cell before the move.
    pub from: Cell,
    /// Cell after the move.
    pub to: Cell,
    /// Direction of travel.
    pub direction: Cell,
    /// Steps travelled.
    pub distance: u32,
    /// Displaced by another block rather than moved directly.
    pub pushed: bool,
    /// Base duration of a one-step, unit-weight transition, in seconds.
    pub base_transition_secs: f32,
}

/// A visual transition the presentation layer should play.
///
/// Fire-and-forget: the logical position is already committed when the
/// request is issued.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionRequest {
    /// The block to animate.
    pub block: BlockId,
    /// Starting cell.
    pub from: Cell,
    /// Final cell.
    pub to: Cell,
    /// Suggested playback duration in seconds.
    pub duration_secs: f32,
    /// Whether the block was pushed by another block.
    pub pushed: bool,
}
