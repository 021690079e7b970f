//! The [`BlockEntity`] capability contract.

use std::fmt;

use crate::cell::Cell;
use crate::command::{MoveStep, TransitionRequest};
use crate::id::BlockId;
use crate::traits::TransitionSink;

/// Whether a weight factor allows the block to be pushed.
///
/// Zero, negative, and non-finite weights all mean "not movable by push".
/// Negative weights carry no reverse mechanics.
pub fn is_pushable_weight(weight: f32) -> bool {
    weight.is_finite() && weight > 0.0
}

/// A rigid unit occupying exactly one grid cell.
///
/// Implementations are registered once as `Box<dyn BlockEntity>` and the
/// world dispatches through this trait; there is no runtime type probing.
///
/// Position is owned by the spatial registry. `set_position` is only
/// called by the registry itself, so `position()` always agrees with the
/// cell index outside of a commit.
pub trait BlockEntity: fmt::Debug {
    /// Stable identity.
    fn id(&self) -> BlockId;

    /// Palette name of the block type (e.g. `"Basic"`), used for
    /// type-filtered enumeration.
    fn type_name(&self) -> &str;

    /// Current cell.
    fn position(&self) -> Cell;

    /// Record a new cell. Called by the registry only.
    fn set_position(&mut self, cell: Cell);

    /// Multiplier on how slowly the block moves. See [`is_pushable_weight`].
    fn weight_factor(&self) -> f32;

    /// Local movability predicate, independent of grouping.
    ///
    /// The default applies the weight policy only. Implementations add
    /// pinning flags or external blockers here.
    fn can_be_moved(&self, direction: Cell, distance: u32) -> bool {
        let _ = (direction, distance);
        is_pushable_weight(self.weight_factor())
    }

    /// Presentation hook run after the registry committed `step.to`.
    ///
    /// Feasibility has already been established, so this must not
    /// re-validate and must not fail for the step it is given. The
    /// registry owns the block's cell: the hook must not call
    /// `set_position`, and a block found off `step.to` afterwards is put
    /// back there with a warning. The default
    /// issues one transition whose duration is
    /// `base_transition_secs * weight_factor * distance`.
    fn execute_move(&mut self, step: &MoveStep, sink: &mut dyn TransitionSink) -> bool {
        sink.request_transition(TransitionRequest {
            block: step.block,
            from: step.from,
            to: step.to,
            duration_secs: transition_duration(step, self.weight_factor()),
            pushed: step.pushed,
        });
        true
    }
}

/// Duration of the transition for `step` at the given weight.
pub(crate) fn transition_duration(step: &MoveStep, weight: f32) -> f32 {
    step.base_transition_secs * weight.max(0.0) * step.distance as f32
}
