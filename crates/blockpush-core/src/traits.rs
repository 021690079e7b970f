//! Outbound traits toward the presentation layer.
//!
//! The core never plays animations or draws outlines itself. It reports
//! what happened through these two traits and moves on.

use crate::command::TransitionRequest;
use crate::id::{BlockId, GroupId};

/// Receives visual transition requests for committed moves.
pub trait TransitionSink {
    /// Queue a transition. Must not call back into the world.
    fn request_transition(&mut self, request: TransitionRequest);
}

/// Collects requests in order; handy for tests and batch playback.
impl TransitionSink for Vec<TransitionRequest> {
    fn request_transition(&mut self, request: TransitionRequest) {
        self.push(request);
    }
}

/// Notified when a block's group membership changes.
pub trait GroupObserver {
    /// `block` joined `group`; typically outlines it in the group colour.
    fn highlight_group(&mut self, block: BlockId, group: GroupId);

    /// `block` left its group.
    fn clear_highlight(&mut self, block: BlockId) {
        let _ = block;
    }
}

/// A [`TransitionSink`] that drops every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TransitionSink for NullSink {
    fn request_transition(&mut self, _request: TransitionRequest) {}
}

/// A [`GroupObserver`] that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl GroupObserver for NullObserver {
    fn highlight_group(&mut self, _block: BlockId, _group: GroupId) {}
}
