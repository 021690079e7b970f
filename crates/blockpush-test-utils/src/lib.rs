//! Test utilities and mock types for blockpush development.
//!
//! Provides a configurable [`MockBlock`], a [`RecordingSink`] and a
//! [`RecordingObserver`] whose buffers stay readable after they are boxed
//! into a world, and level [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use blockpush_core::{
    is_pushable_weight, BlockEntity, BlockId, Cell, GroupId, GroupObserver, MoveStep,
    TransitionRequest, TransitionSink,
};

/// Shared log of the steps a [`MockBlock`] executed.
pub type MoveLog = Rc<RefCell<Vec<MoveStep>>>;

/// A block whose movability and name are set by the test.
///
/// Every `execute_move` call is appended to its [`MoveLog`], and every
/// `can_be_moved` call bumps a shared counter, so tests can check which
/// hooks ran after the block has been boxed into a world.
#[derive(Debug)]
pub struct MockBlock {
    id: BlockId,
    position: Cell,
    weight: f32,
    movable: bool,
    type_name: String,
    log: MoveLog,
    checks: Rc<std::cell::Cell<usize>>,
}

impl MockBlock {
    /// A movable unit-weight block named `"Mock"`.
    pub fn new(id: u64, position: impl Into<Cell>) -> Self {
        Self {
            id: BlockId(id),
            position: position.into(),
            weight: 1.0,
            movable: true,
            type_name: "Mock".to_owned(),
            log: MoveLog::default(),
            checks: Rc::default(),
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Refuse every move regardless of weight.
    pub fn immovable(mut self) -> Self {
        self.movable = false;
        self
    }

    pub fn named(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Record into `log` instead of a private buffer.
    pub fn with_log(mut self, log: MoveLog) -> Self {
        self.log = log;
        self
    }

    /// Handle to the executed-step log.
    pub fn move_log(&self) -> MoveLog {
        Rc::clone(&self.log)
    }

    /// Handle to the `can_be_moved` call counter.
    pub fn check_counter(&self) -> Rc<std::cell::Cell<usize>> {
        Rc::clone(&self.checks)
    }

    /// Box for registration.
    pub fn boxed(self) -> Box<dyn BlockEntity> {
        Box::new(self)
    }
}

impl BlockEntity for MockBlock {
    fn id(&self) -> BlockId {
        self.id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn position(&self) -> Cell {
        self.position
    }

    fn set_position(&mut self, cell: Cell) {
        self.position = cell;
    }

    fn weight_factor(&self) -> f32 {
        self.weight
    }

    fn can_be_moved(&self, _direction: Cell, _distance: u32) -> bool {
        self.checks.set(self.checks.get() + 1);
        self.movable && is_pushable_weight(self.weight)
    }

    fn execute_move(&mut self, step: &MoveStep, sink: &mut dyn TransitionSink) -> bool {
        self.log.borrow_mut().push(*step);
        sink.request_transition(TransitionRequest {
            block: step.block,
            from: step.from,
            to: step.to,
            duration_secs: step.base_transition_secs * self.weight * step.distance as f32,
            pushed: step.pushed,
        });
        true
    }
}

/// A [`TransitionSink`] whose clones share one buffer.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    requests: Rc<RefCell<Vec<TransitionRequest>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every request received so far, in order.
    pub fn requests(&self) -> Vec<TransitionRequest> {
        self.requests.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.borrow().is_empty()
    }

    /// The blocks that received a request, in order.
    pub fn blocks(&self) -> Vec<BlockId> {
        self.requests.borrow().iter().map(|r| r.block).collect()
    }

    pub fn clear(&self) {
        self.requests.borrow_mut().clear();
    }

    /// Box a shared handle for installation into a world.
    pub fn boxed(&self) -> Box<dyn TransitionSink> {
        Box::new(self.clone())
    }
}

impl TransitionSink for RecordingSink {
    fn request_transition(&mut self, request: TransitionRequest) {
        self.requests.borrow_mut().push(request);
    }
}

/// A single [`GroupObserver`] notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObserverEvent {
    Highlight { block: BlockId, group: GroupId },
    Clear { block: BlockId },
}

/// A [`GroupObserver`] whose clones share one event log.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<ObserverEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.borrow().clone()
    }

    /// Drain and return the events received so far.
    pub fn take(&self) -> Vec<ObserverEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn boxed(&self) -> Box<dyn GroupObserver> {
        Box::new(self.clone())
    }
}

impl GroupObserver for RecordingObserver {
    fn highlight_group(&mut self, block: BlockId, group: GroupId) {
        self.events
            .borrow_mut()
            .push(ObserverEvent::Highlight { block, group });
    }

    fn clear_highlight(&mut self, block: BlockId) {
        self.events.borrow_mut().push(ObserverEvent::Clear { block });
    }
}
