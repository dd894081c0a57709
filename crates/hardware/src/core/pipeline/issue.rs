//! Per-class issue queues.
//!
//! Three bounded FIFOs, one per issue class. Instructions enter at decode time
//! and leave exactly once, at dispatch, in strict program order within a class.
//! A full queue refuses an instruction and hands it back; it is never dropped
//! or truncated.

use std::collections::VecDeque;

use crate::common::error::AdmitError;
use crate::config::Config;
use crate::isa::instruction::{Instruction, IssueClass};

/// Instruction refused by a full queue, returned to the caller for retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Refused {
    /// Class whose queue was full.
    pub class: IssueClass,
    /// The instruction, unchanged.
    pub instr: Instruction,
}

impl Refused {
    /// Admission error equivalent of this refusal.
    pub const fn error(&self) -> AdmitError {
        AdmitError::QueueFull(self.class)
    }
}

/// One bounded FIFO.
#[derive(Clone, Debug)]
struct BoundedQueue {
    entries: VecDeque<Instruction>,
    capacity: usize,
}

/// The VectorCompute, VectorData and ScalarOps queues.
#[derive(Clone, Debug)]
pub struct IssueQueues {
    queues: [BoundedQueue; 3],
}

impl IssueQueues {
    /// Creates empty queues with the given depths, indexed as `IssueClass::ALL`.
    pub fn new(depths: [usize; 3]) -> Self {
        Self {
            queues: depths.map(|capacity| BoundedQueue {
                entries: VecDeque::with_capacity(capacity),
                capacity,
            }),
        }
    }

    /// Creates empty queues sized from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(IssueClass::ALL.map(|class| config.queue_depth(class)))
    }

    /// Whether the queue for `class` can accept another instruction.
    pub fn has_room(&self, class: IssueClass) -> bool {
        let q = &self.queues[class.index()];
        q.entries.len() < q.capacity
    }

    /// Appends `instr` to the queue of its class.
    pub fn enqueue(&mut self, instr: Instruction) -> Result<(), Refused> {
        let class = instr.class;
        if !self.has_room(class) {
            return Err(Refused { class, instr });
        }
        self.queues[class.index()].entries.push_back(instr);
        Ok(())
    }

    /// Removes and returns the head of the queue for `class`.
    pub fn dequeue(&mut self, class: IssueClass) -> Option<Instruction> {
        self.queues[class.index()].entries.pop_front()
    }

    /// Head of the queue for `class`, without removing it.
    pub fn peek(&self, class: IssueClass) -> Option<&Instruction> {
        self.queues[class.index()].entries.front()
    }

    /// Number of queued instructions of `class`.
    pub fn len(&self, class: IssueClass) -> usize {
        self.queues[class.index()].entries.len()
    }

    /// Configured depth of the queue for `class`.
    pub fn capacity(&self, class: IssueClass) -> usize {
        self.queues[class.index()].capacity
    }

    /// Whether every queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(|q| q.entries.is_empty())
    }

    /// Every queued instruction, compute queue first.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> + '_ {
        self.queues.iter().flat_map(|q| q.entries.iter())
    }
}
