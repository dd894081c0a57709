//! Execution resource arbitration.
//!
//! Each resource holds at most one instruction until its countdown expires.
//! The arbiter tracks `(busy, remaining)` per resource and the instruction
//! occupying it, so the core can release that instruction's registers when
//! the resource frees up.

use std::fmt;

use crate::isa::instruction::{ComputeResource, Instruction, IssueClass};

/// Execution resources of the vector core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    /// Vector adder.
    Adder,
    /// Vector multiplier.
    Multiplier,
    /// Vector divider.
    Divider,
    /// Vector shuffle unit.
    Shuffle,
    /// Vector memory pipeline.
    Memory,
    /// Scalar pipeline.
    Scalar,
}

impl Resource {
    /// Every resource, in retire order.
    pub const ALL: [Self; 6] = [
        Self::Adder,
        Self::Multiplier,
        Self::Divider,
        Self::Shuffle,
        Self::Memory,
        Self::Scalar,
    ];

    /// Position of the resource in `ALL`.
    pub const fn index(self) -> usize {
        match self {
            Self::Adder => 0,
            Self::Multiplier => 1,
            Self::Divider => 2,
            Self::Shuffle => 3,
            Self::Memory => 4,
            Self::Scalar => 5,
        }
    }

    /// Resource an instruction executes on.
    ///
    /// Compute-class instructions use their vector unit, data-class instructions
    /// the memory pipeline, and every scalar instruction the scalar pipeline.
    pub fn for_instruction(instr: &Instruction) -> Self {
        match instr.class {
            IssueClass::VectorCompute => instr.resource.map_or(Self::Adder, Self::from),
            IssueClass::VectorData => Self::Memory,
            IssueClass::ScalarOps => Self::Scalar,
        }
    }
}

impl From<ComputeResource> for Resource {
    fn from(resource: ComputeResource) -> Self {
        match resource {
            ComputeResource::Adder => Self::Adder,
            ComputeResource::Multiplier => Self::Multiplier,
            ComputeResource::Divider => Self::Divider,
            ComputeResource::Shuffle => Self::Shuffle,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Adder => "adder",
            Self::Multiplier => "multiplier",
            Self::Divider => "divider",
            Self::Shuffle => "shuffle",
            Self::Memory => "memory",
            Self::Scalar => "scalar",
        })
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    busy: bool,
    remaining: u64,
    occupant: Option<Instruction>,
}

/// Busy/countdown state of every resource.
#[derive(Clone, Debug, Default)]
pub struct ResourceArbiter {
    slots: [Slot; 6],
    busy_cycles: [u64; 6],
}

impl ResourceArbiter {
    /// Creates an arbiter with every resource idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `resource` is occupied.
    pub fn is_busy(&self, resource: Resource) -> bool {
        self.slots[resource.index()].busy
    }

    /// Cycles left on `resource`; zero when idle.
    pub fn remaining(&self, resource: Resource) -> u64 {
        self.slots[resource.index()].remaining
    }

    /// Instruction currently occupying `resource`.
    pub fn occupant(&self, resource: Resource) -> Option<&Instruction> {
        self.slots[resource.index()].occupant.as_ref()
    }

    /// Every occupying instruction, in `Resource::ALL` order.
    pub fn occupants(&self) -> impl Iterator<Item = &Instruction> + '_ {
        self.slots.iter().filter_map(|s| s.occupant.as_ref())
    }

    /// Whether every resource is idle.
    pub fn is_idle(&self) -> bool {
        self.slots.iter().all(|s| !s.busy)
    }

    /// Cycles `resource` has spent busy so far.
    pub fn busy_cycles(&self, resource: Resource) -> u64 {
        self.busy_cycles[resource.index()]
    }

    /// Places `instr` on an idle `resource` for `cycles` cycles.
    ///
    /// A busy resource refuses the claim and hands the instruction back.
    pub fn claim(
        &mut self,
        resource: Resource,
        instr: Instruction,
        cycles: u64,
    ) -> Result<(), Instruction> {
        let slot = &mut self.slots[resource.index()];
        if slot.busy {
            return Err(instr);
        }
        *slot = Slot {
            busy: true,
            remaining: cycles,
            occupant: Some(instr),
        };
        Ok(())
    }

    /// Advances every busy resource by one cycle.
    ///
    /// Returns the instructions whose resource reached zero this cycle, in
    /// `Resource::ALL` order. A resource claimed with zero cycles frees on the
    /// first retire step after its claim.
    pub fn retire(&mut self) -> Vec<(Resource, Instruction)> {
        let mut finished = Vec::new();
        for resource in Resource::ALL {
            let slot = &mut self.slots[resource.index()];
            if !slot.busy {
                continue;
            }
            self.busy_cycles[resource.index()] += 1;
            slot.remaining = slot.remaining.saturating_sub(1);
            if slot.remaining == 0 {
                slot.busy = false;
                if let Some(instr) = slot.occupant.take() {
                    finished.push((resource, instr));
                }
            }
        }
        finished
    }
}
