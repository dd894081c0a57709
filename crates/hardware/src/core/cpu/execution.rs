//! Main Execution Loop.
//!
//! This module implements the cycle step of the vector core. Each cycle runs four
//! stages in a fixed order, and later stages see the state earlier ones left:
//! 1. **Retire:** Count every busy resource down; finished instructions release their registers.
//! 2. **Dispatch:** Move each queue head onto its resource if that resource is idle.
//! 3. **Decode/Admit:** Decode the fetched line (or retry the held instruction) and admit it
//!    into its queue, stalling fetch when the queue is full or a register is busy.
//! 4. **Fetch:** Read the next line unless stalled or past the end of the program.

use super::{CoreState, HaltReason, VectorCore};
use crate::common::error::{AdmitError, DecodeError, SimError};
use crate::core::pipeline::resources::Resource;
use crate::isa::decode::{Decoded, decode};
use crate::isa::instruction::{ComputeResource, Instruction, IssueClass};

impl VectorCore {
    /// Runs until the core halts.
    ///
    /// Returns the halt reason. Decode faults halt the core gracefully and are
    /// returned as reasons, not errors.
    ///
    /// # Errors
    ///
    /// `IterationCapExceeded` if the core is still running after `max_cycles` cycles.
    pub fn run(&mut self) -> Result<HaltReason, SimError> {
        loop {
            if let CoreState::Halted(reason) = &self.state {
                return Ok(reason.clone());
            }
            if self.cycle >= self.max_cycles {
                tracing::warn!(cap = self.max_cycles, pc = self.pc, "cycle bound reached");
                return Err(SimError::IterationCapExceeded {
                    cap: self.max_cycles,
                });
            }
            self.tick();
        }
    }

    /// Simulates one cycle. Does nothing once the core has halted.
    pub fn tick(&mut self) {
        if self.is_halted() {
            return;
        }
        self.cycle += 1;
        self.stats.cycles = self.cycle;
        tracing::trace!(cycle = self.cycle, pc = self.pc, "tick");

        self.retire_stage();
        self.dispatch_stage();
        if let Some(reason) = self.decode_stage() {
            tracing::info!(cycle = self.cycle, %reason, "core halted");
            self.state = CoreState::Halted(reason);
            return;
        }
        self.fetch_stage();

        if self.is_drained() {
            tracing::info!(cycle = self.cycle, "core drained");
            self.state = CoreState::Halted(HaltReason::Drained);
        }
    }

    /// Checks whether `instr` could enter its queue right now.
    pub fn can_admit(&self, instr: &Instruction) -> Result<(), AdmitError> {
        if !self.queues.has_room(instr.class) {
            return Err(AdmitError::QueueFull(instr.class));
        }
        self.busy.check(instr)
    }

    fn is_drained(&self) -> bool {
        self.fetch_done
            && self.fetched.is_none()
            && self.held.is_none()
            && self.queues.is_empty()
            && self.resources.is_idle()
    }

    fn retire_stage(&mut self) {
        for (resource, instr) in self.resources.retire() {
            tracing::debug!(cycle = self.cycle, %resource, %instr, "retire");
            self.busy.clear_busy(&instr);
            self.stats.instructions_retired += 1;
        }
        for resource in Resource::ALL {
            self.stats.resource_busy[resource.index()] = self.resources.busy_cycles(resource);
        }
    }

    fn dispatch_stage(&mut self) {
        for class in IssueClass::ALL {
            let Some(head) = self.queues.peek(class) else {
                continue;
            };
            let resource = Resource::for_instruction(head);
            if self.resources.is_busy(resource) {
                continue;
            }
            let Some(instr) = self.queues.dequeue(class) else {
                continue;
            };
            let cycles = self.occupancy(&instr);
            tracing::debug!(cycle = self.cycle, %resource, cycles, %instr, "dispatch");
            self.busy.mark_busy(&instr);
            self.stats.instructions_dispatched += 1;
            self.stats.dispatched_by_class[class.index()] += 1;
            if let Err(instr) = self.resources.claim(resource, instr, cycles) {
                tracing::error!(%resource, %instr, "dispatch into a busy resource");
                self.busy.clear_busy(&instr);
            }
        }
    }

    /// Cycles `instr` will hold its resource.
    fn occupancy(&mut self, instr: &Instruction) -> u64 {
        match instr.class {
            IssueClass::VectorCompute => self.latency.compute_latency(
                instr.resource.unwrap_or(ComputeResource::Adder),
                instr.snapshot.unwrap_or_default(),
            ),
            IssueClass::VectorData => {
                let report = self.latency.memory_latency(&instr.vector_addrs);
                self.stats.vector_accesses += instr.vector_addrs.len() as u64;
                self.stats.bank_conflict_stalls += report.conflict_stalls;
                report.cycles
            }
            IssueClass::ScalarOps => self.latency.scalar_latency(),
        }
    }

    /// Returns a halt reason when decoding faults.
    fn decode_stage(&mut self) -> Option<HaltReason> {
        let instr = match self.held.take() {
            Some(instr) => instr,
            None => {
                let (pc, tokens) = self.fetched.take()?;
                match decode(&tokens, &mut self.vector, &self.srf) {
                    Ok(Decoded::Instruction(instr)) => instr,
                    Ok(Decoded::Halt) => {
                        tracing::debug!(cycle = self.cycle, pc, "HALT decoded, fetch ends");
                        self.fetch_done = true;
                        return None;
                    }
                    Err(DecodeError::UnknownInstruction(mnemonic)) => {
                        return Some(HaltReason::UnknownInstruction { pc, mnemonic });
                    }
                    Err(error) => return Some(HaltReason::MalformedInstruction { pc, error }),
                }
            }
        };

        let class = instr.class;
        let admitted = match self.can_admit(&instr) {
            Ok(()) => {
                tracing::debug!(cycle = self.cycle, %instr, "admit");
                self.busy.mark_busy(&instr);
                // Only refused if `can_admit` and the queues disagree.
                self.queues.enqueue(instr).map_err(|refused| {
                    self.busy.clear_busy(&refused.instr);
                    (refused.error(), refused.instr)
                })
            }
            Err(reason) => Err((reason, instr)),
        };

        match admitted {
            Ok(()) => {
                self.stats.instructions_issued += 1;
                let peak = &mut self.stats.queue_peak[class.index()];
                *peak = (*peak).max(self.queues.len(class));
                self.fetch_stalled = false;
            }
            Err((reason, instr)) => {
                tracing::trace!(cycle = self.cycle, %reason, %instr, "admission stalled");
                match reason {
                    AdmitError::QueueFull(_) => self.stats.stalls_queue_full += 1,
                    AdmitError::RegisterHazard(_) => self.stats.stalls_register_hazard += 1,
                }
                self.held = Some(instr);
                self.fetch_stalled = true;
            }
        }
        None
    }

    fn fetch_stage(&mut self) {
        if self.fetch_stalled || self.fetch_done {
            return;
        }
        match self.program.read(self.pc) {
            Some(tokens) => {
                tracing::trace!(cycle = self.cycle, pc = self.pc, ?tokens, "fetch");
                self.fetched = Some((self.pc, tokens));
                self.pc += 1;
                self.stats.instructions_fetched += 1;
            }
            None => {
                tracing::debug!(cycle = self.cycle, pc = self.pc, "end of program");
                self.fetch_done = true;
            }
        }
    }
}

