//! Validation state machine.
//!
//! Tracks which evaluation is the latest one initiated and holds the last
//! applied result. Evaluations may complete in any order; only the most
//! recently initiated one is allowed to settle.

use log::{debug, trace};

use crate::validation::ValidationResult;

/// Lifecycle phase of the validation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// No evaluation has been initiated yet.
    #[default]
    Pristine,
    /// An evaluation is in flight.
    Evaluating,
    /// The latest initiated evaluation has been applied.
    Settled,
}

/// Proof of initiation handed to an evaluation when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The generation-counting state machine.
#[derive(Debug, Default)]
pub struct ValidationEngine {
    phase: Phase,
    initiated: u64,
    result: ValidationResult,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an evaluation. Supersedes any evaluation still in flight.
    pub fn begin(&mut self) -> Ticket {
        self.initiated += 1;
        self.phase = Phase::Evaluating;
        trace!("evaluation #{} initiated", self.initiated);
        Ticket {
            generation: self.initiated,
        }
    }

    /// Whether `ticket` belongs to the most recently initiated evaluation.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.initiated
    }

    /// Apply a completed evaluation.
    ///
    /// Returns `false` and leaves the state untouched when a newer evaluation
    /// has been initiated since `ticket` was issued.
    pub fn settle(&mut self, ticket: Ticket, result: ValidationResult) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "discarding evaluation #{} (latest is #{})",
                ticket.generation, self.initiated
            );
            return false;
        }
        self.result = result;
        self.phase = Phase::Settled;
        true
    }

    /// Drop all state and invalidate every outstanding ticket.
    ///
    /// The generation counter keeps counting so tickets issued before the
    /// reset can never settle afterwards.
    pub fn reset(&mut self) {
        self.initiated += 1;
        self.phase = Phase::Pristine;
        self.result = ValidationResult::default();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The last applied result. Empty until the first settle.
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    /// Number of evaluations initiated so far.
    pub fn generation(&self) -> u64 {
        self.initiated
    }
}
