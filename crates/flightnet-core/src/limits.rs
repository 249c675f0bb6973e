//! Iteration limits for the reduction loop.
//!
//! Every successful strip removes at least the shortest skeleton's bytes,
//! so a trace of `n` bytes can hold at most `n / min_cycle_len` cycles.
//! Going past that bound means the matcher is broken, not the trace.

use serde::{Deserialize, Serialize};

use flightnet_ir::grammar::CycleGrammar;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionLimits {
    /// Explicit cap on reduction iterations; the derived bound still applies.
    #[serde(default)]
    pub max_iterations: Option<u64>,
}

impl ReductionLimits {
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Effective iteration bound for a trace of `trace_len` bytes.
    pub fn iteration_bound(&self, trace_len: usize, grammar: &CycleGrammar) -> u64 {
        let derived = (trace_len / grammar.min_cycle_len().max(1)) as u64;
        match self.max_iterations {
            Some(max) => max.min(derived),
            None => derived,
        }
    }
}
