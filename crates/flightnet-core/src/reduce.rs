//! The reduction loop: match, classify, strip, repeat.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use flightnet_compiler::classify::{classify, Classification, Skeleton};
use flightnet_ir::grammar::CycleGrammar;

use crate::analysis::{AnalysisResult, CycleDefect, InvariantCounts, RejectReason, Verdict};
use crate::limits::ReductionLimits;
use crate::matcher::{CycleMatch, CycleMatcher};
use crate::strip::strip;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReduceError {
    #[error("Reduction exceeded its bound of {limit} iterations")]
    IterationLimitExceeded { limit: u64 },
}

/// One stripped cycle, as seen by a reduction observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionStep {
    /// 1-based cycle number.
    pub cycle: u64,
    pub matched: CycleMatch,
    pub skeleton: Skeleton,
    pub classification: Classification,
    /// The trace after this cycle's anchors were removed.
    pub remaining: String,
}

#[derive(Debug, Default)]
struct Accumulator {
    cycles: u64,
    counts: InvariantCounts,
    unclassified: u64,
    ambiguous: u64,
    defects: Vec<CycleDefect>,
}

impl Accumulator {
    fn record(&mut self, skeleton: &Skeleton, classification: &Classification) {
        self.cycles += 1;
        match classification {
            Classification::Invariant { id } => self.counts.increment(*id),
            Classification::Unclassified => self.unclassified += 1,
            Classification::Ambiguous { .. } => self.ambiguous += 1,
        }
        if classification.is_defect() {
            self.defects.push(CycleDefect {
                cycle: self.cycles,
                skeleton: skeleton.clone(),
                classification: classification.clone(),
            });
        }
    }

    fn finish(self, leftover: String) -> AnalysisResult {
        let verdict = if leftover.is_empty() {
            Verdict::Accepted
        } else if self.cycles == 0 {
            Verdict::Rejected {
                reason: RejectReason::NoCycleFound,
            }
        } else {
            Verdict::Rejected {
                reason: RejectReason::LeftoverTransitions,
            }
        };
        AnalysisResult {
            cycles: self.cycles,
            counts: self.counts,
            unclassified: self.unclassified,
            ambiguous: self.ambiguous,
            defects: self.defects,
            leftover,
            verdict,
        }
    }
}

/// Reduces a trace cycle by cycle and classifies what it strips.
#[derive(Debug, Clone)]
pub struct TraceReducer<'g> {
    matcher: CycleMatcher<'g>,
    limits: ReductionLimits,
}

impl<'g> TraceReducer<'g> {
    pub fn new(grammar: &'g CycleGrammar) -> Self {
        Self {
            matcher: CycleMatcher::new(grammar),
            limits: ReductionLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ReductionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn reduce(&self, trace: &str) -> Result<AnalysisResult, ReduceError> {
        self.reduce_observed(trace, |_| {})
    }

    /// Like [`TraceReducer::reduce`], calling `observe` after every strip.
    pub fn reduce_observed<F>(&self, trace: &str, mut observe: F) -> Result<AnalysisResult, ReduceError>
    where
        F: FnMut(&ReductionStep),
    {
        let limit = self
            .limits
            .iteration_bound(trace.len(), self.matcher.grammar());
        let mut acc = Accumulator::default();
        let mut remaining = trace.to_string();

        while let Some(matched) = self.matcher.find(&remaining) {
            if acc.cycles >= limit {
                return Err(ReduceError::IterationLimitExceeded { limit });
            }

            let skeleton = matched.skeleton();
            let classification = classify(&skeleton);
            acc.record(&skeleton, &classification);

            match &classification {
                Classification::Invariant { id } => {
                    debug!(cycle = acc.cycles, start = matched.start, end = matched.end, %skeleton, %id, "stripped cycle");
                }
                Classification::Unclassified => {
                    warn!(cycle = acc.cycles, %skeleton, "cycle matches no invariant");
                }
                Classification::Ambiguous { ids } => {
                    warn!(cycle = acc.cycles, %skeleton, ?ids, "cycle matches several invariants");
                }
            }

            remaining = strip(&remaining, &matched);
            observe(&ReductionStep {
                cycle: acc.cycles,
                matched,
                skeleton,
                classification,
                remaining: remaining.clone(),
            });
        }

        let result = acc.finish(remaining);
        match &result.verdict {
            Verdict::Accepted => info!(cycles = result.cycles, "trace fully reduced"),
            Verdict::Rejected { reason } => warn!(
                cycles = result.cycles,
                ?reason,
                leftover_len = result.leftover.len(),
                "trace rejected"
            ),
        }
        Ok(result)
    }
}
