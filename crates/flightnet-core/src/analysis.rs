//! Reduction results and the figures derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use flightnet_compiler::classify::{Classification, Skeleton};
use flightnet_ir::invariant::{Agent, InvariantId, Outcome};

/// Per-invariant cycle counts, indexed in catalog order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantCounts([u64; 4]);

impl InvariantCounts {
    pub fn get(&self, id: InvariantId) -> u64 {
        self.0[id.index()]
    }

    pub fn increment(&mut self, id: InvariantId) {
        self.0[id.index()] += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (InvariantId, u64)> + '_ {
        InvariantId::ALL.into_iter().map(|id| (id, self.get(id)))
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn by_agent(&self, agent: Agent) -> u64 {
        self.iter()
            .filter(|(id, _)| id.agent() == agent)
            .map(|(_, n)| n)
            .sum()
    }

    pub fn by_outcome(&self, outcome: Outcome) -> u64 {
        self.iter()
            .filter(|(id, _)| id.outcome() == outcome)
            .map(|(_, n)| n)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Not a single cycle could be matched in a non-empty trace.
    NoCycleFound,
    /// Cycles were stripped but text remains.
    LeftoverTransitions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    Rejected { reason: RejectReason },
}

/// A cycle that matched the grammar but not exactly one invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleDefect {
    /// 1-based position of the cycle in reduction order.
    pub cycle: u64,
    pub skeleton: Skeleton,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Cycles stripped, whether classified or not.
    pub cycles: u64,
    pub counts: InvariantCounts,
    pub unclassified: u64,
    pub ambiguous: u64,
    pub defects: Vec<CycleDefect>,
    /// Trace text left once no further cycle matches.
    pub leftover: String,
    pub verdict: Verdict,
}

impl AnalysisResult {
    pub fn accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }

    pub fn breakdown(&self) -> Breakdown {
        let agent1 = self.counts.by_agent(Agent::One);
        let agent2 = self.counts.by_agent(Agent::Two);
        let confirm = self.counts.by_outcome(Outcome::Confirm);
        let cancel = self.counts.by_outcome(Outcome::Cancel);
        Breakdown {
            agent1: Share::new(Category::Agent1, agent1, agent1 + agent2),
            agent2: Share::new(Category::Agent2, agent2, agent1 + agent2),
            confirm: Share::new(Category::Confirm, confirm, confirm + cancel),
            cancel: Share::new(Category::Cancel, cancel, confirm + cancel),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Agent1,
    Agent2,
    Confirm,
    Cancel,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Agent1 => "agent 1",
            Category::Agent2 => "agent 2",
            Category::Confirm => "confirm",
            Category::Cancel => "cancel",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Percentage for {category} is undefined: both sides of the pair are zero")]
    DegeneratePercentage { category: Category },
}

/// A count and the two-way total it is a share of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub category: Category,
    pub count: u64,
    pub pair_total: u64,
}

impl Share {
    pub fn new(category: Category, count: u64, pair_total: u64) -> Self {
        Self {
            category,
            count,
            pair_total,
        }
    }

    /// `count / pair_total` rounded to one decimal place.
    pub fn ratio(&self) -> Result<f64, AnalysisError> {
        if self.pair_total == 0 {
            return Err(AnalysisError::DegeneratePercentage {
                category: self.category,
            });
        }
        Ok(round_one_decimal(self.count as f64 / self.pair_total as f64))
    }

    /// [`Share::ratio`] on the 0-100 scale.
    pub fn percent(&self) -> Result<f64, AnalysisError> {
        self.ratio().map(|r| round_one_decimal(r * 100.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub agent1: Share,
    pub agent2: Share,
    pub confirm: Share,
    pub cancel: Share,
}

impl Breakdown {
    pub fn shares(&self) -> [Share; 4] {
        [self.agent1, self.agent2, self.confirm, self.cancel]
    }
}

/// Round on the exact binary value, ties to even.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
