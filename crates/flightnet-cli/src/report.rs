//! Rendering of a reduction result for the terminal or as JSON.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use flightnet_compiler::classify::Classification;
use flightnet_core::analysis::{AnalysisResult, Category, RejectReason, Share, Verdict};
use flightnet_core::reduce::ReductionStep;
use flightnet_core::tally::FiringTally;

const SEPARATOR: &str = "------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One derived figure; `ratio` and `percent` are `None` when the pair is
/// (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShareLine {
    pub category: Category,
    pub count: u64,
    pub pair_total: u64,
    pub ratio: Option<f64>,
    pub percent: Option<f64>,
}

impl From<Share> for ShareLine {
    fn from(share: Share) -> Self {
        Self {
            category: share.category,
            count: share.count,
            pair_total: share.pair_total,
            ratio: share.ratio().ok(),
            percent: share.percent().ok(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub result: AnalysisResult,
    /// agent 1, agent 2, confirm, cancel.
    pub shares: Vec<ShareLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tally: Option<FiringTally>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<ReductionStep>,
}

impl Report {
    pub fn new(result: AnalysisResult) -> Self {
        let shares = result
            .breakdown()
            .shares()
            .into_iter()
            .map(ShareLine::from)
            .collect();
        Self {
            result,
            shares,
            tally: None,
            steps: Vec::new(),
        }
    }

    pub fn with_tally(mut self, tally: FiringTally) -> Self {
        self.tally = Some(tally);
        self
    }

    pub fn with_steps(mut self, steps: Vec<ReductionStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    fn write_accepted(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "Test finished OK")?;
        writeln!(f, "Invariant count: {}", self.result.cycles)?;
        writeln!(f, "{SEPARATOR}")?;
        for (id, count) in self.result.counts.iter() {
            writeln!(f, "('{}', {count})  {}", id.skeleton_literal(), id.label())?;
        }
        self.write_defects(f)?;
        writeln!(f, "{SEPARATOR}")?;
        for line in &self.shares {
            let (count_label, share_label) = labels(line.category);
            writeln!(f, "{count_label} : {}", line.count)?;
            match line.percent {
                Some(percent) => writeln!(f, "{share_label} : {percent:.1} %")?,
                None => writeln!(f, "{share_label} : undefined")?,
            }
            writeln!(f, "{SEPARATOR}")?;
        }
        Ok(())
    }

    fn write_rejected(&self, f: &mut fmt::Formatter<'_>, reason: &RejectReason) -> fmt::Result {
        writeln!(f, "Test finished FAIL: leftover transitions")?;
        if *reason == RejectReason::NoCycleFound {
            writeln!(f, "No complete cycle found")?;
        }
        writeln!(f, "Cycles stripped: {}", self.result.cycles)?;
        writeln!(f, "Leftover: {:?}", self.result.leftover)?;
        self.write_defects(f)
    }

    fn write_defects(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.result.defects.is_empty() {
            return Ok(());
        }
        writeln!(f, "Unclassified cycles: {}", self.result.unclassified)?;
        writeln!(f, "Ambiguous cycles: {}", self.result.ambiguous)?;
        for defect in &self.result.defects {
            writeln!(
                f,
                "  cycle {}: {} ({})",
                defect.cycle,
                defect.skeleton,
                describe(&defect.classification)
            )?;
        }
        Ok(())
    }

    fn write_tally(&self, f: &mut fmt::Formatter<'_>, tally: &FiringTally) -> fmt::Result {
        writeln!(f, "Firing tally")?;
        writeln!(f, "T2 (agent 1): {}", tally.agent1())?;
        writeln!(f, "T3 (agent 2): {}", tally.agent2())?;
        writeln!(f, "T6 (confirmed): {}", tally.confirmed())?;
        writeln!(f, "T7 (cancelled): {}", tally.cancelled())?;
        writeln!(f, "T11 (left): {}", tally.exits())?;
        writeln!(f, "{SEPARATOR}")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(
                f,
                "cycle {}: {} -> {}",
                step.cycle,
                step.skeleton,
                describe(&step.classification)
            )?;
        }
        match &self.result.verdict {
            Verdict::Accepted => self.write_accepted(f)?,
            Verdict::Rejected { reason } => self.write_rejected(f, reason)?,
        }
        if let Some(tally) = &self.tally {
            self.write_tally(f, tally)?;
        }
        Ok(())
    }
}

fn labels(category: Category) -> (&'static str, &'static str) {
    match category {
        Category::Agent1 => ("Customers served by agent 1", "Share served by agent 1"),
        Category::Agent2 => ("Customers served by agent 2", "Share served by agent 2"),
        Category::Confirm => ("Customers who confirmed", "Share of customers who confirmed"),
        Category::Cancel => ("Customers who cancelled", "Share of customers who cancelled"),
    }
}

fn describe(classification: &Classification) -> String {
    match classification {
        Classification::Invariant { id } => id.to_string(),
        Classification::Unclassified => "unclassified".to_string(),
        Classification::Ambiguous { ids } => {
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            format!("ambiguous: {}", ids.join(", "))
        }
    }
}
