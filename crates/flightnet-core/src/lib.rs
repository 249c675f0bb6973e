pub mod analysis;
pub mod limits;
pub mod matcher;
pub mod reduce;
pub mod strip;
pub mod tally;

pub use analysis::{AnalysisError, AnalysisResult, Breakdown, Category, Share, Verdict};
pub use limits::ReductionLimits;
pub use matcher::{AnchorHit, CycleMatch, CycleMatcher};
pub use reduce::{ReduceError, ReductionStep, TraceReducer};
pub use tally::FiringTally;
