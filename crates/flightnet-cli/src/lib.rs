pub mod grammar;
pub mod input;
pub mod logging;
pub mod report;

pub use report::{OutputFormat, Report};
