pub mod classify;
pub mod validate;

pub use classify::{classify, Classification, Skeleton};
pub use validate::{validate_grammar, ValidationError};
