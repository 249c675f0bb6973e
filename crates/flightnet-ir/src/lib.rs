pub mod grammar;
pub mod invariant;
pub mod net;
pub mod parse;
pub mod token;

pub use grammar::{Alternative, CycleGrammar, Segment};
pub use invariant::{Agent, InvariantId, Outcome};
pub use net::PetriNet;
pub use token::Token;
