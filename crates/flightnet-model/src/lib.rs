pub mod marking;
pub mod policy;
pub mod rng;
pub mod simulate;
