//! Naive per-transition firing counts.
//!
//! These count literals directly, without the cycle grammar. On an accepted
//! trace the agent and decision figures agree with the invariant breakdown,
//! which makes them a cheap cross-check.

use serde::{Deserialize, Serialize};

use flightnet_ir::token::Token;

/// Occurrences of `token` in `trace` that are not followed by another digit,
/// so `T1` is not counted inside `T10` or `T11`.
pub fn count_transition(trace: &str, token: Token) -> u64 {
    let bytes = trace.as_bytes();
    trace
        .match_indices(token.literal())
        .filter(|(start, lit)| {
            bytes
                .get(start + lit.len())
                .map_or(true, |next| !next.is_ascii_digit())
        })
        .count() as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiringTally {
    counts: [u64; Token::COUNT],
}

impl FiringTally {
    pub fn from_trace(trace: &str) -> Self {
        let mut counts = [0; Token::COUNT];
        for token in Token::all() {
            counts[token.index()] = count_transition(trace, token);
        }
        Self { counts }
    }

    pub fn get(&self, token: Token) -> u64 {
        self.counts[token.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Token, u64)> + '_ {
        Token::all().map(|t| (t, self.get(t)))
    }

    pub fn agent1(&self) -> u64 {
        self.get(Token::T2)
    }

    pub fn agent2(&self) -> u64 {
        self.get(Token::T3)
    }

    pub fn confirmed(&self) -> u64 {
        self.get(Token::T6)
    }

    pub fn cancelled(&self) -> u64 {
        self.get(Token::T7)
    }

    /// Customers that left (T11).
    pub fn exits(&self) -> u64 {
        self.get(Token::T11)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_literals_are_not_double_counted() {
        let trace = "T0T1T2T5T6T9T10T11";
        assert_eq!(count_transition(trace, Token::T1), 1);
        assert_eq!(count_transition(trace, Token::T10), 1);
        assert_eq!(count_transition(trace, Token::T11), 1);
    }

    #[test]
    fn test_tally_figures() {
        let trace = "T0T1T3T4T7T8T11T0T1T2T5T6T9T10T11T0T1T2T5T7T8T11";
        let tally = FiringTally::from_trace(trace);
        assert_eq!(tally.agent1(), 2);
        assert_eq!(tally.agent2(), 1);
        assert_eq!(tally.confirmed(), 1);
        assert_eq!(tally.cancelled(), 2);
        assert_eq!(tally.exits(), 3);
        assert_eq!(tally.get(Token::T0), 3);
    }

    #[test]
    fn test_literal_at_end_of_trace() {
        assert_eq!(count_transition("xxT7", Token::T7), 1);
        assert_eq!(count_transition("T71", Token::T7), 0);
    }
}
