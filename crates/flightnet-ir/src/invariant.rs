use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Which agent handled the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agent {
    One,
    Two,
}

/// How the customer closed the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Confirm,
    Cancel,
}

/// One of the four transition invariants of the flight agency net.
///
/// The declaration order is the classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvariantId {
    Inv1,
    Inv2,
    Inv3,
    Inv4,
}

const INV1: [Token; 7] = [
    Token::T0,
    Token::T1,
    Token::T3,
    Token::T4,
    Token::T7,
    Token::T8,
    Token::T11,
];
const INV2: [Token; 8] = [
    Token::T0,
    Token::T1,
    Token::T3,
    Token::T4,
    Token::T6,
    Token::T9,
    Token::T10,
    Token::T11,
];
const INV3: [Token; 7] = [
    Token::T0,
    Token::T1,
    Token::T2,
    Token::T5,
    Token::T7,
    Token::T8,
    Token::T11,
];
const INV4: [Token; 8] = [
    Token::T0,
    Token::T1,
    Token::T2,
    Token::T5,
    Token::T6,
    Token::T9,
    Token::T10,
    Token::T11,
];

impl InvariantId {
    pub const ALL: [InvariantId; 4] = [Self::Inv1, Self::Inv2, Self::Inv3, Self::Inv4];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn skeleton(self) -> &'static [Token] {
        match self {
            Self::Inv1 => &INV1,
            Self::Inv2 => &INV2,
            Self::Inv3 => &INV3,
            Self::Inv4 => &INV4,
        }
    }

    /// The canonical skeleton as it appears in a filler-free trace.
    pub fn skeleton_literal(self) -> &'static str {
        match self {
            Self::Inv1 => "T0T1T3T4T7T8T11",
            Self::Inv2 => "T0T1T3T4T6T9T10T11",
            Self::Inv3 => "T0T1T2T5T7T8T11",
            Self::Inv4 => "T0T1T2T5T6T9T10T11",
        }
    }

    pub fn agent(self) -> Agent {
        match self {
            Self::Inv1 | Self::Inv2 => Agent::Two,
            Self::Inv3 | Self::Inv4 => Agent::One,
        }
    }

    pub fn outcome(self) -> Outcome {
        match self {
            Self::Inv1 | Self::Inv3 => Outcome::Cancel,
            Self::Inv2 | Self::Inv4 => Outcome::Confirm,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inv1 => "Agent 2, cancel",
            Self::Inv2 => "Agent 2, confirm",
            Self::Inv3 => "Agent 1, cancel",
            Self::Inv4 => "Agent 1, confirm",
        }
    }
}

impl fmt::Display for InvariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Inv1 => "inv1",
            Self::Inv2 => "inv2",
            Self::Inv3 => "inv3",
            Self::Inv4 => "inv4",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::concat_literals;

    #[test]
    fn test_literal_matches_tokens() {
        for id in InvariantId::ALL {
            assert_eq!(concat_literals(id.skeleton()), id.skeleton_literal());
        }
    }

    #[test]
    fn test_agent_outcome_grid_is_complete() {
        let mut seen = Vec::new();
        for id in InvariantId::ALL {
            let pair = (id.agent(), id.outcome());
            assert!(!seen.contains(&pair), "duplicate pair for {id}");
            seen.push(pair);
        }
        assert_eq!(seen.len(), 4);
    }
}
