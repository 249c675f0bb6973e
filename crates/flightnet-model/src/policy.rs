//! Conflict resolution between enabled transitions that share an input place.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use flightnet_ir::token::Token;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Unknown policy '{0}' (expected 1/balanced or 2/prioritized)")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Every candidate is equally likely.
    Balanced,
    /// The lowest-numbered candidate is favoured: agent 1 over agent 2 with
    /// p = 0.75, confirm over cancel with p = 0.8.
    #[default]
    Prioritized,
}

/// Transitions that pick the serving agent.
const AGENT_CHOICE: [Token; 2] = [Token::T2, Token::T3];

impl Policy {
    pub fn code(self) -> u8 {
        match self {
            Policy::Balanced => 1,
            Policy::Prioritized => 2,
        }
    }

    /// Pick one transition out of a non-empty conflict set.
    ///
    /// Candidates are expected in ascending transition order.
    pub fn choose<R: Rng>(self, candidates: &[Token], rng: &mut R) -> Option<Token> {
        match candidates {
            [] => None,
            [only] => Some(*only),
            _ => match self {
                Policy::Balanced => Some(candidates[rng.gen_range(0..candidates.len())]),
                Policy::Prioritized => {
                    let favoured = if candidates.iter().any(|t| AGENT_CHOICE.contains(t)) {
                        0.75
                    } else {
                        0.8
                    };
                    if rng.gen_bool(favoured) {
                        Some(candidates[0])
                    } else {
                        let rest = &candidates[1..];
                        Some(rest[rng.gen_range(0..rest.len())])
                    }
                }
            },
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Balanced => f.write_str("balanced"),
            Policy::Prioritized => f.write_str("prioritized"),
        }
    }
}

impl FromStr for Policy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "balanced" => Ok(Policy::Balanced),
            "2" | "prioritized" => Ok(Policy::Prioritized),
            other => Err(PolicyError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::simulation_rng;

    #[test]
    fn test_parse_codes_and_names() {
        assert_eq!("1".parse::<Policy>().unwrap(), Policy::Balanced);
        assert_eq!("Prioritized".parse::<Policy>().unwrap(), Policy::Prioritized);
        assert_eq!(
            "3".parse::<Policy>(),
            Err(PolicyError::Unknown("3".to_string()))
        );
        assert_eq!(Policy::Balanced.code(), 1);
    }

    #[test]
    fn test_single_candidate_is_returned() {
        let mut rng = simulation_rng(1);
        assert_eq!(
            Policy::Balanced.choose(&[Token::T4], &mut rng),
            Some(Token::T4)
        );
        assert_eq!(Policy::Prioritized.choose(&[], &mut rng), None);
    }

    #[test]
    fn test_prioritized_favours_first_candidate() {
        let mut rng = simulation_rng(7);
        let picks = (0..4000)
            .filter(|_| Policy::Prioritized.choose(&[Token::T2, Token::T3], &mut rng) == Some(Token::T2))
            .count();
        let share = picks as f64 / 4000.0;
        assert!((share - 0.75).abs() < 0.05, "share was {share}");
    }

    #[test]
    fn test_balanced_is_even() {
        let mut rng = simulation_rng(7);
        let picks = (0..4000)
            .filter(|_| Policy::Balanced.choose(&[Token::T6, Token::T7], &mut rng) == Some(Token::T6))
            .count();
        let share = picks as f64 / 4000.0;
        assert!((share - 0.5).abs() < 0.05, "share was {share}");
    }
}
