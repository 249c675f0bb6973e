use serde::{Deserialize, Serialize};

use crate::token::Token;

/// The structural grammar one complete customer cycle must follow.
///
/// Segments are matched in order with lazy filler between every anchor.
/// A `Choice` lists its alternatives in preference order: the first one
/// that lets the rest of the cycle complete wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleGrammar {
    pub name: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Anchor { token: Token },
    Choice { alternatives: Vec<Alternative> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: String,
    pub tokens: Vec<Token>,
}

impl CycleGrammar {
    /// `T0 T1 (T2 T5 | T3 T4) (T6 T9 T10 | T7 T8) T11`
    pub fn flight_booking() -> Self {
        Self {
            name: "flight_booking".to_string(),
            segments: vec![
                Segment::Anchor { token: Token::T0 },
                Segment::Anchor { token: Token::T1 },
                Segment::Choice {
                    alternatives: vec![
                        Alternative {
                            id: "agent_1".to_string(),
                            tokens: vec![Token::T2, Token::T5],
                        },
                        Alternative {
                            id: "agent_2".to_string(),
                            tokens: vec![Token::T3, Token::T4],
                        },
                    ],
                },
                Segment::Choice {
                    alternatives: vec![
                        Alternative {
                            id: "confirm".to_string(),
                            tokens: vec![Token::T6, Token::T9, Token::T10],
                        },
                        Alternative {
                            id: "cancel".to_string(),
                            tokens: vec![Token::T7, Token::T8],
                        },
                    ],
                },
                Segment::Anchor { token: Token::T11 },
            ],
        }
    }

    /// Every anchor sequence the grammar accepts, in alternative-preference order.
    pub fn paths(&self) -> Vec<Vec<Token>> {
        let mut paths = vec![Vec::new()];
        for segment in &self.segments {
            match segment {
                Segment::Anchor { token } => {
                    for path in &mut paths {
                        path.push(*token);
                    }
                }
                Segment::Choice { alternatives } => {
                    let mut extended = Vec::with_capacity(paths.len() * alternatives.len());
                    for path in &paths {
                        for alt in alternatives {
                            let mut next = path.clone();
                            next.extend_from_slice(&alt.tokens);
                            extended.push(next);
                        }
                    }
                    paths = extended;
                }
            }
        }
        paths
    }

    /// Byte length of the shortest anchor sequence the grammar accepts.
    ///
    /// Every successful reduction step removes at least this many bytes.
    pub fn min_cycle_len(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Anchor { token } => token.literal().len(),
                Segment::Choice { alternatives } => alternatives
                    .iter()
                    .map(|alt| alt.tokens.iter().map(|t| t.literal().len()).sum::<usize>())
                    .min()
                    .unwrap_or(0),
            })
            .sum()
    }

    /// Upper bound on the number of anchors in one match.
    pub fn max_anchor_count(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Anchor { .. } => 1,
                Segment::Choice { alternatives } => alternatives
                    .iter()
                    .map(|alt| alt.tokens.len())
                    .max()
                    .unwrap_or(0),
            })
            .sum()
    }
}

impl Default for CycleGrammar {
    fn default() -> Self {
        Self::flight_booking()
    }
}
