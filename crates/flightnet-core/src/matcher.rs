//! Cycle matching over a raw trace.
//!
//! The matcher walks the grammar segment by segment with lazy filler
//! between anchors, which is the leftmost match of
//! `T0(.*?)T1(.*?)(T2(.*?)T5(.*?)|T3(.*?)T4(.*?))...` under a backtracking
//! engine, without needing one:
//!
//! - an anchor binds to the first occurrence of its literal after the
//!   previous anchor;
//! - a choice tries its alternatives by the position of their first token,
//!   earliest first, declaration order breaking ties, and keeps the first
//!   one that lets the rest of the cycle complete.
//!
//! An earlier hit always leaves a superset of the remaining text, so when
//! the first occurrence of a literal cannot complete the cycle no later
//! occurrence can either. Only first occurrences are ever tried.

use serde::{Deserialize, Serialize};

use flightnet_compiler::classify::Skeleton;
use flightnet_ir::grammar::{CycleGrammar, Segment};
use flightnet_ir::token::Token;

/// One anchor token bound at a byte offset of the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorHit {
    pub token: Token,
    pub start: usize,
}

impl AnchorHit {
    pub fn end(&self) -> usize {
        self.start + self.token.literal().len()
    }
}

/// A matched cycle: span `[start, end)` and its anchors in grammar order.
///
/// `start` is the first anchor's offset and `end` the last anchor's end;
/// the trailing filler is lazy and therefore always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleMatch {
    pub start: usize,
    pub end: usize,
    pub anchors: Vec<AnchorHit>,
}

impl CycleMatch {
    fn from_anchors(anchors: Vec<AnchorHit>) -> Option<Self> {
        let start = anchors.first()?.start;
        let end = anchors.last()?.end();
        Some(Self {
            start,
            end,
            anchors,
        })
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.anchors.iter().map(|a| a.token).collect()
    }

    pub fn skeleton(&self) -> Skeleton {
        Skeleton::from_tokens(&self.tokens())
    }

    /// Filler following each anchor, up to the next anchor or `end`.
    ///
    /// The last entry is the tail filler.
    pub fn fillers<'t>(&self, trace: &'t str) -> Vec<&'t str> {
        self.anchors
            .iter()
            .enumerate()
            .map(|(i, hit)| {
                let next = self.anchors.get(i + 1).map_or(self.end, |n| n.start);
                &trace[hit.end()..next]
            })
            .collect()
    }
}

/// Finds the leftmost cycle of a grammar in a trace.
#[derive(Debug, Clone)]
pub struct CycleMatcher<'g> {
    grammar: &'g CycleGrammar,
}

impl<'g> CycleMatcher<'g> {
    pub fn new(grammar: &'g CycleGrammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'g CycleGrammar {
        self.grammar
    }

    pub fn find(&self, trace: &str) -> Option<CycleMatch> {
        let mut anchors = Vec::with_capacity(self.grammar.max_anchor_count());
        if match_segments(trace, &self.grammar.segments, 0, &mut anchors) {
            CycleMatch::from_anchors(anchors)
        } else {
            None
        }
    }
}

fn find_token(trace: &str, token: Token, from: usize) -> Option<AnchorHit> {
    trace
        .get(from..)?
        .find(token.literal())
        .map(|offset| AnchorHit {
            token,
            start: from + offset,
        })
}

/// Bind `tokens` in order starting at `from`; returns the end offset.
fn match_tokens(
    trace: &str,
    tokens: &[Token],
    from: usize,
    anchors: &mut Vec<AnchorHit>,
) -> Option<usize> {
    let mut pos = from;
    for token in tokens {
        let hit = find_token(trace, *token, pos)?;
        pos = hit.end();
        anchors.push(hit);
    }
    Some(pos)
}

fn match_segments(
    trace: &str,
    segments: &[Segment],
    from: usize,
    anchors: &mut Vec<AnchorHit>,
) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return true;
    };

    match segment {
        Segment::Anchor { token } => {
            let mark = anchors.len();
            match match_tokens(trace, std::slice::from_ref(token), from, anchors) {
                Some(end) if match_segments(trace, rest, end, anchors) => true,
                _ => {
                    anchors.truncate(mark);
                    false
                }
            }
        }
        Segment::Choice { alternatives } => {
            let mut candidates: Vec<(usize, usize)> = alternatives
                .iter()
                .enumerate()
                .filter_map(|(index, alt)| match alt.tokens.first() {
                    Some(token) => find_token(trace, *token, from).map(|hit| (hit.start, index)),
                    None => Some((from, index)),
                })
                .collect();
            candidates.sort_unstable();

            for (start, index) in candidates {
                let mark = anchors.len();
                let tokens = &alternatives[index].tokens;
                if let Some(end) = match_tokens(trace, tokens, start, anchors) {
                    if match_segments(trace, rest, end, anchors) {
                        return true;
                    }
                }
                anchors.truncate(mark);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> CycleGrammar {
        CycleGrammar::flight_booking()
    }

    #[test]
    fn test_plain_cycle() {
        let g = grammar();
        let m = CycleMatcher::new(&g).find("T0T1T3T4T7T8T11").unwrap();
        assert_eq!(m.start, 0);
        assert_eq!(m.end, 15);
        assert_eq!(m.skeleton().as_str(), "T0T1T3T4T7T8T11");
    }

    #[test]
    fn test_span_excludes_leading_and_trailing_text() {
        let g = grammar();
        let trace = "xxT0T1T2T5T6T9T10T11yy";
        let m = CycleMatcher::new(&g).find(trace).unwrap();
        assert_eq!(&trace[m.start..m.end], "T0T1T2T5T6T9T10T11");
        assert_eq!(m.fillers(trace).last(), Some(&""));
    }

    #[test]
    fn test_earliest_alternative_wins() {
        let g = grammar();
        // agent 2 starts first, so T3..T4 is taken even though T2..T5 fits
        let trace = "T0T1T3T4T2T5T7T8T11";
        let m = CycleMatcher::new(&g).find(trace).unwrap();
        assert_eq!(m.skeleton().as_str(), "T0T1T3T4T7T8T11");
        assert_eq!(m.fillers(trace)[3], "T2T5");
    }

    #[test]
    fn test_later_alternative_used_when_earlier_cannot_complete() {
        let g = grammar();
        // T7 comes first but there is no T8 after it; T6..T9..T10 completes
        let trace = "T0T1T2T5T7T6T9T10T11";
        let m = CycleMatcher::new(&g).find(trace).unwrap();
        assert_eq!(m.skeleton().as_str(), "T0T1T2T5T6T9T10T11");
        assert_eq!(m.fillers(trace)[3], "T7");
    }

    #[test]
    fn test_unused_alternative_stays_as_filler() {
        let g = grammar();
        let trace = "T0T1T2T5T6T9T10T7T8T11";
        let m = CycleMatcher::new(&g).find(trace).unwrap();
        assert_eq!(m.skeleton().as_str(), "T0T1T2T5T6T9T10T11");
        assert_eq!(m.fillers(trace)[6], "T7T8");
    }

    #[test]
    fn test_t1_may_bind_inside_t10() {
        let g = grammar();
        // literal search: the first "T1" after T0 is the prefix of "T10"
        let trace = "T0T10T2T5T7T8T11";
        let m = CycleMatcher::new(&g).find(trace).unwrap();
        assert_eq!(m.anchors[1].start, 2);
        assert_eq!(m.fillers(trace)[1], "0");
    }

    #[test]
    fn test_missing_anchor_fails() {
        let g = grammar();
        assert_eq!(CycleMatcher::new(&g).find("T0T1T2T5T6T9T10"), None);
        assert_eq!(CycleMatcher::new(&g).find(""), None);
        assert_eq!(CycleMatcher::new(&g).find("T1T2T5T6T9T10T11"), None);
    }
}
