use crate::grammar::CycleGrammar;
use crate::net::PetriNet;
use crate::token::Token;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Incidence matrix has no rows")]
    EmptyIncidence,

    #[error("Incidence row {row} has {found} columns, expected {expected}")]
    RaggedIncidence {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Net has {found} transitions, the trace alphabet needs exactly {expected}")]
    TransitionCount { found: usize, expected: usize },

    #[error("Initial marking has {found} entries for {places} places")]
    MarkingLength { found: usize, places: usize },
}

pub fn parse_grammar(json: &str) -> Result<CycleGrammar, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a net definition and check its dimensions against the token alphabet.
pub fn parse_net(json: &str) -> Result<PetriNet, ParseError> {
    let net: PetriNet = serde_json::from_str(json)?;
    validate_net(&net)?;
    Ok(net)
}

pub fn validate_net(net: &PetriNet) -> Result<(), ParseError> {
    let expected = net
        .incidence
        .first()
        .map(|row| row.len())
        .ok_or(ParseError::EmptyIncidence)?;
    for (row, cols) in net.incidence.iter().enumerate() {
        if cols.len() != expected {
            return Err(ParseError::RaggedIncidence {
                row,
                found: cols.len(),
                expected,
            });
        }
    }
    if expected != Token::COUNT {
        return Err(ParseError::TransitionCount {
            found: expected,
            expected: Token::COUNT,
        });
    }
    if net.initial_marking.len() != net.place_count() {
        return Err(ParseError::MarkingLength {
            found: net.initial_marking.len(),
            places: net.place_count(),
        });
    }
    Ok(())
}
