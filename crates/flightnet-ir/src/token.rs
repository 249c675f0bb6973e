use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const LITERALS: [&str; Token::COUNT] = [
    "T0", "T1", "T2", "T3", "T4", "T5", "T6", "T7", "T8", "T9", "T10", "T11",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Transition index {index} out of range (expected 0..={max})")]
    OutOfRange { index: usize, max: usize },

    #[error("Invalid transition literal: '{literal}'")]
    InvalidLiteral { literal: String },
}

/// A transition label `T0`..`T11` of the flight agency net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(u8);

impl Token {
    pub const COUNT: usize = 12;

    pub const T0: Token = Token(0);
    pub const T1: Token = Token(1);
    pub const T2: Token = Token(2);
    pub const T3: Token = Token(3);
    pub const T4: Token = Token(4);
    pub const T5: Token = Token(5);
    pub const T6: Token = Token(6);
    pub const T7: Token = Token(7);
    pub const T8: Token = Token(8);
    pub const T9: Token = Token(9);
    pub const T10: Token = Token(10);
    pub const T11: Token = Token(11);

    pub fn new(index: usize) -> Result<Self, TokenError> {
        if index < Self::COUNT {
            Ok(Token(index as u8))
        } else {
            Err(TokenError::OutOfRange {
                index,
                max: Self::COUNT - 1,
            })
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The literal text this transition leaves in a trace, e.g. `"T10"`.
    pub fn literal(self) -> &'static str {
        LITERALS[self.index()]
    }

    pub fn all() -> impl Iterator<Item = Token> {
        (0..Self::COUNT as u8).map(Token)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LITERALS
            .iter()
            .position(|lit| *lit == s)
            .map(|i| Token(i as u8))
            .ok_or_else(|| TokenError::InvalidLiteral {
                literal: s.to_string(),
            })
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.literal().to_string()
    }
}

/// Concatenate token literals with no separator, the way a trace records them.
pub fn concat_literals(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.literal()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_roundtrip() {
        for token in Token::all() {
            assert_eq!(token.literal().parse::<Token>().unwrap(), token);
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            Token::new(12),
            Err(TokenError::OutOfRange { index: 12, max: 11 })
        );
    }

    #[test]
    fn test_rejects_unknown_literal() {
        assert!("T12".parse::<Token>().is_err());
        assert!("t1".parse::<Token>().is_err());
    }

    #[test]
    fn test_concat_literals() {
        assert_eq!(concat_literals(&[Token::T0, Token::T10, Token::T11]), "T0T10T11");
    }
}
