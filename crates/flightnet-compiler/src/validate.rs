use std::collections::HashSet;

use flightnet_ir::grammar::{CycleGrammar, Segment};
use flightnet_ir::invariant::InvariantId;

use crate::classify::{classify, Classification, Skeleton};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Grammar '{grammar}' has no segments")]
    EmptyGrammar { grammar: String },

    #[error("Grammar '{grammar}' must start with an anchor so the first occurrence fixes the cycle start")]
    MissingStartAnchor { grammar: String },

    #[error("Choice at segment {segment} has no alternatives")]
    EmptyChoice { segment: usize },

    #[error("Alternative '{alternative}' at segment {segment} has no tokens")]
    EmptyAlternative { segment: usize, alternative: String },

    #[error("Path '{skeleton}' matches no invariant")]
    UnclassifiedPath { skeleton: String },

    #[error("Path '{skeleton}' matches several invariants: {ids:?}")]
    AmbiguousPath {
        skeleton: String,
        ids: Vec<InvariantId>,
    },

    #[error("Invariant {id} is not reachable through the grammar")]
    UnreachableInvariant { id: InvariantId },
}

impl ValidationError {
    /// Structural errors leave the grammar unusable for matching; path
    /// errors only mean some cycles will be reported as defects.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ValidationError::EmptyGrammar { .. }
                | ValidationError::MissingStartAnchor { .. }
                | ValidationError::EmptyChoice { .. }
                | ValidationError::EmptyAlternative { .. }
        )
    }
}

/// Check a cycle grammar against the invariant catalog.
///
/// Every path through the grammar must classify to exactly one invariant
/// and every invariant must be produced by some path.
pub fn validate_grammar(grammar: &CycleGrammar) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    validate_structure(grammar, &mut errors);
    if errors.is_empty() {
        validate_paths(grammar, &mut errors);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_structure(grammar: &CycleGrammar, errors: &mut Vec<ValidationError>) {
    match grammar.segments.first() {
        None => {
            errors.push(ValidationError::EmptyGrammar {
                grammar: grammar.name.clone(),
            });
            return;
        }
        Some(Segment::Choice { .. }) => errors.push(ValidationError::MissingStartAnchor {
            grammar: grammar.name.clone(),
        }),
        Some(Segment::Anchor { .. }) => {}
    }

    for (index, segment) in grammar.segments.iter().enumerate() {
        if let Segment::Choice { alternatives } = segment {
            if alternatives.is_empty() {
                errors.push(ValidationError::EmptyChoice { segment: index });
            }
            for alt in alternatives {
                if alt.tokens.is_empty() {
                    errors.push(ValidationError::EmptyAlternative {
                        segment: index,
                        alternative: alt.id.clone(),
                    });
                }
            }
        }
    }
}

fn validate_paths(grammar: &CycleGrammar, errors: &mut Vec<ValidationError>) {
    let mut reached = HashSet::new();
    for path in grammar.paths() {
        let skeleton = Skeleton::from_tokens(&path);
        match classify(&skeleton) {
            Classification::Invariant { id } => {
                reached.insert(id);
            }
            Classification::Unclassified => errors.push(ValidationError::UnclassifiedPath {
                skeleton: skeleton.to_string(),
            }),
            Classification::Ambiguous { ids } => errors.push(ValidationError::AmbiguousPath {
                skeleton: skeleton.to_string(),
                ids,
            }),
        }
    }
    for id in InvariantId::ALL {
        if !reached.contains(&id) {
            errors.push(ValidationError::UnreachableInvariant { id });
        }
    }
}
