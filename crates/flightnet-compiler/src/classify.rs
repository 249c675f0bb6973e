//! Skeleton classification.
//!
//! A skeleton is the anchor-only text of one matched cycle. It is compared
//! against the canonical invariant skeletons, in the fixed order
//! inv1..inv4, by substring containment.

use std::fmt;

use serde::{Deserialize, Serialize};

use flightnet_ir::invariant::InvariantId;
use flightnet_ir::token::{concat_literals, Token};

/// Anchor tokens of one cycle with all filler dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skeleton(String);

impl Skeleton {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        Skeleton(concat_literals(tokens))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of comparing a skeleton against the invariant catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// Exactly one canonical skeleton occurs in the skeleton.
    Invariant { id: InvariantId },
    /// No canonical skeleton occurs in the skeleton.
    Unclassified,
    /// More than one canonical skeleton occurs; listed in catalog order.
    Ambiguous { ids: Vec<InvariantId> },
}

impl Classification {
    pub fn invariant(&self) -> Option<InvariantId> {
        match self {
            Classification::Invariant { id } => Some(*id),
            _ => None,
        }
    }

    pub fn is_defect(&self) -> bool {
        !matches!(self, Classification::Invariant { .. })
    }
}

pub fn classify(skeleton: &Skeleton) -> Classification {
    let ids: Vec<InvariantId> = InvariantId::ALL
        .into_iter()
        .filter(|id| skeleton.as_str().contains(id.skeleton_literal()))
        .collect();

    match ids.as_slice() {
        [] => Classification::Unclassified,
        [id] => Classification::Invariant { id: *id },
        _ => Classification::Ambiguous { ids },
    }
}
