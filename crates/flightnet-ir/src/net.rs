use serde::{Deserialize, Serialize};

use crate::token::Token;

/// A place/transition net given by its incidence matrix.
///
/// `incidence[p][t]` is the token delta on place `p` when transition `t`
/// fires. Columns are indexed by transition number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetriNet {
    #[serde(default)]
    pub place_names: Vec<String>,
    pub incidence: Vec<Vec<i32>>,
    pub initial_marking: Vec<u32>,
}

/// Place holding customers that have not entered yet.
pub const ENTRY_PLACE: usize = 0;

impl PetriNet {
    /// The flight agency net: customers enter (T0, T1), are served by agent 1
    /// (T2, T5) or agent 2 (T3, T4), then confirm and pay (T6, T9, T10) or
    /// cancel (T7, T8), and leave (T11).
    pub fn flight_agency() -> Self {
        let place_names = [
            "customers_outside",
            "entry_door",
            "at_door",
            "waiting_for_agent",
            "agency_capacity",
            "served_by_agent_1",
            "agent_1_free",
            "agent_2_free",
            "served_by_agent_2",
            "waiting_for_decision",
            "decision_desk_free",
            "confirming",
            "cancelling",
            "paying",
            "leaving",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            place_names,
            incidence: vec![
                vec![-1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![-1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![1, -1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 1, -1, -1, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![-1, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 1, 0, 0, -1, 0, 0, 0, 0, 0, 0],
                vec![0, 0, -1, 0, 0, 1, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, -1, 1, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 1, -1, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 1, 1, -1, -1, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, -1, -1, 1, 0, 1, 0],
                vec![0, 0, 0, 0, 0, 0, 1, 0, 0, -1, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 1, -1, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1, -1, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, -1],
            ],
            initial_marking: vec![186, 1, 0, 0, 5, 0, 1, 1, 0, 0, 1, 0, 0, 0, 0],
        }
    }

    pub fn place_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn transition_count(&self) -> usize {
        self.incidence.first().map(|row| row.len()).unwrap_or(0)
    }

    /// Token delta on `place` when `transition` fires.
    pub fn delta(&self, place: usize, transition: Token) -> i32 {
        self.incidence[place][transition.index()]
    }

    /// True when both transitions consume from at least one common place.
    pub fn shares_input_place(&self, a: Token, b: Token) -> bool {
        (0..self.place_count()).any(|p| self.delta(p, a) < 0 && self.delta(p, b) < 0)
    }

    pub fn place_name(&self, place: usize) -> String {
        self.place_names
            .get(place)
            .cloned()
            .unwrap_or_else(|| format!("P{place}"))
    }
}

impl Default for PetriNet {
    fn default() -> Self {
        Self::flight_agency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_agency_dimensions() {
        let net = PetriNet::flight_agency();
        assert_eq!(net.place_count(), 15);
        assert_eq!(net.transition_count(), Token::COUNT);
        assert_eq!(net.initial_marking.len(), 15);
        assert_eq!(net.place_names.len(), 15);
    }

    #[test]
    fn test_agent_choice_is_a_conflict() {
        let net = PetriNet::flight_agency();
        assert!(net.shares_input_place(Token::T2, Token::T3));
        assert!(net.shares_input_place(Token::T6, Token::T7));
        assert!(!net.shares_input_place(Token::T5, Token::T4));
    }

    #[test]
    fn test_place_name_fallback() {
        let mut net = PetriNet::flight_agency();
        net.place_names.clear();
        assert_eq!(net.place_name(3), "P3");
    }
}
