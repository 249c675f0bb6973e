use serde::{Deserialize, Serialize};

use flightnet_ir::net::PetriNet;
use flightnet_ir::token::Token;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FireError {
    #[error("Transition {transition} is not enabled: place '{place}' would go negative")]
    NotEnabled { transition: Token, place: String },
}

/// Token count per place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marking(Vec<u32>);

impl Marking {
    pub fn initial(net: &PetriNet) -> Self {
        Marking(net.initial_marking.clone())
    }

    pub fn tokens(&self, place: usize) -> u32 {
        self.0[place]
    }

    pub fn set_tokens(&mut self, place: usize, count: u32) {
        self.0[place] = count;
    }

    /// First place that would go negative if `transition` fired.
    fn blocking_place(&self, net: &PetriNet, transition: Token) -> Option<usize> {
        (0..net.place_count())
            .find(|&p| i64::from(self.0[p]) + i64::from(net.delta(p, transition)) < 0)
    }

    pub fn is_enabled(&self, net: &PetriNet, transition: Token) -> bool {
        self.blocking_place(net, transition).is_none()
    }

    pub fn enabled_transitions(&self, net: &PetriNet) -> Vec<Token> {
        Token::all()
            .filter(|t| self.is_enabled(net, *t))
            .collect()
    }

    /// Apply the incidence column of `transition`.
    pub fn fire(&mut self, net: &PetriNet, transition: Token) -> Result<(), FireError> {
        if let Some(place) = self.blocking_place(net, transition) {
            return Err(FireError::NotEnabled {
                transition,
                place: net.place_name(place),
            });
        }
        for (place, count) in self.0.iter_mut().enumerate() {
            let next = i64::from(*count) + i64::from(net.delta(place, transition));
            *count = next as u32;
        }
        Ok(())
    }
}
