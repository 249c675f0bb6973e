use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use flightnet_ir::net::{PetriNet, ENTRY_PLACE};
use flightnet_ir::parse::{validate_net, ParseError};
use flightnet_ir::token::Token;

use crate::marking::{FireError, Marking};
use crate::policy::Policy;
use crate::rng::simulation_rng;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub seed: u64,
    pub policy: Policy,
    /// Overrides the initial token count of the entry place.
    pub clients: Option<u32>,
    pub max_steps: usize,
}

impl SimulationConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            policy: Policy::default(),
            clients: None,
            max_steps: 1_000_000,
        }
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_clients(mut self, clients: u32) -> Self {
        self.clients = Some(clients);
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

/// Why a simulation run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStop {
    /// As many customers left (T11) as entered the run.
    AllCustomersLeft,
    /// No transition is enabled.
    Deadlock,
    /// `max_steps` firings were reached first.
    StepLimit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Fired transitions as a trace string, e.g. `T0T1T2...`.
    pub trace: String,
    pub fired: Vec<Token>,
    pub customers: u32,
    pub customers_left: u32,
    pub stop: SimulationStop,
    pub final_marking: Marking,
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Invalid net: {0}")]
    Net(#[from] ParseError),

    #[error("Firing error: {0}")]
    Fire(#[from] FireError),
}

/// Fire the net one transition at a time until every customer has left.
///
/// At most `customers` entries (T0) happen, so a run that stops with
/// `AllCustomersLeft` contains only complete cycles.
///
/// Each step picks an enabled transition uniformly. When it shares an input
/// place with other enabled transitions, the policy decides among that
/// conflict set instead.
pub fn simulate(
    net: &PetriNet,
    config: &SimulationConfig,
) -> Result<SimulationResult, SimulationError> {
    validate_net(net)?;

    let mut marking = Marking::initial(net);
    if let Some(clients) = config.clients {
        marking.set_tokens(ENTRY_PLACE, clients);
    }
    let customers = marking.tokens(ENTRY_PLACE);
    let mut rng = simulation_rng(config.seed);

    let mut trace = String::new();
    let mut fired = Vec::new();
    let mut entered = 0;
    let mut customers_left = 0;

    let stop = loop {
        if customers_left >= customers {
            break SimulationStop::AllCustomersLeft;
        }
        if fired.len() >= config.max_steps {
            break SimulationStop::StepLimit;
        }
        // T11 refills the entry place, so entries are capped explicitly
        let mut enabled = marking.enabled_transitions(net);
        if entered >= customers {
            enabled.retain(|t| *t != Token::T0);
        }
        if enabled.is_empty() {
            break SimulationStop::Deadlock;
        }

        let pick = enabled[rng.gen_range(0..enabled.len())];
        let conflict: Vec<Token> = enabled
            .iter()
            .copied()
            .filter(|t| *t == pick || net.shares_input_place(pick, *t))
            .collect();
        let chosen = config.policy.choose(&conflict, &mut rng).unwrap_or(pick);

        marking.fire(net, chosen)?;
        trace.push_str(chosen.literal());
        fired.push(chosen);
        match chosen {
            Token::T0 => entered += 1,
            Token::T11 => customers_left += 1,
            _ => {}
        }
    };

    debug!(?stop, steps = fired.len(), "simulation stopped");
    info!(
        seed = config.seed,
        policy = %config.policy,
        customers,
        customers_left,
        "simulated {} firings",
        fired.len()
    );

    Ok(SimulationResult {
        trace,
        fired,
        customers,
        customers_left,
        stop,
        final_marking: marking,
    })
}
