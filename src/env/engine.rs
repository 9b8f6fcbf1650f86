//! Attack environment state machine.
//!
//! The environment owns an immutable ground truth [`Network`] and a single
//! live [`Observation`] of it. `step` checks the action's preconditions,
//! resolves it against the ground truth, updates the observation and
//! computes the reward. Every observation handed back to the caller is an
//! independent copy.

use std::collections::HashMap;

use log::{debug, info, trace, warn};

use super::action::{Action, ActionSpace};
use crate::error::EnvError;
use crate::network::{generate_network, Address, Network, Subnet};
use crate::observation::{Observation, ObservationSpace, ServiceState};
use crate::render::render;

/// Result of a single environment step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Copy of the observation after the step
    pub observation: Observation,
    pub reward: f64,
    /// True once every sensitive machine is compromised
    pub done: bool,
    /// Extra debugging information, currently always empty
    pub info: HashMap<String, String>,
}

/// What an action revealed about its target
#[derive(Debug)]
struct ActionOutcome {
    success: bool,
    value: f64,
    /// Full ground truth service flags, only on success
    services: Option<Vec<bool>>,
}

/// Simulated cyber attack environment
#[derive(Debug, Clone)]
pub struct CyberAttackEnv {
    network: Network,
    action_space: ActionSpace,
    observation_space: ObservationSpace,
    current_state: Observation,
}

impl CyberAttackEnv {
    /// Build an environment with `machines` machines and `services` service
    /// types, generating the ground truth network from `seed`.
    ///
    /// # Examples
    /// ```
    /// use cyberattack::{Action, Address, CyberAttackEnv, Subnet};
    ///
    /// let mut env = CyberAttackEnv::new(4, 1, 1).unwrap();
    /// let step = env.step(&Action::exploit(Address::new(Subnet::Exposed, 0), 0)).unwrap();
    /// assert_eq!(step.reward, -10.0);
    /// assert!(!step.done);
    /// ```
    pub fn new(machines: usize, services: usize, seed: u64) -> Result<Self, EnvError> {
        let observation_space = ObservationSpace::new(machines, services)?;
        let action_space = ActionSpace::new(observation_space.address_space().clone(), services);
        let network = generate_network(machines, services, seed)?;
        let current_state = observation_space.initial_state();

        info!(
            "Created attack environment: {} machines, {} services, {} sensitive machines, total value {}",
            machines,
            services,
            network.sensitive_machines().len(),
            network.total_value()
        );

        Ok(Self {
            network,
            action_space,
            observation_space,
            current_state,
        })
    }

    /// Reset the observation to its initial state and return a copy of it
    pub fn reset(&mut self) -> Observation {
        self.current_state = self.observation_space.initial_state();
        debug!("Environment reset");
        self.current_state.clone()
    }

    /// Run one step of the environment.
    ///
    /// Acting on an unreachable or already compromised machine changes
    /// nothing and returns the negated action cost.
    ///
    /// # Returns
    /// * `Ok(StepResult)` - Observation copy, reward, done flag and info
    /// * `Err(EnvError)` - If the target is not on the network or the kind is
    ///   out of range; the state is left untouched
    pub fn step(&mut self, action: &Action) -> Result<StepResult, EnvError> {
        if let Err(err) = self.action_space.validate(action) {
            warn!("Rejected {}: {}", action, err);
            return Err(err);
        }

        let target = action.target;
        let cost = action.cost();
        let target_state = self
            .current_state
            .get(&target)
            .ok_or(EnvError::InvalidTarget { target })?;

        // penalized, not rejected
        if !target_state.reachable || target_state.compromised {
            debug!(
                "{} had no effect (reachable: {}, compromised: {})",
                action, target_state.reachable, target_state.compromised
            );
            return Ok(self.result(-cost, false));
        }

        let outcome = self.take_action(action)?;
        self.update_state(action, &outcome)?;
        let done = self.is_goal();
        let reward = outcome.value - cost;

        debug!(
            "{} -> success: {}, reward: {}, done: {}",
            action, outcome.success, reward, done
        );
        if done {
            info!("All sensitive machines compromised");
        }

        Ok(self.result(reward, done))
    }

    /// Resolve an action against the ground truth network
    fn take_action(&self, action: &Action) -> Result<ActionOutcome, EnvError> {
        let target = action.target;
        let machine = self
            .network
            .machine(&target)
            .ok_or(EnvError::InvalidTarget { target })?;

        let outcome = match action.service() {
            None => ActionOutcome {
                success: true,
                value: 0.0,
                services: Some(machine.services.clone()),
            },
            Some(service) if machine.services[service] => ActionOutcome {
                success: true,
                value: machine.value,
                services: Some(machine.services.clone()),
            },
            Some(_) => ActionOutcome {
                success: false,
                value: 0.0,
                services: None,
            },
        };
        Ok(outcome)
    }

    /// Apply what was learned from an action to the observation
    fn update_state(&mut self, action: &Action, outcome: &ActionOutcome) -> Result<(), EnvError> {
        let target = action.target;
        let target_state = self
            .current_state
            .get_mut(&target)
            .ok_or(EnvError::InvalidTarget { target })?;

        match (&outcome.services, action.service()) {
            (Some(services), _) => {
                // success reveals the full configuration, overwriting any earlier knowledge
                for (known, &present) in target_state.services.iter_mut().zip(services) {
                    *known = ServiceState::from_present(present);
                }
            }
            (None, Some(service)) => {
                target_state.services[service] = ServiceState::Absent;
            }
            (None, None) => {}
        }

        if outcome.success && !action.is_scan() {
            target_state.compromised = true;
            self.update_reachable(&target);
        }
        Ok(())
    }

    /// Propagate reachability from a newly compromised machine
    fn update_reachable(&mut self, compromised: &Address) {
        // the exposed machine is the gateway to every other subnet; any other
        // machine is only targetable once everything is already reachable
        if compromised.subnet == Subnet::Exposed {
            trace!("Compromised {}: all subnets now reachable", compromised);
            for machine in self.current_state.values_mut() {
                machine.reachable = true;
            }
        }
    }

    fn result(&self, reward: f64, done: bool) -> StepResult {
        StepResult {
            observation: self.current_state.clone(),
            reward,
            done,
            info: HashMap::new(),
        }
    }

    /// True when every sensitive machine has been compromised
    pub fn is_goal(&self) -> bool {
        self.network.sensitive_machines().iter().all(|m| {
            self.current_state
                .get(m)
                .map_or(false, |state| state.compromised)
        })
    }

    /// Borrow the current observation
    pub fn observation(&self) -> &Observation {
        &self.current_state
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn sensitive_machines(&self) -> &[Address] {
        self.network.sensitive_machines()
    }

    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    pub fn observation_space(&self) -> &ObservationSpace {
        &self.observation_space
    }

    /// Number of machines on the network
    pub fn machines(&self) -> usize {
        self.network.len()
    }

    /// Number of service types per machine
    pub fn services(&self) -> usize {
        self.network.services()
    }

    /// Render the current observation as text
    pub fn render(&self) -> String {
        render(&self.current_state)
    }
}
