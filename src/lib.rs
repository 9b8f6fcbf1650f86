//! # Cyberattack - Turn-based network penetration simulator
//!
//! This library simulates a simplified attack on a computer network. An
//! attacker scans and exploits machines on a synthetic network to find and
//! compromise the machines holding sensitive documents, paying a cost for
//! every action.
//!
//! ## Overview
//!
//! The network is split into three subnets:
//!
//! - **Subnet 0 (exposed)**: a single machine, reachable from the start
//! - **Subnet 1 (sensitive)**: every 10th machine, high value documents
//! - **Subnet 2 (user)**: everything else, some with user documents
//!
//! Each machine runs a random, non-empty set of services. Exploiting a
//! running service compromises the machine; compromising the exposed machine
//! makes every other subnet reachable. The episode ends once every sensitive
//! machine is compromised.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `network`: Machine addressing and ground truth network generation
//! - `observation`: Attacker belief state and observation space
//! - `env`: Actions and the environment state machine
//! - `space`: Shared sampling and membership capability
//! - `render`: Text rendering of an observation
//! - `config`: Type-safe configuration structures and validation
//! - `config_loader`: Configuration file loading and CLI overrides
//! - `rollout`: Random agent episode driver
//!
//! ## Example Usage
//!
//! ```rust
//! use cyberattack::{Action, Address, CyberAttackEnv, Subnet};
//!
//! let mut env = CyberAttackEnv::new(4, 1, 1)?;
//! env.reset();
//!
//! // Compromise the exposed machine, opening up the rest of the network
//! env.step(&Action::exploit(Address::new(Subnet::Exposed, 0), 0))?;
//!
//! // Then go after the sensitive documents
//! let step = env.step(&Action::exploit(Address::new(Subnet::Sensitive, 0), 0))?;
//! assert_eq!(step.reward, 8990.0);
//!
//! println!("{}", env.render());
//! # Ok::<(), cyberattack::EnvError>(())
//! ```
//!
//! ## Configuration Format
//!
//! The `cyberattack` binary reads an optional YAML configuration:
//!
//! ```yaml
//! general:
//!   log_level: info
//!
//! environment:
//!   machines: 5
//!   services: 3
//!   seed: 1
//!
//! rollout:
//!   episodes: 10
//!   max_steps: 1000
//!   seed: 0
//! ```
//!
//! ## Error Handling
//!
//! Environment construction and invalid actions return [`EnvError`].
//! Targeting an unreachable or already compromised machine is not an error:
//! it costs the action price and leaves the state unchanged. File loading
//! and the binary use `color_eyre` for error reporting with context.

pub mod config;
pub mod config_loader;
pub mod env;
pub mod error;
pub mod network;
pub mod observation;
pub mod render;
pub mod rollout;
pub mod space;

#[cfg(test)]
mod test_utils;

pub use env::{Action, ActionSpace, CyberAttackEnv, StepResult, COST_EXPLOIT, COST_SCAN};
pub use error::EnvError;
pub use network::{Address, AddressSpace, Network, Subnet, R_SENSITIVE, R_USER};
pub use observation::{MachineObservation, Observation, ObservationSpace, ServiceState};
pub use render::render;
pub use space::Space;
