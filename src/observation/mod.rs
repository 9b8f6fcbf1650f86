//! Attacker belief state.
//!
//! Types for the per-machine observation record and the observation space
//! that produces the initial all-unknown state.

pub mod space;
pub mod types;

pub use space::{initial_state, ObservationSpace};
pub use types::{MachineObservation, Observation, ServiceState};
