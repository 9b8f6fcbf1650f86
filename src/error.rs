//! Environment error types.
//!
//! Construction-time failures and rejected actions. Acting on an unreachable
//! or already compromised machine is a game rule, not an error, and is
//! reported through the reward instead.

use crate::network::Address;

/// Errors that can occur while building or stepping the environment
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnvError {
    #[error("Network needs more than 2 machines, got {machines}")]
    TooFewMachines { machines: usize },

    #[error("Machines must run at least one service type")]
    NoServices,

    #[error("At most {max} service types are supported, got {services}")]
    TooManyServices { services: usize, max: usize },

    #[error("Target {target} is not an address on this network")]
    InvalidTarget { target: Address },

    #[error("Action kind {kind} is out of range (expected 0..={max})")]
    InvalidActionKind { kind: usize, max: usize },
}
