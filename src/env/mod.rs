//! Attack environment module.
//!
//! This module contains the attacker action definitions and the environment
//! state machine that applies them to the simulated network.

pub mod action;
pub mod engine;

// Re-export key types for easier access
pub use action::{Action, ActionSpace, COST_EXPLOIT, COST_SCAN, SCAN};
pub use engine::{CyberAttackEnv, StepResult};
