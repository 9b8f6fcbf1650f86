//! Simulated network module.
//!
//! This module contains machine addressing and ground truth network
//! generation for the attack environment.

pub mod address;
pub mod generator;

// Re-export key types and functions for easier access
pub use address::{generate_address_space, Address, AddressSpace, Subnet};
pub use generator::{
    generate_network, machine_value, service_configurations, Machine, Network, MAX_SERVICES,
    R_SENSITIVE, R_USER,
};
