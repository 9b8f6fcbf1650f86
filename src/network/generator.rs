//! Ground truth network generation.
//!
//! Each machine is given a service configuration drawn uniformly from every
//! boolean vector of length `services` except the all-absent one, so every
//! machine runs at least one service. Sensitive machines carry a fixed
//! reward value and make up the goal set.

use std::collections::BTreeMap;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::address::{generate_address_space, Address, Subnet};
use crate::error::EnvError;

/// Value of a sensitive machine on the sensitive subnet
pub const R_SENSITIVE: f64 = 9000.0;
/// Value of a sensitive machine on the user subnet
pub const R_USER: f64 = 5000.0;

/// Largest supported number of service types
pub const MAX_SERVICES: usize = 63;

/// Ground truth state of a single machine
#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    /// `true` where the service is running
    pub services: Vec<bool>,
    /// Reward for compromising this machine
    pub value: f64,
}

/// Immutable ground truth network
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    machines: BTreeMap<Address, Machine>,
    sensitive_machines: Vec<Address>,
    services: usize,
}

impl Network {
    pub fn machine(&self, address: &Address) -> Option<&Machine> {
        self.machines.get(address)
    }

    /// Machines in address order
    pub fn machines(&self) -> impl Iterator<Item = (&Address, &Machine)> {
        self.machines.iter()
    }

    /// Addresses of the machines that must be compromised to reach the goal
    pub fn sensitive_machines(&self) -> &[Address] {
        &self.sensitive_machines
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Number of service types per machine
    pub fn services(&self) -> usize {
        self.services
    }

    /// Sum of every machine's value
    pub fn total_value(&self) -> f64 {
        self.machines.values().map(|m| m.value).sum()
    }
}

/// Value of the machine at `address`
pub fn machine_value(address: &Address) -> f64 {
    if !address.is_sensitive() {
        return 0.0;
    }
    match address.subnet {
        Subnet::Sensitive => R_SENSITIVE,
        Subnet::User => R_USER,
        Subnet::Exposed => 0.0,
    }
}

/// Number of candidate service configurations for `services` service types
fn configuration_count(services: usize) -> u64 {
    // all 2^n vectors less the all-absent one
    (1u64 << services) - 1
}

/// Decode candidate configuration `index`.
///
/// Service `j` is present when bit `j` of `index` is clear, so index 0 runs
/// every service and the excluded index `2^n - 1` would run none.
fn configuration(index: u64, services: usize) -> Vec<bool> {
    (0..services).map(|j| (index >> j) & 1 == 0).collect()
}

/// All candidate service configurations in draw order
///
/// # Examples
/// ```
/// use cyberattack::network::service_configurations;
///
/// assert_eq!(service_configurations(2), vec![
///     vec![true, true],
///     vec![false, true],
///     vec![true, false],
/// ]);
/// ```
pub fn service_configurations(services: usize) -> Vec<Vec<bool>> {
    if services == 0 || services > MAX_SERVICES {
        return Vec::new();
    }
    (0..configuration_count(services))
        .map(|i| configuration(i, services))
        .collect()
}

/// Check that `services` is within `1..=MAX_SERVICES`
pub(crate) fn validate_services(services: usize) -> Result<(), EnvError> {
    if services == 0 {
        return Err(EnvError::NoServices);
    }
    if services > MAX_SERVICES {
        return Err(EnvError::TooManyServices {
            services,
            max: MAX_SERVICES,
        });
    }
    Ok(())
}

/// Generate the ground truth network.
///
/// # Arguments
/// * `machines` - Total number of machines, must be greater than 2
/// * `services` - Number of service types, between 1 and [`MAX_SERVICES`]
/// * `seed` - Seed for the configuration draws
///
/// The same arguments always produce the same network.
pub fn generate_network(machines: usize, services: usize, seed: u64) -> Result<Network, EnvError> {
    let addresses = generate_address_space(machines)?;
    validate_services(services)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let candidates = configuration_count(services);

    let mut network = BTreeMap::new();
    let mut sensitive_machines = Vec::new();
    for address in addresses {
        let config = configuration(rng.gen_range(0..candidates), services);
        let value = machine_value(&address);
        if address.is_sensitive() {
            sensitive_machines.push(address);
        }
        debug!("Machine {} -> services {:?}, value {}", address, config, value);
        network.insert(address, Machine { services: config, value });
    }

    info!(
        "Generated network with {} machines, {} service types, {} sensitive machines (seed {})",
        network.len(),
        services,
        sensitive_machines.len(),
        seed
    );

    Ok(Network {
        machines: network,
        sensitive_machines,
        services,
    })
}
