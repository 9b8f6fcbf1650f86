//! Observation space.
//!
//! Describes every well formed observation for a network size and holds the
//! initial belief template that the environment resets to.

use rand::Rng;

use super::types::{MachineObservation, Observation, ServiceState};
use crate::error::EnvError;
use crate::network::generator::validate_services;
use crate::network::AddressSpace;
use crate::space::Space;

/// Space of observations for `machines` machines each with `services` services
#[derive(Debug, Clone)]
pub struct ObservationSpace {
    address_space: AddressSpace,
    services: usize,
    initial: Observation,
}

impl ObservationSpace {
    pub fn new(machines: usize, services: usize) -> Result<Self, EnvError> {
        let address_space = AddressSpace::new(machines)?;
        validate_services(services)?;
        let initial = initial_state(&address_space, services);
        Ok(Self {
            address_space,
            services,
            initial,
        })
    }

    /// Fresh copy of the all-unknown starting observation
    pub fn initial_state(&self) -> Observation {
        self.initial.clone()
    }

    pub fn address_space(&self) -> &AddressSpace {
        &self.address_space
    }

    pub fn services(&self) -> usize {
        self.services
    }
}

/// Build the starting observation for the given addresses
pub fn initial_state(address_space: &AddressSpace, services: usize) -> Observation {
    address_space
        .addresses()
        .iter()
        .map(|a| (*a, MachineObservation::initial(a, services)))
        .collect()
}

impl Space for ObservationSpace {
    type Element = Observation;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Observation {
        self.address_space
            .addresses()
            .iter()
            .map(|a| {
                let services = (0..self.services)
                    .map(|_| ServiceState::ALL[rng.gen_range(0..ServiceState::ALL.len())])
                    .collect();
                let machine = MachineObservation {
                    services,
                    compromised: rng.gen(),
                    reachable: rng.gen(),
                    sensitive: rng.gen(),
                };
                (*a, machine)
            })
            .collect()
    }

    fn contains(&self, x: &Observation) -> bool {
        if x.len() != self.address_space.len() {
            return false;
        }
        x.iter()
            .all(|(a, m)| self.address_space.contains(a) && m.services.len() == self.services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Address, Subnet};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_initial_state() {
        let space = ObservationSpace::new(12, 2).unwrap();
        let obs = space.initial_state();
        assert_eq!(obs.len(), 12);
        for (address, machine) in &obs {
            assert_eq!(machine.services, vec![ServiceState::Unknown; 2]);
            assert!(!machine.compromised);
            assert_eq!(machine.reachable, address.subnet == Subnet::Exposed);
            assert_eq!(machine.sensitive, address.is_sensitive());
        }
        assert!(obs.get(&Address::new(Subnet::Sensitive, 0)).unwrap().sensitive);
        assert!(!obs.get(&Address::new(Subnet::Sensitive, 1)).unwrap().sensitive);
        assert!(obs.get(&Address::new(Subnet::User, 0)).unwrap().sensitive);
        assert!(!obs.get(&Address::new(Subnet::Exposed, 0)).unwrap().sensitive);
    }

    #[test]
    fn test_initial_state_is_a_copy() {
        let space = ObservationSpace::new(4, 1).unwrap();
        let mut first = space.initial_state();
        first
            .get_mut(&Address::new(Subnet::User, 1))
            .unwrap()
            .compromised = true;
        assert_eq!(space.initial_state().compromised_count(), 0);
    }

    #[test]
    fn test_samples_are_members() {
        let space = ObservationSpace::new(3, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let a = space.sample(&mut rng);
        let b = space.sample(&mut rng);
        assert!(space.contains(&a));
        assert!(space.contains(&b));
        assert!(space.contains(&space.initial_state()));
    }

    #[test]
    fn test_rejects_malformed_observations() {
        let space = ObservationSpace::new(3, 4).unwrap();

        // wrong service vector length
        let short = ObservationSpace::new(3, 2).unwrap().initial_state();
        assert!(!space.contains(&short));

        // wrong machine count
        let bigger = ObservationSpace::new(4, 4).unwrap().initial_state();
        assert!(!space.contains(&bigger));

        // right count, foreign address
        let foreign: Observation = space
            .initial_state()
            .iter()
            .map(|(a, m)| {
                let a = if a.subnet == Subnet::User { Address::new(Subnet::User, 5) } else { *a };
                (a, m.clone())
            })
            .collect();
        assert_eq!(foreign.len(), 3);
        assert!(!space.contains(&foreign));
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert_eq!(ObservationSpace::new(2, 1).err(), Some(EnvError::TooFewMachines { machines: 2 }));
        assert_eq!(ObservationSpace::new(3, 0).err(), Some(EnvError::NoServices));
    }
}
