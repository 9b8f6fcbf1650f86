//! Belief state type definitions.
//!
//! The observation is the attacker's partial knowledge of the network. It
//! is kept separate from the ground truth in [`crate::network::Network`].

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::network::{Address, Subnet};

/// What the attacker knows about a single service on a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServiceState {
    #[default]
    Unknown,
    Present,
    Absent,
}

impl ServiceState {
    pub const ALL: [ServiceState; 3] = [ServiceState::Unknown, ServiceState::Present, ServiceState::Absent];

    /// Known state matching a ground truth service flag
    pub fn from_present(present: bool) -> Self {
        if present {
            ServiceState::Present
        } else {
            ServiceState::Absent
        }
    }
}

/// Observed state of a single machine
#[derive(Debug, Clone, PartialEq)]
pub struct MachineObservation {
    pub services: Vec<ServiceState>,
    pub compromised: bool,
    pub reachable: bool,
    pub sensitive: bool,
}

impl MachineObservation {
    /// Starting belief for the machine at `address`
    pub fn initial(address: &Address, services: usize) -> Self {
        Self {
            services: vec![ServiceState::Unknown; services],
            compromised: false,
            // only the exposed subnet is reachable at the start
            reachable: address.subnet == Subnet::Exposed,
            sensitive: address.is_sensitive(),
        }
    }
}

/// Observed state of every machine, ordered by address.
///
/// Clones are fully independent, which is what every snapshot handed out by
/// the environment relies on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observation {
    machines: BTreeMap<Address, MachineObservation>,
}

impl Observation {
    pub fn get(&self, address: &Address) -> Option<&MachineObservation> {
        self.machines.get(address)
    }

    pub(crate) fn get_mut(&mut self, address: &Address) -> Option<&mut MachineObservation> {
        self.machines.get_mut(address)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Address, MachineObservation> {
        self.machines.iter()
    }

    pub(crate) fn values_mut(&mut self) -> btree_map::ValuesMut<'_, Address, MachineObservation> {
        self.machines.values_mut()
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Number of compromised machines
    pub fn compromised_count(&self) -> usize {
        self.machines.values().filter(|m| m.compromised).count()
    }

    /// Number of reachable machines
    pub fn reachable_count(&self) -> usize {
        self.machines.values().filter(|m| m.reachable).count()
    }
}

impl FromIterator<(Address, MachineObservation)> for Observation {
    fn from_iter<I: IntoIterator<Item = (Address, MachineObservation)>>(iter: I) -> Self {
        Self {
            machines: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Observation {
    type Item = (&'a Address, &'a MachineObservation);
    type IntoIter = btree_map::Iter<'a, Address, MachineObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.machines.iter()
    }
}
